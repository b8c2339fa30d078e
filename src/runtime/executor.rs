//! Conversation engine executor

use super::{reveal, UiEvent};

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::engine::{
    transition, ConversationMode, Effect, Event, FlowContext, FlowState, GatewayCall,
};
use crate::gateway::{Gateway, GatewayError, GatewayReply};
use crate::timeline::{Message, Timeline};

/// Event-loop owner of one conversation's state.
///
/// Events arrive over the mpsc channel, the pure transition decides what
/// changed, and effects either touch the timeline, broadcast to the UI, or
/// spawn background tasks whose completions re-enter the loop as events.
pub struct ConversationRuntime<G: Gateway + 'static> {
    context: FlowContext,
    state: FlowState,
    gateway: Arc<G>,
    timeline: Timeline,
    event_rx: mpsc::Receiver<Event>,
    /// Weak: only handles and in-flight tasks hold the channel open, so the
    /// loop observes closure once the last of them is gone
    event_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    /// Cancels every spawned timer, reveal, and in-flight call on shutdown
    cancel: CancellationToken,
    /// Last (mode, loading, input_locked) triple broadcast to the UI
    last_signal: Option<(ConversationMode, bool, bool)>,
}

impl<G: Gateway + 'static> ConversationRuntime<G> {
    pub fn new(
        context: FlowContext,
        gateway: G,
        timeline: Timeline,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        broadcast_tx: broadcast::Sender<UiEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            context,
            state: FlowState::new(),
            gateway: Arc::new(gateway),
            timeline,
            event_rx,
            event_tx,
            broadcast_tx,
            cancel,
            last_signal: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Starting conversation engine");

        // Baseline signal so subscribers render the initial chrome
        self.emit_state_changed();

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,

                maybe_event = self.event_rx.recv() => {
                    // None: the last handle dropped and every in-flight
                    // timer, reveal, and gateway call has finished
                    let Some(event) = maybe_event else { break };
                    self.process_event(event);
                }
            }
        }

        tracing::info!("Conversation engine stopped");
    }

    fn process_event(&mut self, event: Event) {
        let name = event.name();

        // Pure state transition
        match transition(&self.state, &self.context, event) {
            Ok(result) => {
                self.state = result.new_state;
                tracing::debug!(event = name, mode = ?self.state.mode, "Applied event");

                for effect in result.effects {
                    self.execute_effect(effect);
                }
                self.emit_state_changed();
            }
            Err(e) => {
                // Gated and out-of-mode events drop without touching state
                tracing::debug!(event = name, reason = %e, "Ignored event");
            }
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { sender, text } => {
                let message = Message::new(sender, text);
                self.timeline.push(message.clone());
                let _ = self.broadcast_tx.send(UiEvent::MessageAppended {
                    message: message.clone(),
                });

                if message.is_bot() {
                    if let Some(event_tx) = self.event_tx.upgrade() {
                        reveal::spawn(
                            &message,
                            self.context.timing.reveal_tick,
                            event_tx,
                            self.broadcast_tx.clone(),
                            self.cancel.clone(),
                        );
                    }
                }
            }

            Effect::ScheduleDelay { kind, delay } => {
                let Some(event_tx) = self.event_tx.upgrade() else {
                    return;
                };
                let cancel = self.cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        biased;

                        () = cancel.cancelled() => {}

                        () = tokio::time::sleep(delay) => {
                            let _ = event_tx.send(Event::DelayElapsed { kind }).await;
                        }
                    }
                });
            }

            Effect::CallGateway { call } => {
                let Some(event_tx) = self.event_tx.upgrade() else {
                    return;
                };
                let gateway = Arc::clone(&self.gateway);
                let cancel = self.cancel.clone();
                let endpoint = call.endpoint();
                tokio::spawn(async move {
                    tokio::select! {
                        biased;

                        () = cancel.cancelled() => {
                            tracing::debug!(endpoint, "Gateway call abandoned at shutdown");
                        }

                        reply = dispatch_call(&*gateway, &call) => {
                            if let Err(e) = &reply {
                                tracing::warn!(endpoint, error = %e, "Gateway call failed");
                            }
                            let _ = event_tx.send(Event::GatewayDone { call, reply }).await;
                        }
                    }
                });
            }

            Effect::ReportFormErrors { errors } => {
                let _ = self.broadcast_tx.send(UiEvent::FormErrors { errors });
            }
        }
    }

    /// Broadcast the (mode, loading, input_locked) triple when it changes.
    fn emit_state_changed(&mut self) {
        let signal = (
            self.state.mode,
            self.state.loading,
            self.state.input_locked(),
        );
        if self.last_signal == Some(signal) {
            return;
        }
        self.last_signal = Some(signal);

        let (mode, loading, input_locked) = signal;
        let _ = self.broadcast_tx.send(UiEvent::StateChanged {
            mode,
            loading,
            input_locked,
        });
    }
}

/// Route a call description to the matching gateway endpoint.
async fn dispatch_call<G: Gateway + ?Sized>(
    gateway: &G,
    call: &GatewayCall,
) -> Result<GatewayReply, GatewayError> {
    match call {
        GatewayCall::Inquiry { text } => gateway.submit_inquiry(text).await,
        GatewayCall::ServiceDetail { service } => gateway.submit_service(service).await,
        GatewayCall::ProjectScope { email, idea } => gateway.submit_project(email, idea).await,
        GatewayCall::Contact { email, phone } => {
            gateway
                .submit_contact(email.as_deref(), phone.as_deref())
                .await
        }
    }
}

//! Async runtime for driving conversations
//!
//! [`ConversationHandle::spawn`] starts one engine task per conversation.
//! The handle feeds user actions into the engine's event channel and
//! exposes the broadcast stream the UI renders from.

mod executor;
mod reveal;


pub use executor::ConversationRuntime;

use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::engine::{ConversationMode, Event, FlowContext};
use crate::gateway::Gateway;
use crate::timeline::{Message, MessageId, Timeline};
use crate::validate::FormErrors;

/// Events broadcast to UI subscribers
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A message landed on the timeline
    MessageAppended { message: Message },
    /// A bot message began its typing reveal
    RevealStarted { message_id: MessageId },
    /// The first `revealed` characters of the message are now visible
    RevealProgress { message_id: MessageId, revealed: usize },
    /// The bot message is fully visible
    RevealFinished { message_id: MessageId },
    /// The mode / loading / input-lock triple changed
    StateChanged {
        mode: ConversationMode,
        loading: bool,
        input_locked: bool,
    },
    /// Validation outcome for the active form
    FormErrors { errors: FormErrors },
}

/// Handle to interact with a running conversation
///
/// Clone freely; every clone feeds the same engine. The engine stops when
/// [`ConversationHandle::shutdown`] is called or every handle is dropped.
#[derive(Clone)]
pub struct ConversationHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    timeline: Timeline,
    cancel: CancellationToken,
}

impl ConversationHandle {
    /// Spawn an engine task for a new conversation.
    pub fn spawn<G>(config: EngineConfig, gateway: G) -> Self
    where
        G: Gateway + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let timeline = Timeline::new();
        let cancel = CancellationToken::new();

        // The runtime keeps only a weak sender: once every handle and
        // in-flight task is gone the channel closes and the loop exits.
        let runtime = ConversationRuntime::new(
            FlowContext::new(config.timing),
            gateway,
            timeline.clone(),
            event_rx,
            event_tx.downgrade(),
            broadcast_tx.clone(),
            cancel.clone(),
        );
        tokio::spawn(runtime.run());

        Self {
            event_tx,
            broadcast_tx,
            timeline,
            cancel,
        }
    }

    /// Submit free text typed into the input box.
    pub fn submit_free_text(&self, text: impl Into<String>) {
        self.send(Event::FreeText { text: text.into() });
    }

    /// Dispatch a tapped quick-reply chip by its label.
    pub fn dispatch_quick_reply(&self, label: impl Into<String>) {
        self.send(Event::QuickReply {
            label: label.into(),
        });
    }

    /// Submit the service chosen in the service picker.
    pub fn submit_service_selection(&self, service: impl Into<String>) {
        self.send(Event::ServiceSelected {
            service: service.into(),
        });
    }

    /// Dismiss the service picker.
    pub fn cancel_service_selection(&self) {
        self.send(Event::ServiceCancelled);
    }

    /// Submit the project intake form.
    pub fn submit_project_form(&self, email: impl Into<String>, idea: impl Into<String>) {
        self.send(Event::ProjectSubmitted {
            email: email.into(),
            idea: idea.into(),
        });
    }

    /// Dismiss the project form.
    pub fn cancel_project_form(&self) {
        self.send(Event::ProjectCancelled);
    }

    /// Answer the browsing consent prompt.
    pub fn choose_consent(&self, share: bool) {
        self.send(Event::ConsentChoice { share });
    }

    /// Submit the contact field from the browsing sub-flow.
    pub fn submit_contact(&self, input: impl Into<String>) {
        self.send(Event::ContactSubmitted {
            input: input.into(),
        });
    }

    /// Dismiss the contact form.
    pub fn cancel_contact(&self) {
        self.send(Event::ContactCancelled);
    }

    /// Snapshot of the message log, oldest first.
    ///
    /// This is the source of truth for re-rendering after a subscriber
    /// lags behind the broadcast channel.
    pub fn timeline(&self) -> Vec<Message> {
        self.timeline.snapshot()
    }

    /// Subscribe to UI events.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.broadcast_tx.subscribe()
    }

    /// UI events as a stream.
    pub fn events(&self) -> impl Stream<Item = UiEvent> {
        BroadcastStream::new(self.broadcast_tx.subscribe()).filter_map(|result| match result {
            Ok(event) => Some(event),
            Err(_) => None, // Skip lagged messages
        })
    }

    /// Stop the engine and cancel every scheduled task.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    // Actions are fire-and-forget: a full buffer means the engine is wedged
    // or gone, and blocking the UI thread would not help it.
    fn send(&self, event: Event) {
        let name = event.name();
        if let Err(e) = self.event_tx.try_send(event) {
            tracing::warn!(event = name, error = %e, "Dropped conversation event");
        }
    }
}

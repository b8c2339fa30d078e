//! Pure state transition function.
//!
//! Given the current state and one event, produces the next state plus the
//! effects the runtime should execute. No I/O happens here; timers, gateway
//! calls, and reveals come back as further events.

use super::browsing;
use super::dispatch::{self, Branch};
use super::script;
use crate::engine::effect::{DelayKind, Effect, GatewayCall};
use crate::engine::event::Event;
use crate::engine::state::{ConversationMode, FlowContext, FlowState};
use crate::gateway::{GatewayError, GatewayReply};
use crate::timeline::Sender;
use crate::validate::FormErrors;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: FlowState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: FlowState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejection reasons. All of them are silent no-ops at the widget surface;
/// the runtime logs them at debug level and nothing changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("input is gated while a reply is loading or revealing")]
    InputLocked,
    #[error("submitted text was empty")]
    EmptyInput,
    #[error("event does not apply to the current mode")]
    WrongMode,
}

/// Pure transition function.
///
/// Submissions are rejected up front while input is gated; cancels only
/// while a submission is in flight (reveals do not block them). The reveal
/// and prompt counters are settled in one place after the event is handled:
/// every emitted bot append and scheduled delay increments, and the matching
/// completion events decrement.
pub fn transition(
    state: &FlowState,
    context: &FlowContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    if event.is_gated_submission() && state.input_locked() {
        return Err(TransitionError::InputLocked);
    }
    if event.is_cancel() && state.loading {
        return Err(TransitionError::InputLocked);
    }

    let result = handle_event(state, context, event)?;
    Ok(apply_counters(result))
}

fn handle_event(
    state: &FlowState,
    context: &FlowContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.mode, event) {
        // ============================================================
        // Free text and quick replies (available in every mode)
        // ============================================================
        (_, Event::FreeText { text }) => submit_free_text(state, &text),

        (_, Event::QuickReply { label }) => dispatch_quick_reply(state, context, label),

        // ============================================================
        // Service lookup
        // ============================================================
        (ConversationMode::AwaitingServiceSelection, Event::ServiceSelected { service }) => {
            submit_service(state, service)
        }
        (_, Event::ServiceSelected { .. }) => Err(TransitionError::WrongMode),

        (ConversationMode::AwaitingServiceSelection, Event::ServiceCancelled) => {
            let mut next = state.clone();
            next.mode = ConversationMode::Idle;
            Ok(TransitionResult::new(next))
        }
        (_, Event::ServiceCancelled) => Err(TransitionError::WrongMode),

        // ============================================================
        // Project intake
        // ============================================================
        (ConversationMode::AwaitingProjectForm, Event::ProjectSubmitted { email, idea }) => {
            submit_project(state, context, email, idea)
        }
        (_, Event::ProjectSubmitted { .. }) => Err(TransitionError::WrongMode),

        (ConversationMode::AwaitingProjectForm, Event::ProjectCancelled) => {
            let mut next = state.clone();
            next.mode = ConversationMode::Idle;
            // Mirror the form reset: displayed field errors are cleared
            Ok(TransitionResult::new(next).with_effect(Effect::report_form_errors(
                FormErrors::project(crate::validate::ProjectFieldErrors::default()),
            )))
        }
        (_, Event::ProjectCancelled) => Err(TransitionError::WrongMode),

        // ============================================================
        // Browsing sub-flow
        // ============================================================
        (ConversationMode::Browsing { step }, Event::ConsentChoice { share }) => {
            browsing::on_consent(state, step, share, context)
        }
        (_, Event::ConsentChoice { .. }) => Err(TransitionError::WrongMode),

        (ConversationMode::Browsing { step }, Event::ContactSubmitted { input }) => {
            browsing::on_contact_submitted(state, step, &input, context)
        }
        (_, Event::ContactSubmitted { .. }) => Err(TransitionError::WrongMode),

        (ConversationMode::Browsing { step }, Event::ContactCancelled) => {
            browsing::on_contact_cancelled(state, step)
        }
        (_, Event::ContactCancelled) => Err(TransitionError::WrongMode),

        // ============================================================
        // Scheduler and gateway completions
        // ============================================================
        (_, Event::DelayElapsed { kind }) => Ok(on_delay_elapsed(state, kind)),

        (_, Event::RevealFinished { .. }) => {
            let mut next = state.clone();
            next.active_reveals = next.active_reveals.saturating_sub(1);
            Ok(TransitionResult::new(next))
        }

        (_, Event::GatewayDone { call, reply }) => Ok(on_gateway_done(state, &call, &reply)),
    }
}

/// Uniform counter bookkeeping: every appended bot line and scheduled prompt
/// locks input until its completion event comes back and decrements.
fn apply_counters(mut result: TransitionResult) -> TransitionResult {
    for effect in &result.effects {
        match effect {
            Effect::AppendMessage {
                sender: Sender::Bot,
                ..
            } => result.new_state.active_reveals += 1,
            Effect::ScheduleDelay { .. } => result.new_state.pending_prompts += 1,
            _ => {}
        }
    }
    result
}

/// Generic inquiry: trimmed text is echoed, submitted, and any previously
/// active sub-mode is cleared at submission time.
fn submit_free_text(state: &FlowState, text: &str) -> Result<TransitionResult, TransitionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TransitionError::EmptyInput);
    }
    let mut next = state.clone();
    next.mode = ConversationMode::Idle;
    next.loading = true;
    Ok(TransitionResult::new(next)
        .with_effect(Effect::append_user(trimmed))
        .with_effect(Effect::call_gateway(GatewayCall::Inquiry {
            text: trimmed.to_string(),
        })))
}

fn dispatch_quick_reply(
    state: &FlowState,
    context: &FlowContext,
    label: String,
) -> Result<TransitionResult, TransitionError> {
    match dispatch::classify(&label) {
        Branch::ServiceLookup => {
            let mut next = state.clone();
            next.mode = ConversationMode::AwaitingServiceSelection;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::append_user(label))
                .with_effect(Effect::schedule(
                    DelayKind::ServicePrompt,
                    context.timing.service_prompt,
                )))
        }
        Branch::ProjectIntake => {
            let mut next = state.clone();
            next.mode = ConversationMode::AwaitingProjectForm;
            next.loading = true;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::append_user(label))
                .with_effect(Effect::schedule(
                    DelayKind::ProjectPrompt,
                    context.timing.project_prompt,
                )))
        }
        Branch::Browsing => Ok(browsing::activate(state, context, &label)),
        Branch::Inquiries => {
            let mut next = state.clone();
            next.mode = ConversationMode::Idle;
            next.loading = true;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::append_user(label))
                .with_effect(Effect::schedule(
                    DelayKind::InquiryPrompt,
                    context.timing.inquiry_prompt,
                )))
        }
        Branch::FreeText => submit_free_text(state, &label),
    }
}

/// The picker closes at submission; the reply lands as a plain bot message.
fn submit_service(
    state: &FlowState,
    service: String,
) -> Result<TransitionResult, TransitionError> {
    if service.is_empty() {
        return Err(TransitionError::EmptyInput);
    }
    let mut next = state.clone();
    next.mode = ConversationMode::Idle;
    next.loading = true;
    Ok(TransitionResult::new(next)
        .with_effect(Effect::append_user(service.clone()))
        .with_effect(Effect::call_gateway(GatewayCall::ServiceDetail { service })))
}

/// Validation always reports (an empty report clears stale field errors);
/// only a clean form proceeds to the summary echo and the submission.
fn submit_project(
    state: &FlowState,
    context: &FlowContext,
    email: String,
    idea: String,
) -> Result<TransitionResult, TransitionError> {
    let errors = context.gate.check_project(&email, &idea);
    let report = Effect::report_form_errors(FormErrors::project(errors.clone()));
    if !errors.is_empty() {
        return Ok(TransitionResult::new(state.clone()).with_effect(report));
    }

    let mut next = state.clone();
    next.mode = ConversationMode::Idle;
    next.loading = true;
    Ok(TransitionResult::new(next)
        .with_effect(report)
        .with_effect(Effect::append_user(script::project_summary(&email, &idea)))
        .with_effect(Effect::call_gateway(GatewayCall::ProjectScope {
            email,
            idea,
        })))
}

/// Every timer delivers its line whatever the mode is by the time it fires;
/// only the step advance is mode-guarded.
fn on_delay_elapsed(state: &FlowState, kind: DelayKind) -> TransitionResult {
    let mut next = state.clone();
    next.pending_prompts = next.pending_prompts.saturating_sub(1);
    if kind.clears_loading() {
        next.loading = false;
    }
    next.mode = browsing::advance_on_delay(next.mode, kind);
    TransitionResult::new(next).with_effect(Effect::append_bot(script::line_for_delay(kind)))
}

/// A reply is appended regardless of the current mode. The contact endpoint
/// additionally completes the browsing sub-flow.
fn on_gateway_done(
    state: &FlowState,
    call: &GatewayCall,
    reply: &Result<GatewayReply, GatewayError>,
) -> TransitionResult {
    let mut next = state.clone();
    next.loading = false;
    if matches!(call, GatewayCall::Contact { .. }) {
        next.mode = ConversationMode::Idle;
    }
    TransitionResult::new(next).with_effect(Effect::append_bot(reply_line(call, reply)))
}

/// The bot line for a finished gateway call. Server-provided text wins on
/// success where the endpoint allows it; failures use fixed lines.
fn reply_line(call: &GatewayCall, reply: &Result<GatewayReply, GatewayError>) -> String {
    match (call, reply) {
        (GatewayCall::Inquiry { text }, Ok(reply)) => {
            server_text(reply).unwrap_or_else(|| script::inquiry_echo(text))
        }
        (GatewayCall::Inquiry { .. }, Err(_)) => script::GENERIC_FAILURE.to_string(),

        (GatewayCall::ServiceDetail { .. }, Ok(reply)) => {
            server_text(reply).unwrap_or_else(|| script::SERVICE_DETAIL_FALLBACK.to_string())
        }
        (GatewayCall::ServiceDetail { .. }, Err(_)) => script::GENERIC_FAILURE.to_string(),

        (GatewayCall::ProjectScope { .. }, Ok(reply)) => {
            server_text(reply).unwrap_or_else(|| script::PROJECT_THANKS.to_string())
        }
        (GatewayCall::ProjectScope { .. }, Err(_)) => script::PROJECT_FAILURE.to_string(),

        // The contact endpoint's reply body is ignored
        (GatewayCall::Contact { .. }, Ok(_)) => script::CONTACT_THANKS.to_string(),
        (GatewayCall::Contact { .. }, Err(_)) => script::CONTACT_FAILURE.to_string(),
    }
}

/// An empty message field counts as absent, like the original's falsy check
fn server_text(reply: &GatewayReply) -> Option<String> {
    reply.message.clone().filter(|m| !m.is_empty())
}

//! Browsing sub-flow: the scripted contact-capture dialogue.
//!
//! A nested state machine activated by the "just browsing" quick reply. It
//! never touches the timeline or the mode directly; it returns effects and
//! step values the engine applies. Reaching `Done` maps to
//! `ConversationMode::Idle`, so the step value is never stored and each
//! activation starts fresh.

use super::transition::{TransitionError, TransitionResult};
use crate::engine::effect::{DelayKind, Effect, GatewayCall};
use crate::engine::script;
use crate::engine::state::{BrowsingStep, ConversationMode, FlowContext, FlowState};
use crate::validate::FormErrors;

/// Activate the sub-flow from a quick-reply tap.
///
/// Both timers are scheduled at activation: the consent prompt delay runs
/// from activation, overlapping the greeting delay rather than following it.
pub(crate) fn activate(state: &FlowState, context: &FlowContext, label: &str) -> TransitionResult {
    let mut next = state.clone();
    next.mode = ConversationMode::browsing(BrowsingStep::Initial);
    next.loading = true;
    TransitionResult::new(next)
        .with_effect(Effect::append_user(label))
        .with_effect(Effect::schedule(
            DelayKind::BrowsingGreeting,
            context.timing.browsing_greeting,
        ))
        .with_effect(Effect::schedule(
            DelayKind::BrowsingConsentPrompt,
            context.timing.consent_prompt,
        ))
}

/// Step advances driven by the sub-flow's clock.
///
/// A timer advances the step only when the mode still matches its origin, so
/// a stale timer cannot resurrect an abandoned sub-flow. The delivered line
/// is appended by the caller either way.
pub(crate) fn advance_on_delay(mode: ConversationMode, kind: DelayKind) -> ConversationMode {
    match (mode, kind) {
        (
            ConversationMode::Browsing {
                step: BrowsingStep::Initial,
            },
            DelayKind::BrowsingConsentPrompt,
        ) => ConversationMode::browsing(BrowsingStep::AskingConsent),
        (
            ConversationMode::Browsing {
                step: BrowsingStep::AskingConsent,
            },
            DelayKind::ConsentAccepted,
        ) => ConversationMode::browsing(BrowsingStep::CollectingContact),
        _ => mode,
    }
}

/// Handle the consent choice while the consent question is open.
pub(crate) fn on_consent(
    state: &FlowState,
    step: BrowsingStep,
    share: bool,
    context: &FlowContext,
) -> Result<TransitionResult, TransitionError> {
    if step != BrowsingStep::AskingConsent {
        return Err(TransitionError::WrongMode);
    }
    let mut next = state.clone();
    next.loading = true;
    if share {
        Ok(TransitionResult::new(next).with_effect(Effect::schedule(
            DelayKind::ConsentAccepted,
            context.timing.consent_reply,
        )))
    } else {
        // Declining deactivates immediately; the farewell timer outlives the
        // sub-flow and its line is appended whatever the mode is by then.
        next.mode = ConversationMode::Idle;
        Ok(TransitionResult::new(next)
            .with_effect(Effect::append_user(script::DECLINE_ECHO))
            .with_effect(Effect::schedule(
                DelayKind::ConsentDeclined,
                context.timing.consent_reply,
            )))
    }
}

/// Handle one submitted contact line while the contact form is open.
pub(crate) fn on_contact_submitted(
    state: &FlowState,
    step: BrowsingStep,
    input: &str,
    context: &FlowContext,
) -> Result<TransitionResult, TransitionError> {
    if step != BrowsingStep::CollectingContact {
        return Err(TransitionError::WrongMode);
    }
    match context.gate.classify_contact(input) {
        Err(error) => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::report_form_errors(FormErrors::contact(error)))),
        Ok(info) => {
            let mut next = state.clone();
            next.loading = true;
            // The contact form stays visible while the submission is in
            // flight; the sub-flow deactivates when the reply lands.
            Ok(TransitionResult::new(next)
                .with_effect(Effect::append_user(info.value()))
                .with_effect(Effect::call_gateway(GatewayCall::Contact {
                    email: info.email,
                    phone: info.phone,
                })))
        }
    }
}

/// Cancel out of the contact form: straight to `Done`, nothing sent.
pub(crate) fn on_contact_cancelled(
    state: &FlowState,
    step: BrowsingStep,
) -> Result<TransitionResult, TransitionError> {
    if step != BrowsingStep::CollectingContact {
        return Err(TransitionError::WrongMode);
    }
    let mut next = state.clone();
    next.mode = ConversationMode::Idle;
    Ok(TransitionResult::new(next))
}

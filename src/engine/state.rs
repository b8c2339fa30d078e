//! Conversation state types

use crate::config::ScriptTiming;
use crate::validate::FormGate;
use serde::{Deserialize, Serialize};

/// Step of the passive-browsing contact-capture dialogue.
///
/// Owned by the sub-flow transition. `Done` is terminal and never stored:
/// the engine maps it to `ConversationMode::Idle`, so each activation starts
/// from a fresh `Initial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowsingStep {
    /// Activated; greeting and consent prompt timers are pending
    Initial,
    /// Consent prompt delivered, waiting for a yes/no choice
    AskingConsent,
    /// Waiting for one line holding an email or phone number
    CollectingContact,
    /// Terminal: control returns to the conversation
    Done,
}

/// Which input surface is active. Exactly one mode at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationMode {
    /// Free-text box and quick replies
    #[default]
    Idle,

    /// Service picker is open
    AwaitingServiceSelection,

    /// Project intake form is open
    AwaitingProjectForm,

    /// Browsing sub-flow owns the dialogue
    Browsing { step: BrowsingStep },
}

impl ConversationMode {
    pub fn browsing(step: BrowsingStep) -> Self {
        ConversationMode::Browsing { step }
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self, ConversationMode::Browsing { .. })
    }

    /// The free-text box is the default surface
    pub fn shows_free_text(&self) -> bool {
        matches!(self, ConversationMode::Idle)
    }

    pub fn shows_service_picker(&self) -> bool {
        matches!(self, ConversationMode::AwaitingServiceSelection)
    }

    pub fn shows_project_form(&self) -> bool {
        matches!(self, ConversationMode::AwaitingProjectForm)
    }

    pub fn shows_consent_buttons(&self) -> bool {
        matches!(
            self,
            ConversationMode::Browsing {
                step: BrowsingStep::AskingConsent
            }
        )
    }

    pub fn shows_contact_form(&self) -> bool {
        matches!(
            self,
            ConversationMode::Browsing {
                step: BrowsingStep::CollectingContact
            }
        )
    }
}

/// Engine state threaded through the pure transition function.
///
/// The reveal and prompt counters exist only to derive `input_locked`; the
/// transition increments them when it emits the corresponding effects and
/// decrements them when the completion events come back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FlowState {
    pub mode: ConversationMode,
    /// A gateway submission or scripted pause is in flight
    pub loading: bool,
    /// Bot messages currently mid-reveal
    pub active_reveals: u32,
    /// Scripted bot prompts scheduled but not yet delivered
    pub pending_prompts: u32,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived input gate. While true, dispatch and submit paths are
    /// rejected at the entry point; there is no separately tracked flag.
    pub fn input_locked(&self) -> bool {
        self.loading || self.active_reveals > 0 || self.pending_prompts > 0
    }
}

/// Immutable per-conversation configuration
#[derive(Debug, Clone)]
pub struct FlowContext {
    pub timing: ScriptTiming,
    pub gate: FormGate,
}

impl FlowContext {
    pub fn new(timing: ScriptTiming) -> Self {
        Self {
            timing,
            gate: FormGate::new(),
        }
    }
}

impl Default for FlowContext {
    fn default() -> Self {
        Self::new(ScriptTiming::default())
    }
}

//! Effects produced by state transitions

use crate::timeline::Sender;
use crate::validate::FormErrors;
use std::time::Duration;

/// One-shot scripted timers. The kind is echoed back in
/// `Event::DelayElapsed` so the transition knows which line is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayKind {
    /// 200 ms pause before the service picker prompt
    ServicePrompt,
    /// 300 ms pause before the project form prompt
    ProjectPrompt,
    /// 300 ms pause before the free-inquiry prompt
    InquiryPrompt,
    /// Pause from browsing activation to the greeting
    BrowsingGreeting,
    /// Pause from browsing activation to the consent prompt
    BrowsingConsentPrompt,
    /// Pause before the contact prompt after consent was given
    ConsentAccepted,
    /// Pause before the farewell after consent was declined
    ConsentDeclined,
}

impl DelayKind {
    /// Timers that end a scripted "composing" pause clear the loading flag.
    /// The service prompt never set it; the consent prompt fires long after
    /// the greeting already cleared it.
    pub fn clears_loading(self) -> bool {
        !matches!(
            self,
            DelayKind::ServicePrompt | DelayKind::BrowsingConsentPrompt
        )
    }
}

/// A gateway invocation. Carried in `Effect::CallGateway` and echoed back in
/// `Event::GatewayDone`, so the transition can build the per-endpoint reply
/// line without the executor knowing any script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// Generic inquiry with the user's free text
    Inquiry { text: String },
    /// Service detail lookup
    ServiceDetail { service: String },
    /// Project scope request
    ProjectScope { email: String, idea: String },
    /// Contact capture; exactly one side is populated
    Contact {
        email: Option<String>,
        phone: Option<String>,
    },
}

impl GatewayCall {
    /// Endpoint path this call maps to, for logging.
    pub fn endpoint(&self) -> &'static str {
        match self {
            GatewayCall::Inquiry { .. } => "/submit_inquiry",
            GatewayCall::ServiceDetail { .. } => "/submit_service",
            GatewayCall::ProjectScope { .. } => "/get_scope",
            GatewayCall::Contact { .. } => "/contact_form",
        }
    }
}

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the timeline. Bot messages start a typing reveal.
    AppendMessage { sender: Sender, text: String },

    /// Schedule a one-shot cancellable timer
    ScheduleDelay { kind: DelayKind, delay: Duration },

    /// Spawn a gateway submission (runs to completion, never cancelled
    /// mid-flight; the engine token only stops it on shutdown)
    CallGateway { call: GatewayCall },

    /// Report field-scoped validation errors to the host. An empty report
    /// clears previously displayed errors.
    ReportFormErrors { errors: FormErrors },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn schedule(kind: DelayKind, delay: Duration) -> Self {
        Effect::ScheduleDelay { kind, delay }
    }

    pub fn call_gateway(call: GatewayCall) -> Self {
        Effect::CallGateway { call }
    }

    pub fn report_form_errors(errors: FormErrors) -> Self {
        Effect::ReportFormErrors { errors }
    }

    /// True for appends that start a reveal
    pub fn is_bot_append(&self) -> bool {
        matches!(
            self,
            Effect::AppendMessage {
                sender: Sender::Bot,
                ..
            }
        )
    }
}

//! Events that drive the conversation engine

use crate::engine::effect::{DelayKind, GatewayCall};
use crate::gateway::{GatewayError, GatewayReply};
use crate::timeline::MessageId;

/// Events that trigger state transitions.
///
/// User events originate from handle methods; scheduler and gateway events
/// are fed back by tasks the executor spawned.
#[derive(Debug, Clone)]
pub enum Event {
    // User actions
    FreeText {
        text: String,
    },
    QuickReply {
        label: String,
    },
    ServiceSelected {
        service: String,
    },
    ServiceCancelled,
    ProjectSubmitted {
        email: String,
        idea: String,
    },
    ProjectCancelled,
    /// Consent choice in the browsing sub-flow; true means "share my details"
    ConsentChoice {
        share: bool,
    },
    ContactSubmitted {
        input: String,
    },
    ContactCancelled,

    // Scheduler events
    DelayElapsed {
        kind: DelayKind,
    },
    RevealFinished {
        message_id: MessageId,
    },

    // Gateway events
    GatewayDone {
        call: GatewayCall,
        reply: Result<GatewayReply, GatewayError>,
    },
}

impl Event {
    /// User submissions rejected while input is gated
    pub fn is_gated_submission(&self) -> bool {
        matches!(
            self,
            Event::FreeText { .. }
                | Event::QuickReply { .. }
                | Event::ServiceSelected { .. }
                | Event::ProjectSubmitted { .. }
                | Event::ConsentChoice { .. }
                | Event::ContactSubmitted { .. }
        )
    }

    /// Cancels are no-ops only while a submission is in flight; reveals and
    /// pending prompts do not block them
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            Event::ServiceCancelled | Event::ProjectCancelled | Event::ContactCancelled
        )
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::FreeText { .. } => "free_text",
            Event::QuickReply { .. } => "quick_reply",
            Event::ServiceSelected { .. } => "service_selected",
            Event::ServiceCancelled => "service_cancelled",
            Event::ProjectSubmitted { .. } => "project_submitted",
            Event::ProjectCancelled => "project_cancelled",
            Event::ConsentChoice { .. } => "consent_choice",
            Event::ContactSubmitted { .. } => "contact_submitted",
            Event::ContactCancelled => "contact_cancelled",
            Event::DelayElapsed { .. } => "delay_elapsed",
            Event::RevealFinished { .. } => "reveal_finished",
            Event::GatewayDone { .. } => "gateway_done",
        }
    }
}

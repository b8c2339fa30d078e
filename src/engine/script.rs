//! Scripted bot lines and reply templates.
//!
//! Every fixed string the engine emits lives here, keyed by the moment it is
//! delivered. The transition function never builds prose inline.

use crate::engine::effect::DelayKind;

/// Prompt after the service picker opens
pub const SERVICE_PROMPT: &str = "Which service would you like to know more about?";

/// Prompt after the project form opens
pub const PROJECT_PROMPT: &str = "That's great! Could you tell me more about your project?";

/// Prompt after the "other inquiries" branch
pub const INQUIRY_PROMPT: &str =
    "Please let me know your question or the information you're looking for.";

/// First line of the browsing sub-flow
pub const BROWSING_GREETING: &str =
    "No problem! Feel free to explore our website. If you need any assistance, I'm always here to help.";

/// Consent question of the browsing sub-flow
pub const CONSENT_PROMPT: &str =
    "Would you like to share your contact details for future assistance?";

/// Contact request after consent was given
pub const CONTACT_PROMPT: &str =
    "Please provide your Email or Contact Number so that we can reach out.";

/// Echoed as a user message when consent is declined
pub const DECLINE_ECHO: &str = "No";

/// Farewell after consent was declined
pub const DECLINE_REPLY: &str = "No worries! Let's continue.";

/// Reply after a successful contact submission
pub const CONTACT_THANKS: &str = "Thanks! We'll reach out if needed.";

/// Reply after a failed contact submission
pub const CONTACT_FAILURE: &str = "Failed to submit contact info. Try again later.";

/// Service detail reply when the server sends no message text
pub const SERVICE_DETAIL_FALLBACK: &str = "Here are the details.";

/// Project scope reply when the server sends no message text
pub const PROJECT_THANKS: &str = "Thank you for sharing your idea!";

/// Failure reply for inquiry and service submissions
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// Failure reply for project scope submissions
pub const PROJECT_FAILURE: &str = "Something went wrong. Please try again later.";

/// Inquiry reply when the server sends no message text
pub fn inquiry_echo(text: &str) -> String {
    format!("You said: \"{text}\". How can I assist further?")
}

/// Combined user message summarizing a submitted project form
pub fn project_summary(email: &str, idea: &str) -> String {
    format!("Email: {email}\nIdea: {idea}")
}

/// The line a scripted timer delivers when it fires
pub fn line_for_delay(kind: DelayKind) -> &'static str {
    match kind {
        DelayKind::ServicePrompt => SERVICE_PROMPT,
        DelayKind::ProjectPrompt => PROJECT_PROMPT,
        DelayKind::InquiryPrompt => INQUIRY_PROMPT,
        DelayKind::BrowsingGreeting => BROWSING_GREETING,
        DelayKind::BrowsingConsentPrompt => CONSENT_PROMPT,
        DelayKind::ConsentAccepted => CONTACT_PROMPT,
        DelayKind::ConsentDeclined => DECLINE_REPLY,
    }
}

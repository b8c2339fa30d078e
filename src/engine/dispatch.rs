//! Quick-reply dispatch: maps tapped labels to conversation branches.

/// Canonical quick-reply labels, in display order
pub const QUICK_REPLY_SERVICES: &str = "Tell me about your services.";
pub const QUICK_REPLY_PROJECT: &str = "I need help with a specific project.";
pub const QUICK_REPLY_BROWSING: &str = "I am just browsing.";
pub const QUICK_REPLY_INQUIRIES: &str = "Other inquiries.";

/// The labels the widget renders as tappable chips
pub const QUICK_REPLIES: [&str; 4] = [
    QUICK_REPLY_SERVICES,
    QUICK_REPLY_PROJECT,
    QUICK_REPLY_BROWSING,
    QUICK_REPLY_INQUIRIES,
];

/// Branch selected for a quick-reply label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Open the service picker
    ServiceLookup,
    /// Open the project intake form
    ProjectIntake,
    /// Activate the browsing sub-flow
    Browsing,
    /// Scripted invitation to type a question
    Inquiries,
    /// No keyword matched; the label is submitted as free text
    FreeText,
}

/// Classify a label by case-insensitive substring match. First match wins,
/// in this fixed priority order.
pub fn classify(label: &str) -> Branch {
    let lower = label.to_lowercase();
    if lower.contains("services") {
        Branch::ServiceLookup
    } else if lower.contains("specific project") {
        Branch::ProjectIntake
    } else if lower.contains("just browsing") {
        Branch::Browsing
    } else if lower.contains("inquiries") {
        Branch::Inquiries
    } else {
        Branch::FreeText
    }
}

//! Engine configuration: gateway endpoint and scripted pacing.

use std::time::Duration;

/// Delays used to pace scripted bot replies.
///
/// Defaults match the widget's original pacing; tests shrink them so the
/// full script runs in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTiming {
    /// Delay before "Which service would you like to know more about?"
    pub service_prompt: Duration,
    /// Delay before "That's great! Could you tell me more about your project?"
    pub project_prompt: Duration,
    /// Delay before "Please let me know your question..."
    pub inquiry_prompt: Duration,
    /// Delay from browsing activation to the greeting
    pub browsing_greeting: Duration,
    /// Delay from browsing activation to the consent prompt
    pub consent_prompt: Duration,
    /// Delay before the reply to a consent choice (either answer)
    pub consent_reply: Duration,
    /// Per-character typing reveal tick
    pub reveal_tick: Duration,
}

impl Default for ScriptTiming {
    fn default() -> Self {
        Self {
            service_prompt: Duration::from_millis(200),
            project_prompt: Duration::from_millis(300),
            inquiry_prompt: Duration::from_millis(300),
            browsing_greeting: Duration::from_millis(400),
            consent_prompt: Duration::from_millis(2700),
            consent_reply: Duration::from_millis(300),
            reveal_tick: Duration::from_millis(20),
        }
    }
}

impl ScriptTiming {
    /// Uniformly scaled-down pacing for tests that drive the real scheduler.
    pub fn fast() -> Self {
        Self {
            service_prompt: Duration::from_millis(2),
            project_prompt: Duration::from_millis(3),
            inquiry_prompt: Duration::from_millis(3),
            browsing_greeting: Duration::from_millis(4),
            consent_prompt: Duration::from_millis(27),
            consent_reply: Duration::from_millis(3),
            reveal_tick: Duration::from_millis(1),
        }
    }
}

/// Engine configuration (immutable after spawn)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the outbound gateway, no trailing slash
    pub base_url: String,
    /// Timeout applied to each gateway request
    pub request_timeout: Duration,
    pub timing: ScriptTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            timing: ScriptTiming::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("CHATFLOW_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        let timeout_secs: u64 = std::env::var("CHATFLOW_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            timing: ScriptTiming::default(),
        }
    }
}

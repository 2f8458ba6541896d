use serde::{Deserialize, Serialize};

use crate::upload::UploadLimits;

/// Top-level client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    pub api: ApiConfig,
    pub upload: UploadLimits,
    pub timing: TimingConfig,
    pub greetings: Greetings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for every endpoint, without a trailing slash
    pub base_url: String,
    /// Send cookies so the backend can associate its session
    pub include_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            include_credentials: true,
        }
    }
}

impl ApiConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Minimum delay before a reply replaces the typing indicator
    pub reply_delay_ms: u64,
    /// How long a code block stays marked as copied
    pub copy_reset_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 800,
            copy_reset_ms: 2000,
        }
    }
}

/// Fixed assistant-authored texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greetings {
    pub welcome: String,
    pub welcome_fallback: String,
    pub cleared: String,
    pub cleared_fallback: String,
    pub send_failed: String,
    /// Used when a reply arrives without a `response` field
    pub empty_reply: String,
}

impl Default for Greetings {
    fn default() -> Self {
        Self {
            welcome: "Hello! I'm Nexus, your AI assistant. How can I help you today?".to_string(),
            welcome_fallback: "Welcome to Nexus! I'm here to help you with your questions."
                .to_string(),
            cleared: "Chat cleared. How can I help you?".to_string(),
            cleared_fallback: "Chat cleared. Ready for your next question.".to_string(),
            send_failed: "Sorry, I encountered an error. Please try again.".to_string(),
            empty_reply: "I couldn't process that request.".to_string(),
        }
    }
}

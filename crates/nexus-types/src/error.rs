use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Rejected locally; never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl ChatError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ChatError::Validation(_))
    }

    /// Network or backend failure
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Network(_) | ChatError::Backend { .. })
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}

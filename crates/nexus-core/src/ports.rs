//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `nexus-core` (pure Rust).
//! Implementations live in `nexus-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use nexus_types::{
    Result,
    upload::{FileUpload, UploadedFileRef},
};

use crate::history::HistoryEntry;

// ─── Transport Port ──────────────────────────────────────────

/// Outgoing chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub message: String,
    pub session_id: Option<String>,
    pub file_content: Option<String>,
}

/// Backend reply to a chat turn. Every field may be missing on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    pub response: Option<String>,
    pub subject_area: Option<String>,
    pub detected_language: Option<String>,
}

/// Request/response calls against the chat backend.
/// Implementations perform no retries; retry policy belongs to the caller.
#[async_trait(?Send)]
pub trait TransportPort {
    /// `POST /new-session`; returns the backend-issued session id
    async fn create_session(&self) -> Result<String>;

    /// `POST /chat`
    async fn send_message(&self, req: SendRequest) -> Result<ChatReply>;

    /// `POST /clear-session`
    async fn clear_session(&self, session_id: &str) -> Result<()>;

    /// `POST /files/upload` (multipart).
    /// Must reject disallowed types and oversize files before any I/O.
    async fn upload_file(
        &self,
        file: &FileUpload,
        session_id: Option<&str>,
    ) -> Result<UploadedFileRef>;

    /// `GET /history`
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>>;
}

// ─── Clipboard Port ──────────────────────────────────────────

#[async_trait(?Send)]
pub trait ClipboardPort {
    async fn write_text(&self, text: &str) -> Result<()>;
}

// ─── Timer Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    /// Resolve after `ms` milliseconds without blocking the event loop
    async fn sleep(&self, ms: u64);
}

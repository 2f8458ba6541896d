//! Backend wire format and the mapping from response bodies to results.
//!
//! Kept free of browser types so the decoding rules run natively in tests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use nexus_core::history::HistoryEntry;
use nexus_core::ports::ChatReply;
use nexus_types::{
    ChatError, Result,
    upload::{FileUpload, UploadedFileRef},
};

// ─── Requests ────────────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct ChatBody<'a> {
    pub message: &'a str,
    pub session_id: Option<&'a str>,
    pub file_content: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct ClearBody<'a> {
    pub session_id: &'a str,
}

// ─── Responses ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct NewSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub subject_area: Option<String>,
    #[serde(default)]
    pub detected_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub chat_history: Vec<HistoryEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// ─── Decoding ────────────────────────────────────────────────

/// `Backend` error for a non-2xx response, preferring the body's `error`
pub(crate) fn backend_error(status: u16, body: Option<ErrorBody>) -> ChatError {
    let message = match body {
        Some(ErrorBody { error: Some(error) }) if !error.is_empty() => error,
        _ => format!("Request failed with status {}", status),
    };
    ChatError::Backend { status, message }
}

pub(crate) fn decode_chat(data: ChatResponse) -> ChatReply {
    ChatReply {
        response: data.response,
        subject_area: data.subject_area,
        detected_language: data.detected_language,
    }
}

/// A 2xx upload body. `success: false` is still a backend failure; missing
/// name or type fall back to the local file.
pub(crate) fn decode_upload(
    status: u16,
    data: UploadResponse,
    file: &FileUpload,
    session_id: Option<&str>,
) -> Result<UploadedFileRef> {
    if !data.success {
        return Err(ChatError::Backend {
            status,
            message: data.error.unwrap_or_else(|| "Upload failed".to_string()),
        });
    }

    Ok(UploadedFileRef {
        filename: data.filename.unwrap_or_else(|| file.filename.clone()),
        file_type: data.file_type.unwrap_or_else(|| extension(&file.filename)),
        content: data.content,
        session_id: session_id.map(str::to_string),
    })
}

pub(crate) fn decode_history(status: u16, data: HistoryResponse) -> Result<Vec<HistoryEntry>> {
    if !data.success {
        return Err(ChatError::Backend {
            status,
            message: data
                .error
                .unwrap_or_else(|| "Failed to load history".to_string()),
        });
    }
    Ok(data.chat_history)
}

pub(crate) fn extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest attachment accepted locally: 16 MiB
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// A local file picked or dropped by the user, not yet uploaded
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Handle to an attachment the backend has processed.
/// Consumed at most once by the next outgoing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFileRef {
    pub filename: String,
    pub file_type: String,
    /// Backend-normalised extraction result, opaque to the client
    pub content: Value,
    /// Session the file was uploaded under
    #[serde(default)]
    pub session_id: Option<String>,
}

impl UploadedFileRef {
    /// Text forwarded to the backend as `file_content`:
    /// the extracted text, else the summary, else the raw JSON.
    pub fn digest(&self) -> String {
        if let Some(text) = self.content.get("text_content").and_then(Value::as_str) {
            return text.to_string();
        }
        if let Some(summary) = self.content.get("summary").and_then(Value::as_str) {
            return summary.to_string();
        }
        match &self.content {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Content of the synthetic user message documenting the attachment
    pub fn annotation(&self) -> String {
        format!("📎 Uploaded: {} ({})", self.filename, self.file_type)
    }

    /// Draft text suggested once the upload lands
    pub fn draft_prompt(&self) -> String {
        format!(
            "I've uploaded a {} file named \"{}\". ",
            self.file_type.to_uppercase(),
            self.filename
        )
    }
}

/// Local allow-list and size ceiling applied before any network call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    pub max_bytes: u64,
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl UploadLimits {
    pub fn allows_mime(&self, mime: &str) -> bool {
        self.allowed_mime_types.iter().any(|m| m == mime)
    }
}

const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.ms-powerpoint",
    "text/plain",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/tiff",
    "image/webp",
];

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::upload::UploadedFileRef;

/// Subject tag assumed when the backend does not classify a reply.
pub const DEFAULT_SUBJECT: &str = "general";

/// Author of a conversational turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Opaque message identifier, `<kind>-<uuid>`.
///
/// Unique within a session. Ordering of the log is positional, so the id
/// carries no ordering information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(kind: &str) -> Self {
        Self(format!("{}-{}", kind, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `<kind>` prefix this id was minted with
    pub fn kind(&self) -> &str {
        self.0.split('-').next().unwrap_or("")
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attachment details kept on the synthetic "uploaded" user message.
/// Only the textual description survives; extracted content does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub filename: String,
    pub file_type: String,
}

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// RFC 3339 capture time, display-only
    pub created_at: String,
    /// Assistant only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject_area: Option<String>,
    /// Assistant only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detected_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attachment: Option<AttachmentInfo>,
}

impl Message {
    fn build(kind: &str, role: Role, content: String) -> Self {
        Self {
            id: MessageId::new(kind),
            role,
            content,
            created_at: chrono::Utc::now().to_rfc3339(),
            subject_area: None,
            detected_language: None,
            attachment: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::build("user", Role::User, text.into())
    }

    /// The synthetic user turn announcing an attachment
    pub fn attachment(file: &UploadedFileRef) -> Self {
        let mut msg = Self::build("file", Role::User, file.annotation());
        msg.attachment = Some(AttachmentInfo {
            filename: file.filename.clone(),
            file_type: file.file_type.clone(),
        });
        msg
    }

    pub fn assistant(
        text: impl Into<String>,
        subject_area: Option<String>,
        detected_language: Option<String>,
    ) -> Self {
        let mut msg = Self::build("bot", Role::Assistant, text.into());
        msg.subject_area = Some(subject_area.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()));
        msg.detected_language = detected_language;
        msg
    }

    /// Locally authored assistant text (greetings, error notices).
    /// `kind` becomes the id prefix, e.g. `"welcome"` or `"error"`.
    pub fn notice(kind: &str, text: impl Into<String>) -> Self {
        let mut msg = Self::build(kind, Role::Assistant, text.into());
        msg.subject_area = Some(DEFAULT_SUBJECT.to_string());
        msg
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// Subject tag with the `"general"` default applied
    pub fn subject_area(&self) -> &str {
        self.subject_area.as_deref().unwrap_or(DEFAULT_SUBJECT)
    }
}

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Notifications emitted by the session orchestrator and clipboard tracker.
/// The view drains these each frame to trigger repaints and show notices;
/// the orchestrator's state remains the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A backend session is active
    SessionOpened { session_id: String },

    /// Session creation failed; running without a session id
    SessionDegraded { reason: String },

    /// A message was appended to the log
    MessageAppended { message: Message },

    /// The log was replaced by a single greeting
    LogReset { greeting: Message },

    /// Loading/typing flags changed (always in lock-step)
    TypingChanged { typing: bool },

    /// An attachment is ready to go out with the next message
    UploadAccepted { filename: String, file_type: String },

    /// An attachment was refused, locally or by the backend
    UploadRejected { reason: String },

    /// Writing to the system clipboard failed
    CopyFailed { reason: String },
}

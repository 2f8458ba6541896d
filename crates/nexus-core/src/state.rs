//! Conversation state as a pure reducer.
//!
//! `ChatState::reduce` folds one [`ChatAction`] into the state and returns the
//! side effect, if any, that the driver must perform. Nothing here awaits or
//! performs I/O, so every transition is testable on its own.
//!
//! Two lifecycles run side by side. The session one:
//! ```text
//! Uninitialized --Mount--> Opening(Mount) --SessionCreated/Failed--> Open
//! any --Clear--> Opening(Clear) --SessionCreated/Failed--> Open
//! ```
//! and the send one, which only gates on a reply being outstanding:
//! ```text
//! ready --Submit--> sending --ReplyReceived/ReplyFailed--> ready
//! ```
//! A send made while a session is still opening goes out with whatever
//! session id is current (possibly none). When the session settles, only the
//! greeting at the head of the log is swapped; the user's messages stay.
//!
//! Every in-flight request is tagged with the epoch current when it was
//! issued. `Clear` bumps the epoch, so results from a superseded session are
//! dropped instead of landing in the new conversation.

use nexus_types::{
    ChatError, Result,
    config::Greetings,
    message::Message,
    upload::UploadedFileRef,
};

use crate::ports::{ChatReply, SendRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReason {
    Mount,
    Clear,
}

/// Combined view of both lifecycles; a pending reply takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Opening(OpenReason),
    Idle,
    Sending { epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Uninitialized,
    Opening(OpenReason),
    Open,
}

/// Message id kinds used for the greeting at the head of the log
const GREETING_KINDS: [&str; 2] = ["welcome", "cleared"];

#[derive(Debug, Clone)]
pub enum ChatAction {
    Mount,
    SessionCreated { epoch: u64, session_id: String },
    SessionFailed { epoch: u64 },
    SetInput(String),
    Submit { text: String },
    ReplyReceived { epoch: u64, reply: ChatReply },
    ReplyFailed { epoch: u64 },
    Clear,
    UploadAccepted(UploadedFileRef),
    DiscardUpload,
}

/// Work the driver performs on the reducer's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CreateSession { epoch: u64 },
    Dispatch(OutboundMessage),
    /// Notify the backend (if there was a session), then open a new one
    ClearSession { previous: Option<String>, epoch: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub epoch: u64,
    pub request: SendRequest,
}

#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<Message>,
    session_id: Option<String>,
    pending_input: String,
    is_loading: bool,
    is_typing: bool,
    pending_upload: Option<UploadedFileRef>,
    session: Session,
    sending: bool,
    epoch: u64,
    greetings: Greetings,
}

impl ChatState {
    pub fn new(greetings: Greetings) -> Self {
        Self {
            messages: Vec::new(),
            session_id: None,
            pending_input: String::new(),
            is_loading: false,
            is_typing: false,
            pending_upload: None,
            session: Session::Uninitialized,
            sending: false,
            epoch: 0,
            greetings,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn pending_upload(&self) -> Option<&UploadedFileRef> {
        self.pending_upload.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.sending {
            return Phase::Sending { epoch: self.epoch };
        }
        match self.session {
            Session::Uninitialized => Phase::Uninitialized,
            Session::Opening(reason) => Phase::Opening(reason),
            Session::Open => Phase::Idle,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether `Submit` would currently be accepted for a non-empty draft
    pub fn can_send(&self) -> bool {
        !self.sending
    }

    pub fn reduce(&mut self, action: ChatAction) -> Result<Option<Effect>> {
        match action {
            ChatAction::Mount => {
                if self.session != Session::Uninitialized {
                    return Ok(None);
                }
                self.session = Session::Opening(OpenReason::Mount);
                Ok(Some(Effect::CreateSession { epoch: self.epoch }))
            }

            ChatAction::SessionCreated { epoch, session_id } => {
                let Some(reason) = self.opening(epoch) else {
                    return Ok(None);
                };
                self.session_id = Some(session_id);
                if reason == OpenReason::Mount {
                    self.install_greeting(Message::notice("welcome", &self.greetings.welcome));
                }
                self.session = Session::Open;
                Ok(None)
            }

            ChatAction::SessionFailed { epoch } => {
                let Some(reason) = self.opening(epoch) else {
                    return Ok(None);
                };
                self.session_id = None;
                let greeting = match reason {
                    OpenReason::Mount => Message::notice("welcome", &self.greetings.welcome_fallback),
                    OpenReason::Clear => Message::notice("cleared", &self.greetings.cleared_fallback),
                };
                self.install_greeting(greeting);
                self.session = Session::Open;
                Ok(None)
            }

            ChatAction::SetInput(text) => {
                self.pending_input = text;
                Ok(None)
            }

            ChatAction::Submit { text } => self.submit(text),

            ChatAction::ReplyReceived { epoch, reply } => {
                if !self.awaiting(epoch) {
                    return Ok(None);
                }
                let content = reply
                    .response
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| self.greetings.empty_reply.clone());
                self.messages.push(Message::assistant(
                    content,
                    reply.subject_area,
                    reply.detected_language,
                ));
                self.settle();
                Ok(None)
            }

            ChatAction::ReplyFailed { epoch } => {
                if !self.awaiting(epoch) {
                    return Ok(None);
                }
                self.messages
                    .push(Message::notice("error", &self.greetings.send_failed));
                self.settle();
                Ok(None)
            }

            ChatAction::Clear => {
                let previous = self.session_id.take();
                self.epoch += 1;
                self.reset_log(Message::notice("cleared", &self.greetings.cleared));
                self.is_loading = false;
                self.is_typing = false;
                self.pending_upload = None;
                self.sending = false;
                self.session = Session::Opening(OpenReason::Clear);
                Ok(Some(Effect::ClearSession {
                    previous,
                    epoch: self.epoch,
                }))
            }

            ChatAction::UploadAccepted(file) => {
                if file.session_id.is_some() && file.session_id != self.session_id {
                    return Err(ChatError::Validation(
                        "Attachment belongs to a previous conversation".to_string(),
                    ));
                }
                if self.pending_input.trim().is_empty() {
                    self.pending_input = file.draft_prompt();
                }
                self.pending_upload = Some(file);
                Ok(None)
            }

            ChatAction::DiscardUpload => {
                self.pending_upload = None;
                self.pending_input.clear();
                Ok(None)
            }
        }
    }

    fn submit(&mut self, text: String) -> Result<Option<Effect>> {
        if self.sending {
            return Err(ChatError::Validation(
                "A reply is still pending".to_string(),
            ));
        }
        if text.trim().is_empty() && self.pending_upload.is_none() {
            return Err(ChatError::Validation("Message is empty".to_string()));
        }

        let upload = self.pending_upload.take();
        if let Some(file) = &upload {
            self.messages.push(Message::attachment(file));
        }
        self.messages.push(Message::user(text.clone()));
        self.pending_input.clear();
        self.is_loading = true;
        self.is_typing = true;
        self.sending = true;

        Ok(Some(Effect::Dispatch(OutboundMessage {
            epoch: self.epoch,
            request: SendRequest {
                message: text,
                session_id: self.session_id.clone(),
                file_content: upload.map(|f| f.digest()),
            },
        })))
    }

    /// The reason we are opening a session, if `epoch` is the live one
    fn opening(&self, epoch: u64) -> Option<OpenReason> {
        match self.session {
            Session::Opening(reason) if epoch == self.epoch => Some(reason),
            _ => None,
        }
    }

    fn awaiting(&self, epoch: u64) -> bool {
        self.sending && epoch == self.epoch
    }

    fn settle(&mut self) {
        self.is_loading = false;
        self.is_typing = false;
        self.sending = false;
    }

    /// Put `greeting` at the head of the log, replacing the current greeting
    /// if there is one. Anything sent meanwhile is kept after it.
    fn install_greeting(&mut self, greeting: Message) {
        let has_greeting = self
            .messages
            .first()
            .is_some_and(|m| GREETING_KINDS.contains(&m.id.kind()));
        if has_greeting {
            self.messages[0] = greeting;
        } else {
            self.messages.insert(0, greeting);
        }
    }

    fn reset_log(&mut self, greeting: Message) {
        self.messages.clear();
        self.messages.push(greeting);
    }
}

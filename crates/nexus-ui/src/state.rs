//! View state that is not part of the conversation itself.
//!
//! The conversation (messages, input buffer, loading flags) lives in
//! `ChatOrchestrator` and is read from a snapshot each frame. This holds
//! everything else: theme, sidebar, history list and transient notices,
//! updated each frame by draining the EventBus.

use chrono::{DateTime, NaiveDate, Utc};

use nexus_core::history::{self, DateGroup, HistoryEntry};
use nexus_types::event::ChatEvent;
use nexus_types::message::Message;

use crate::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line banner above the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

pub struct Suggestion {
    pub icon: &'static str,
    pub text: &'static str,
    pub category: &'static str,
}

pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        icon: "💻",
        text: "Help me with Python code",
        category: "Programming",
    },
    Suggestion {
        icon: "📊",
        text: "Solve a math problem",
        category: "Mathematics",
    },
    Suggestion {
        icon: "🔬",
        text: "Explain a science concept",
        category: "Science",
    },
    Suggestion {
        icon: "📚",
        text: "Analyze literature",
        category: "Literature",
    },
    Suggestion {
        icon: "📎",
        text: "Analyze my uploaded file",
        category: "File Analysis",
    },
    Suggestion {
        icon: "🌐",
        text: "Ask in Hindi/हिंदी",
        category: "Language",
    },
];

pub struct UiState {
    pub theme: ThemeMode,
    pub sidebar_open: bool,
    pub search_term: String,
    /// Past conversations, most recent first
    pub history: Vec<HistoryEntry>,
    /// Session id of the conversation on screen
    pub current_chat_id: Option<String>,
    pub show_suggestions: bool,
    /// Mirror of the orchestrator's input buffer, edited by the input field
    pub input_text: String,
    pub notice: Option<Notice>,
    pub status_text: String,
    /// No backend session; sends go out without an id
    pub offline: bool,
    /// The log changed since the history entry was last refreshed
    pub history_dirty: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            theme: ThemeMode::default(),
            sidebar_open: true,
            search_term: String::new(),
            history: Vec::new(),
            current_chat_id: None,
            show_suggestions: true,
            input_text: String::new(),
            notice: None,
            status_text: "Connecting...".to_string(),
            offline: false,
            history_dirty: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SessionOpened { session_id } => {
                    self.current_chat_id = Some(session_id);
                    self.offline = false;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::SessionDegraded { reason } => {
                    self.current_chat_id = None;
                    self.offline = true;
                    self.status_text = "Offline".to_string();
                    self.notice = Some(Notice::error(format!(
                        "Could not reach the server: {}",
                        reason
                    )));
                }
                ChatEvent::LogReset { .. } => {
                    self.show_suggestions = true;
                    self.history_dirty = false;
                }
                ChatEvent::MessageAppended { message } => {
                    if message.is_user() {
                        self.show_suggestions = false;
                    }
                    self.history_dirty = true;
                }
                ChatEvent::TypingChanged { typing } => {
                    self.status_text = if typing {
                        "Nexus is typing...".to_string()
                    } else if self.offline {
                        "Offline".to_string()
                    } else {
                        "Ready".to_string()
                    };
                }
                ChatEvent::UploadAccepted { filename, file_type } => {
                    self.notice = Some(Notice::info(format!(
                        "📎 {} ({}) attached",
                        filename, file_type
                    )));
                }
                ChatEvent::UploadRejected { reason } => {
                    self.notice = Some(Notice::error(reason));
                }
                ChatEvent::CopyFailed { reason } => {
                    self.notice = Some(Notice::error(format!("Copy failed: {}", reason)));
                }
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn pick_suggestion(&mut self, suggestion: &Suggestion) {
        self.input_text = suggestion.text.to_string();
        self.show_suggestions = false;
    }

    /// Refresh the sidebar entry for the live conversation if it changed
    pub fn record_conversation(
        &mut self,
        session_id: &str,
        messages: &[Message],
        now: DateTime<Utc>,
    ) {
        if !self.history_dirty {
            return;
        }
        self.history_dirty = false;
        if let Some(entry) = HistoryEntry::from_conversation(session_id, messages, now) {
            history::upsert(&mut self.history, entry);
            self.current_chat_id = Some(session_id.to_string());
        }
    }

    /// Fold entries fetched from the backend into the list, keeping their order
    pub fn merge_history(&mut self, entries: Vec<HistoryEntry>) {
        for entry in entries.into_iter().rev() {
            history::upsert(&mut self.history, entry);
        }
    }

    pub fn select_chat(&mut self, id: &str) -> bool {
        if !self.history.iter().any(|e| e.id == id) {
            return false;
        }
        self.current_chat_id = Some(id.to_string());
        self.show_suggestions = false;
        true
    }

    /// Drop a sidebar entry. Returns true when it was the conversation on
    /// screen, in which case the caller starts a new chat.
    pub fn delete_chat(&mut self, id: &str) -> bool {
        history::remove(&mut self.history, id) && self.current_chat_id.as_deref() == Some(id)
    }

    pub fn visible_history(&self) -> Vec<&HistoryEntry> {
        history::filter(&self.history, self.search_term.trim())
    }

    pub fn grouped_history(&self, today: NaiveDate) -> Vec<(DateGroup, Vec<&HistoryEntry>)> {
        history::group_by_date(&self.visible_history(), today)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

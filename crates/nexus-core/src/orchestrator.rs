//! Session orchestrator: drives [`ChatState`] against the transport.
//!
//! Every user operation first folds an action into the reducer (so optimistic
//! updates such as the user's own message land synchronously), then performs
//! the returned effect and folds the outcome back in. The `RefCell` borrow is
//! always released before awaiting, so the view can read the state while a
//! request is in flight.
//!
//! Single-threaded: futures returned here are meant for
//! `wasm_bindgen_futures::spawn_local`.

use std::cell::RefCell;
use std::rc::Rc;

use nexus_types::{
    Result,
    config::ChatConfig,
    event::ChatEvent,
    message::MessageId,
    upload::{FileUpload, UploadedFileRef},
};

use crate::event_bus::EventBus;
use crate::history::HistoryEntry;
use crate::ports::{TimerPort, TransportPort};
use crate::state::{ChatAction, ChatState, Effect, OutboundMessage};
use crate::upload::validate_upload;

/// Clone-cheap handle; clones drive the same conversation.
#[derive(Clone)]
pub struct ChatOrchestrator {
    state: Rc<RefCell<ChatState>>,
    transport: Rc<dyn TransportPort>,
    timer: Rc<dyn TimerPort>,
    event_bus: EventBus,
    config: Rc<ChatConfig>,
}

impl ChatOrchestrator {
    pub fn new(
        config: ChatConfig,
        transport: Rc<dyn TransportPort>,
        timer: Rc<dyn TimerPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(ChatState::new(config.greetings.clone()))),
            transport,
            timer,
            event_bus,
            config: Rc::new(config),
        }
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Open the first session. Later calls are no-ops.
    pub async fn start(&self) {
        if let Some(effect) = self.settle(ChatAction::Mount) {
            self.run(effect).await;
        }
    }

    /// Append `text` (and the pending attachment, if any) to the log and ask
    /// the backend for a reply. Resolves once the reply or the error notice
    /// has been appended.
    ///
    /// Rejected with `Validation` and no state change while a reply is
    /// pending or when there is neither text nor attachment. A session that
    /// is still opening does not block the send; it goes out with the
    /// current session id, if any.
    pub async fn send(&self, text: impl Into<String>) -> Result<()> {
        let effect = self.apply(ChatAction::Submit { text: text.into() })?;
        if let Some(effect) = effect {
            self.run(effect).await;
        }
        Ok(())
    }

    /// Send whatever is in the input buffer
    pub async fn submit(&self) -> Result<()> {
        let text = self.state.borrow().pending_input().to_string();
        self.send(text).await
    }

    /// Start over: notify the backend, reset the log to a single greeting,
    /// and open a replacement session. Never fails; backend failures degrade
    /// to a session-less conversation.
    pub async fn clear(&self) {
        if let Some(effect) = self.settle(ChatAction::Clear) {
            self.run(effect).await;
        }
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.settle(ChatAction::SetInput(text.into()));
    }

    pub fn discard_upload(&self) {
        self.settle(ChatAction::DiscardUpload);
    }

    /// Validate locally, upload, and hold the result for the next send.
    /// Nothing is appended to the log until that send.
    pub async fn upload(&self, file: FileUpload) -> Result<UploadedFileRef> {
        if let Err(e) = validate_upload(&file, &self.config.upload) {
            log::warn!("Upload of {} rejected locally: {}", file.filename, e);
            self.event_bus.emit(ChatEvent::UploadRejected {
                reason: e.to_string(),
            });
            return Err(e);
        }

        let session_id = self.state.borrow().session_id().map(str::to_string);
        let uploaded = match self
            .transport
            .upload_file(&file, session_id.as_deref())
            .await
        {
            Ok(mut uploaded) => {
                if uploaded.session_id.is_none() {
                    uploaded.session_id = session_id;
                }
                uploaded
            }
            Err(e) => {
                log::warn!("Upload of {} failed: {}", file.filename, e);
                self.event_bus.emit(ChatEvent::UploadRejected {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        if let Err(e) = self.apply(ChatAction::UploadAccepted(uploaded.clone())) {
            log::warn!("Dropping upload of {}: {}", uploaded.filename, e);
            self.event_bus.emit(ChatEvent::UploadRejected {
                reason: e.to_string(),
            });
            return Err(e);
        }
        log::info!("Attachment ready: {} ({})", uploaded.filename, uploaded.file_type);
        self.event_bus.emit(ChatEvent::UploadAccepted {
            filename: uploaded.filename.clone(),
            file_type: uploaded.file_type.clone(),
        });
        Ok(uploaded)
    }

    /// Past conversations for the sidebar
    pub async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        self.transport.fetch_history().await.map_err(|e| {
            log::warn!("Failed to fetch chat history: {}", e);
            e
        })
    }

    async fn run(&self, effect: Effect) {
        match effect {
            Effect::CreateSession { epoch } => self.open_session(epoch).await,
            Effect::ClearSession { previous, epoch } => {
                if let Some(id) = previous {
                    match self.transport.clear_session(&id).await {
                        Ok(()) => log::info!("Session {} cleared", id),
                        Err(e) => log::warn!("Failed to clear session {}: {}", id, e),
                    }
                }
                self.open_session(epoch).await;
            }
            Effect::Dispatch(outbound) => self.dispatch(outbound).await,
        }
    }

    async fn open_session(&self, epoch: u64) {
        match self.transport.create_session().await {
            Ok(session_id) => {
                log::info!("Session {} created", session_id);
                self.settle(ChatAction::SessionCreated { epoch, session_id });
            }
            Err(e) => {
                log::warn!("Session creation failed, continuing without one: {}", e);
                self.event_bus.emit(ChatEvent::SessionDegraded {
                    reason: e.to_string(),
                });
                self.settle(ChatAction::SessionFailed { epoch });
            }
        }
    }

    async fn dispatch(&self, outbound: OutboundMessage) {
        let epoch = outbound.epoch;
        log::debug!(
            "Sending message ({} chars, attachment: {})",
            outbound.request.message.len(),
            outbound.request.file_content.is_some()
        );
        match self.transport.send_message(outbound.request).await {
            Ok(reply) => {
                self.timer.sleep(self.config.timing.reply_delay_ms).await;
                self.settle(ChatAction::ReplyReceived { epoch, reply });
            }
            Err(e) => {
                log::error!("Chat request failed: {}", e);
                self.settle(ChatAction::ReplyFailed { epoch });
            }
        }
    }

    /// Apply an action the caller cannot get wrong; errors are only logged.
    fn settle(&self, action: ChatAction) -> Option<Effect> {
        match self.apply(action) {
            Ok(effect) => effect,
            Err(e) => {
                log::debug!("Action ignored: {}", e);
                None
            }
        }
    }

    /// Reduce `action` and publish what changed on the event bus.
    fn apply(&self, action: ChatAction) -> Result<Option<Effect>> {
        let (effect, events) = {
            let mut state = self.state.borrow_mut();
            let before = Observed::of(&state);
            let effect = state.reduce(action)?;
            (effect, before.changes(&state))
        };
        for event in events {
            self.event_bus.emit(event);
        }
        Ok(effect)
    }
}

/// The parts of the state the view is notified about
struct Observed {
    len: usize,
    first: Option<MessageId>,
    typing: bool,
    session_id: Option<String>,
}

impl Observed {
    fn of(state: &ChatState) -> Self {
        Self {
            len: state.messages().len(),
            first: state.messages().first().map(|m| m.id.clone()),
            typing: state.is_typing(),
            session_id: state.session_id().map(str::to_string),
        }
    }

    fn changes(&self, state: &ChatState) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        let messages = state.messages();

        if messages.first().map(|m| &m.id) != self.first.as_ref() {
            if let Some(greeting) = messages.first() {
                events.push(ChatEvent::LogReset {
                    greeting: greeting.clone(),
                });
            }
        } else {
            for message in messages.iter().skip(self.len) {
                events.push(ChatEvent::MessageAppended {
                    message: message.clone(),
                });
            }
        }

        if state.is_typing() != self.typing {
            events.push(ChatEvent::TypingChanged {
                typing: state.is_typing(),
            });
        }

        if let Some(id) = state.session_id() {
            if self.session_id.as_deref() != Some(id) {
                events.push(ChatEvent::SessionOpened {
                    session_id: id.to_string(),
                });
            }
        }

        events
    }
}

//! WASM-target tests for nexus-core.
//!
//! Runs the markup parser, clipboard tracker, reducer and orchestrator under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use nexus_core::clipboard::ClipboardTracker;
use nexus_core::event_bus::EventBus;
use nexus_core::history::HistoryEntry;
use nexus_core::markup::parse;
use nexus_core::ports::*;
use nexus_core::upload::validate_upload;
use nexus_core::{ChatAction, ChatOrchestrator, ChatState, Phase};
use nexus_types::block::DisplayBlock;
use nexus_types::config::{ChatConfig, Greetings};
use nexus_types::error::ChatError;
use nexus_types::event::ChatEvent;
use nexus_types::message::Role;
use nexus_types::upload::*;

use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

// ─── Markup Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn markup_mixed_reply() {
    let blocks = parse("## Title\n- a\n- \n```py\nx=1\n```");
    assert_eq!(
        blocks,
        vec![
            DisplayBlock::header("Title"),
            DisplayBlock::bullet("a"),
            DisplayBlock::code("py", "x=1"),
        ]
    );
}

#[wasm_bindgen_test]
fn markup_emoji_header_and_spacer() {
    let blocks = parse("💡 Tip\n\nplain");
    assert_eq!(
        blocks,
        vec![
            DisplayBlock::header("💡 Tip"),
            DisplayBlock::Spacer,
            DisplayBlock::paragraph("plain"),
        ]
    );
}

#[wasm_bindgen_test]
fn markup_unterminated_fence_dropped() {
    assert!(parse("```rust\nfn main() {}").is_empty());
}

// ─── Upload Validation Tests ─────────────────────────────

#[wasm_bindgen_test]
fn upload_rejects_executable() {
    let file = FileUpload::new("setup.exe", "application/x-msdownload", vec![0; 4]);
    assert!(validate_upload(&file, &UploadLimits::default()).is_err());
}

#[wasm_bindgen_test]
fn upload_accepts_image() {
    let file = FileUpload::new("chart.png", "image/png", vec![0; 4]);
    assert!(validate_upload(&file, &UploadLimits::default()).is_ok());
}

// ─── ChatState Tests ─────────────────────────────────────

#[wasm_bindgen_test]
fn state_mount_then_session() {
    let mut state = ChatState::new(Greetings::default());
    state.reduce(ChatAction::Mount).unwrap();
    state
        .reduce(ChatAction::SessionCreated {
            epoch: 0,
            session_id: "s1".to_string(),
        })
        .unwrap();
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.messages().len(), 1);
}

// ─── Mocks ───────────────────────────────────────────────

struct MockTransport {
    fail_chat: bool,
    sent: RefCell<Vec<SendRequest>>,
}

impl MockTransport {
    fn new(fail_chat: bool) -> Self {
        Self {
            fail_chat,
            sent: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl TransportPort for MockTransport {
    async fn create_session(&self) -> nexus_types::Result<String> {
        Ok("wasm-session".to_string())
    }

    async fn send_message(&self, req: SendRequest) -> nexus_types::Result<ChatReply> {
        self.sent.borrow_mut().push(req);
        if self.fail_chat {
            return Err(ChatError::Network("offline".to_string()));
        }
        Ok(ChatReply {
            response: Some("4".to_string()),
            subject_area: Some("mathematics".to_string()),
            detected_language: None,
        })
    }

    async fn clear_session(&self, _session_id: &str) -> nexus_types::Result<()> {
        Ok(())
    }

    async fn upload_file(
        &self,
        file: &FileUpload,
        session_id: Option<&str>,
    ) -> nexus_types::Result<UploadedFileRef> {
        Ok(UploadedFileRef {
            filename: file.filename.clone(),
            file_type: "txt".to_string(),
            content: serde_json::json!({"text_content": "hello"}),
            session_id: session_id.map(str::to_string),
        })
    }

    async fn fetch_history(&self) -> nexus_types::Result<Vec<HistoryEntry>> {
        Ok(Vec::new())
    }
}

struct NoDelay;

#[async_trait(?Send)]
impl TimerPort for NoDelay {
    async fn sleep(&self, _ms: u64) {}
}

struct DeniedClipboard;

#[async_trait(?Send)]
impl ClipboardPort for DeniedClipboard {
    async fn write_text(&self, _text: &str) -> nexus_types::Result<()> {
        Err(ChatError::Clipboard("denied".to_string()))
    }
}

fn orchestrator(fail_chat: bool) -> (ChatOrchestrator, Rc<MockTransport>, EventBus) {
    let transport = Rc::new(MockTransport::new(fail_chat));
    let bus = EventBus::new();
    let orch = ChatOrchestrator::new(
        ChatConfig::default(),
        transport.clone(),
        Rc::new(NoDelay),
        bus.clone(),
    );
    (orch, transport, bus)
}

// ─── Orchestrator Tests (async) ──────────────────────────

#[wasm_bindgen_test]
async fn orchestrator_send_round_trip() {
    let (orch, transport, _bus) = orchestrator(false);
    orch.start().await;
    orch.send("2+2?").await.unwrap();

    let snapshot = orch.snapshot();
    assert_eq!(snapshot.messages().len(), 3);
    assert_eq!(snapshot.messages()[1].role, Role::User);
    assert_eq!(snapshot.messages()[2].content, "4");
    assert_eq!(snapshot.messages()[2].subject_area(), "mathematics");
    assert_eq!(
        transport.sent.borrow()[0].session_id.as_deref(),
        Some("wasm-session")
    );
}

#[wasm_bindgen_test]
async fn orchestrator_send_failure() {
    let (orch, _transport, _bus) = orchestrator(true);
    orch.start().await;
    orch.send("hi").await.unwrap();

    let snapshot = orch.snapshot();
    assert_eq!(snapshot.messages().len(), 3);
    assert_eq!(snapshot.messages()[2].content, Greetings::default().send_failed);
    assert!(!snapshot.is_loading());
}

#[wasm_bindgen_test]
async fn orchestrator_clear() {
    let (orch, _transport, _bus) = orchestrator(false);
    orch.start().await;
    orch.send("hi").await.unwrap();
    orch.clear().await;
    assert_eq!(orch.with_state(|s| s.messages().len()), 1);
}

#[wasm_bindgen_test]
async fn orchestrator_upload_attaches_to_next_send() {
    let (orch, transport, _bus) = orchestrator(false);
    orch.start().await;
    orch.upload(FileUpload::new("a.txt", "text/plain", b"hello".to_vec()))
        .await
        .unwrap();
    orch.submit().await.unwrap();
    assert_eq!(
        transport.sent.borrow()[0].file_content.as_deref(),
        Some("hello")
    );
}

#[wasm_bindgen_test]
async fn clipboard_denied_emits_copy_failed() {
    let bus = EventBus::new();
    let tracker = ClipboardTracker::new(Rc::new(DeniedClipboard), Rc::new(NoDelay), bus.clone(), 2000);
    assert!(tracker.copy("x").await.is_err());
    assert!(tracker.copied().is_none());
    assert!(bus
        .drain()
        .iter()
        .any(|e| matches!(e, ChatEvent::CopyFailed { .. })));
}

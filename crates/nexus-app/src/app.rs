//! Main egui application: composes the panels and drives the orchestrator.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use chrono::{Local, Utc};
use egui::{self, CentralPanel, SidePanel};

use nexus_core::clipboard::ClipboardTracker;
use nexus_core::event_bus::EventBus;
use nexus_core::history::HistoryEntry;
use nexus_core::ports::TimerPort;
use nexus_core::ChatOrchestrator;
use nexus_platform::{BrowserClipboard, BrowserTimer, HttpTransport};
use nexus_types::config::ChatConfig;
use nexus_types::upload::FileUpload;
use nexus_ui::panels::{chat_panel, sidebar_panel, ChatPanelAction, SidebarAction};
use nexus_ui::state::UiState;
use nexus_ui::theme::{self, ThemeMode};

/// Served next to index.html; covers Devanagari for Hindi replies
const FALLBACK_FONT_URL: &str = "NotoSansDevanagari-Regular.ttf";

pub struct NexusApp {
    ui_state: UiState,
    orchestrator: ChatOrchestrator,
    clipboard: ClipboardTracker,
    event_bus: EventBus,
    /// Filled by the async history fetch, drained on the next frame
    fetched_history: Rc<RefCell<Option<Vec<HistoryEntry>>>>,
    applied_theme: Option<ThemeMode>,
    first_frame: bool,
}

impl NexusApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ChatConfig::default();
        let event_bus = EventBus::new();

        let transport = Rc::new(HttpTransport::new(
            config.api.clone(),
            config.upload.clone(),
        ));
        let timer: Rc<dyn TimerPort> = Rc::new(BrowserTimer::new());
        let clipboard = ClipboardTracker::new(
            Rc::new(BrowserClipboard::new()),
            timer.clone(),
            event_bus.clone(),
            config.timing.copy_reset_ms,
        );
        let orchestrator = ChatOrchestrator::new(config, transport, timer, event_bus.clone());

        Self {
            ui_state: UiState::new(),
            orchestrator,
            clipboard,
            event_bus,
            fetched_history: Rc::new(RefCell::new(None)),
            applied_theme: None,
            first_frame: true,
        }
    }

    /// Run `task` on the browser event loop and repaint when it finishes
    fn spawn<F>(ctx: &egui::Context, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            task.await;
            ctx.request_repaint();
        });
    }

    fn start(&self, ctx: &egui::Context) {
        let orchestrator = self.orchestrator.clone();
        Self::spawn(ctx, async move { orchestrator.start().await });

        let orchestrator = self.orchestrator.clone();
        let slot = self.fetched_history.clone();
        Self::spawn(ctx, async move {
            if let Ok(entries) = orchestrator.load_history().await {
                log::info!("Loaded {} past conversations", entries.len());
                *slot.borrow_mut() = Some(entries);
            }
        });
    }

    fn send(&self, ctx: &egui::Context) {
        let orchestrator = self.orchestrator.clone();
        Self::spawn(ctx, async move {
            if let Err(e) = orchestrator.submit().await {
                log::debug!("Send ignored: {}", e);
            }
        });
    }

    fn new_chat(&mut self, ctx: &egui::Context) {
        self.ui_state.current_chat_id = None;
        let orchestrator = self.orchestrator.clone();
        Self::spawn(ctx, async move { orchestrator.clear().await });
    }

    fn copy(&self, ctx: &egui::Context, code: String) {
        let clipboard = self.clipboard.clone();
        Self::spawn(ctx, async move {
            // failures are surfaced through CopyFailed on the event bus
            let _ = clipboard.copy(&code).await;
        });
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn upload(&self, ctx: &egui::Context, file: FileUpload) {
        let orchestrator = self.orchestrator.clone();
        Self::spawn(ctx, async move {
            // rejections are surfaced through UploadRejected on the event bus
            let _ = orchestrator.upload(file).await;
        });
    }

    fn handle_dropped_files(&self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let Some(bytes) = file.bytes else {
                log::warn!("Dropped file {} has no contents", file.name);
                continue;
            };
            self.upload(ctx, FileUpload::new(file.name, file.mime, bytes.to_vec()));
        }
    }

    /// Fetch a font with Devanagari glyphs and add it as a fallback
    fn load_fallback_font(ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let resp = match wasm_bindgen_futures::JsFuture::from(
                window.fetch_with_str(FALLBACK_FONT_URL),
            )
            .await
            {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Failed to fetch fallback font: {:?}", e);
                    return;
                }
            };
            let resp: web_sys::Response = resp.into();
            if !resp.ok() {
                log::warn!("Fallback font unavailable: HTTP {}", resp.status());
                return;
            }
            let buf = match resp.array_buffer() {
                Ok(p) => match wasm_bindgen_futures::JsFuture::from(p).await {
                    Ok(b) => b,
                    Err(_) => return,
                },
                Err(_) => return,
            };
            let bytes = js_sys::Uint8Array::new(&buf).to_vec();

            let mut fonts = egui::FontDefinitions::default();
            fonts.font_data.insert(
                "noto_sans_devanagari".to_owned(),
                egui::FontData::from_owned(bytes).into(),
            );
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .push("noto_sans_devanagari".to_owned());

            ctx.set_fonts(fonts);
            ctx.request_repaint();
            log::info!("Fallback font loaded");
        });
    }
}

impl eframe::App for NexusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            Self::load_fallback_font(ctx.clone());
            self.start(ctx);
            self.first_frame = false;
        }

        if self.applied_theme != Some(self.ui_state.theme) {
            theme::apply_theme(ctx, self.ui_state.theme);
            self.applied_theme = Some(self.ui_state.theme);
        }

        // Drain events from the orchestrator and clipboard tracker
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if let Some(entries) = self.fetched_history.borrow_mut().take() {
            self.ui_state.merge_history(entries);
        }

        self.handle_dropped_files(ctx);

        let snapshot = self.orchestrator.snapshot();
        if let Some(session_id) = snapshot.session_id() {
            self.ui_state
                .record_conversation(session_id, snapshot.messages(), Utc::now());
        }
        if snapshot.is_loading() || self.clipboard.copied().is_some() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        // The orchestrator owns the input buffer; the text field edits a mirror
        self.ui_state.input_text = snapshot.pending_input().to_string();

        // ── History sidebar ──────────────────────────────────
        let mut sidebar_action = None;
        if self.ui_state.sidebar_open {
            SidePanel::left("history_sidebar")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    sidebar_action =
                        sidebar_panel(ui, &mut self.ui_state, Local::now().date_naive());
                });
        }

        // ── Conversation ─────────────────────────────────────
        let copied = self.clipboard.copied();
        let mut chat_action = None;
        CentralPanel::default().show(ctx, |ui| {
            chat_action = chat_panel(ui, &mut self.ui_state, &snapshot, copied.as_deref());
        });

        if self.ui_state.input_text != snapshot.pending_input() {
            self.orchestrator.set_input(self.ui_state.input_text.clone());
        }

        match sidebar_action {
            Some(SidebarAction::NewChat) => self.new_chat(ctx),
            Some(SidebarAction::Select(id)) => {
                self.ui_state.select_chat(&id);
            }
            Some(SidebarAction::Delete(id)) => {
                if self.ui_state.delete_chat(&id) {
                    self.new_chat(ctx);
                }
            }
            None => {}
        }

        match chat_action {
            Some(ChatPanelAction::Send) => self.send(ctx),
            Some(ChatPanelAction::Copy(code)) => self.copy(ctx, code),
            Some(ChatPanelAction::DiscardUpload) => self.orchestrator.discard_upload(),
            Some(ChatPanelAction::NewChat) => self.new_chat(ctx),
            None => {}
        }
    }
}

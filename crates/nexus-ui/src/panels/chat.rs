//! Chat panel: header, conversation, suggestions and input field.

use chrono::{DateTime, Local};
use egui::{self, Align, FontId, Layout, RichText, ScrollArea, Vec2};

use nexus_core::markup;
use nexus_core::ChatState;
use nexus_types::block::DisplayBlock;
use nexus_types::message::Message;

use crate::state::{NoticeKind, UiState, SUGGESTIONS};
use crate::theme::*;

/// What the caller should do after rendering the chat panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPanelAction {
    /// Submit `UiState::input_text` with the pending attachment
    Send,
    /// Copy a code block payload
    Copy(String),
    DiscardUpload,
    NewChat,
}

/// Render the chat panel. `copied` is the code payload currently shown as
/// copied, if any.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    chat: &ChatState,
    copied: Option<&str>,
) -> Option<ChatPanelAction> {
    let mut action = None;
    let palette = state.theme.palette();

    egui::Frame::default()
        .fill(palette.bg_primary)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    if ui.button("☰").clicked() {
                        state.sidebar_open = !state.sidebar_open;
                    }
                    ui.heading(RichText::new("Nexus").color(palette.text_primary).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(state.theme.toggle_label()).clicked() {
                            state.toggle_theme();
                        }
                        if ui.button("➕ New Chat").clicked() {
                            action = Some(ChatPanelAction::NewChat);
                        }
                        let status_color = if chat.is_typing() {
                            WARNING
                        } else if state.offline {
                            ERROR
                        } else {
                            SUCCESS
                        };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                // Messages
                let available_height = ui.available_height() - 110.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in chat.messages() {
                            if let Some(code) = render_message(ui, message, palette, copied) {
                                action = Some(ChatPanelAction::Copy(code));
                            }
                            ui.add_space(6.0);
                        }
                        if chat.is_typing() {
                            ui.label(
                                RichText::new("Nexus is typing...")
                                    .color(palette.text_secondary)
                                    .italics(),
                            );
                        }
                    });

                if state.show_suggestions && chat.messages().len() <= 1 {
                    suggestions(ui, state);
                }

                if let Some(notice) = state.notice.clone() {
                    ui.horizontal(|ui| {
                        let color = match notice.kind {
                            NoticeKind::Info => palette.accent,
                            NoticeKind::Error => ERROR,
                        };
                        ui.label(RichText::new(&notice.text).color(color).small());
                        if ui.small_button("✖").clicked() {
                            state.dismiss_notice();
                        }
                    });
                }

                if let Some(file) = chat.pending_upload() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("📎 {} ({})", file.filename, file.file_type))
                                .color(palette.text_secondary)
                                .small(),
                        );
                        if ui.small_button("✖").clicked() {
                            action = Some(ChatPanelAction::DiscardUpload);
                        }
                    });
                }

                ui.add_space(4.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask Nexus anything...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(FontId::proportional(14.0));

                    let response = ui.add(input);

                    let has_content =
                        !state.input_text.trim().is_empty() || chat.pending_upload().is_some();
                    let send_enabled = has_content && chat.can_send();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(palette.user_text))
                            .fill(if send_enabled { palette.accent } else { palette.bg_surface })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && send_enabled)
                        || send_btn.clicked()
                    {
                        action = Some(ChatPanelAction::Send);
                        response.request_focus();
                    }
                });

                ui.label(
                    RichText::new("Drop a PDF, Office, text or image file here to attach it (max 16 MB)")
                        .color(palette.text_secondary)
                        .small(),
                );
            });
        });

    action
}

fn suggestions(ui: &mut egui::Ui, state: &mut UiState) {
    let palette = state.theme.palette();
    ui.label(RichText::new("✨ Try asking Nexus:").color(palette.text_secondary).strong());
    ui.horizontal_wrapped(|ui| {
        for suggestion in SUGGESTIONS {
            let label = format!("{} {}", suggestion.icon, suggestion.text);
            if ui
                .button(label)
                .on_hover_text(suggestion.category)
                .clicked()
            {
                state.pick_suggestion(suggestion);
            }
        }
    });
}

/// Render one message bubble. Returns a code payload when its copy button
/// was clicked.
fn render_message(
    ui: &mut egui::Ui,
    message: &Message,
    palette: &Palette,
    copied: Option<&str>,
) -> Option<String> {
    let mut copy = None;
    let (layout, fill, text_color) = if message.is_user() {
        (Layout::top_down(Align::Max), palette.user_bubble, palette.user_text)
    } else {
        (Layout::top_down(Align::Min), palette.bg_secondary, palette.text_primary)
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);

                if message.is_user() {
                    ui.label(RichText::new(&message.content).color(text_color));
                } else {
                    badge(ui, message, palette);
                    for block in markup::parse(&message.content) {
                        if let Some(code) = render_block(ui, &block, palette, copied) {
                            copy = Some(code);
                        }
                    }
                }

                if let Some(time) = local_time(&message.created_at) {
                    ui.label(RichText::new(time).color(palette.text_secondary).small());
                }
            });
    });

    copy
}

fn badge(ui: &mut egui::Ui, message: &Message, palette: &Palette) {
    let subject = message.subject_area();
    ui.horizontal(|ui| {
        ui.label(RichText::new("Nexus").color(palette.accent).strong().small());
        ui.label(
            RichText::new(format!("{} {}", subject_icon(subject), subject))
                .color(subject_color(subject))
                .small(),
        );
        if let Some(code) = &message.detected_language {
            ui.label(RichText::new(language_flag(code)).small());
        }
    });
}

fn render_block(
    ui: &mut egui::Ui,
    block: &DisplayBlock,
    palette: &Palette,
    copied: Option<&str>,
) -> Option<String> {
    match block {
        DisplayBlock::Paragraph { text } => {
            ui.label(RichText::new(text).color(palette.text_primary));
        }
        DisplayBlock::Spacer => ui.add_space(6.0),
        DisplayBlock::Header { text } => {
            ui.label(RichText::new(text).color(palette.text_primary).strong().size(18.0));
        }
        DisplayBlock::Subheader { text } => {
            ui.label(RichText::new(text).color(palette.text_primary).strong().size(15.0));
        }
        DisplayBlock::BulletItem { text } => {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("•").color(palette.accent));
                ui.label(RichText::new(text).color(palette.text_primary));
            });
        }
        DisplayBlock::CodeBlock { language, code } => {
            let mut clicked = false;
            egui::Frame::default()
                .fill(palette.code_bg)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(language).color(palette.text_secondary).small());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            let label = if copied == Some(code.as_str()) {
                                "✅ Copied"
                            } else {
                                "📋 Copy"
                            };
                            clicked = ui.small_button(label).clicked();
                        });
                    });
                    ui.label(RichText::new(code).color(palette.code_fg).monospace());
                });
            if clicked {
                return Some(code.clone());
            }
        }
    }
    None
}

fn local_time(created_at: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(created_at)
        .ok()
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
}

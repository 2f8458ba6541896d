//! History sidebar: new chat, search, and past conversations grouped by day.

use chrono::NaiveDate;
use egui::{self, RichText, ScrollArea};

use crate::state::UiState;
use crate::theme::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    NewChat,
    Select(String),
    Delete(String),
}

pub fn sidebar_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    today: NaiveDate,
) -> Option<SidebarAction> {
    let mut action = None;
    let palette = state.theme.palette();

    egui::Frame::default()
        .fill(palette.bg_secondary)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let new_chat = egui::Button::new(RichText::new("➕ New Chat").color(palette.user_text))
                    .fill(palette.accent)
                    .corner_radius(PANEL_ROUNDING);
                if ui.add_sized([ui.available_width(), 28.0], new_chat).clicked() {
                    action = Some(SidebarAction::NewChat);
                }

                ui.add_space(4.0);
                ui.add(
                    egui::TextEdit::singleline(&mut state.search_term)
                        .hint_text("🔍 Search chats...")
                        .desired_width(f32::INFINITY),
                );
                ui.separator();

                let current = state.current_chat_id.clone();
                let groups = state.grouped_history(today);
                if groups.is_empty() {
                    let empty = if state.search_term.trim().is_empty() {
                        "No conversations yet"
                    } else {
                        "No matching conversations"
                    };
                    ui.label(RichText::new(empty).color(palette.text_secondary).small());
                    return;
                }

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (group, entries) in &groups {
                            ui.label(
                                RichText::new(group.to_string())
                                    .color(palette.text_secondary)
                                    .small()
                                    .strong(),
                            );
                            for entry in entries {
                                let selected = current.as_deref() == Some(entry.id.as_str());
                                ui.horizontal(|ui| {
                                    if ui
                                        .selectable_label(selected, RichText::new(&entry.title).color(palette.text_primary))
                                        .clicked()
                                    {
                                        action = Some(SidebarAction::Select(entry.id.clone()));
                                    }
                                    if ui.small_button("🗑").on_hover_text("Delete chat").clicked() {
                                        action = Some(SidebarAction::Delete(entry.id.clone()));
                                    }
                                });
                                ui.label(
                                    RichText::new(&entry.preview)
                                        .color(palette.text_secondary)
                                        .small(),
                                );
                                ui.add_space(4.0);
                            }
                        }
                    });
            });
        });

    action
}

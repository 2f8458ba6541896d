#[cfg(test)]
mod tests {
    use crate::state::*;
    use crate::theme::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use nexus_core::history::{DateGroup, HistoryEntry};
    use nexus_types::event::ChatEvent;
    use nexus_types::message::Message;

    fn entry(id: &str, title: &str, timestamp: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            title: title.to_string(),
            preview: format!("{} preview...", title),
            timestamp: timestamp.to_string(),
        }
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert_eq!(state.theme, ThemeMode::Light);
        assert!(state.sidebar_open);
        assert!(state.history.is_empty());
        assert!(state.current_chat_id.is_none());
        assert!(state.show_suggestions);
        assert!(state.input_text.is_empty());
        assert!(state.notice.is_none());
        assert!(!state.offline);
        assert!(!state.history_dirty);
    }

    #[test]
    fn test_ui_state_session_opened() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::SessionOpened {
            session_id: "s1".to_string(),
        }]);
        assert_eq!(state.current_chat_id.as_deref(), Some("s1"));
        assert_eq!(state.status_text, "Ready");
        assert!(!state.offline);
    }

    #[test]
    fn test_ui_state_session_degraded() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::SessionDegraded {
            reason: "connection refused".to_string(),
        }]);
        assert!(state.offline);
        assert_eq!(state.status_text, "Offline");
        let notice = state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("connection refused"));

        state.process_events(vec![
            ChatEvent::TypingChanged { typing: true },
            ChatEvent::TypingChanged { typing: false },
        ]);
        assert_eq!(state.status_text, "Offline");
    }

    #[test]
    fn test_ui_state_typing_status() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::TypingChanged { typing: true }]);
        assert_eq!(state.status_text, "Nexus is typing...");
        state.process_events(vec![ChatEvent::TypingChanged { typing: false }]);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_user_message_hides_suggestions() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::MessageAppended {
            message: Message::assistant("hello", None, None),
        }]);
        assert!(state.show_suggestions);
        assert!(state.history_dirty);

        state.process_events(vec![ChatEvent::MessageAppended {
            message: Message::user("hi"),
        }]);
        assert!(!state.show_suggestions);
    }

    #[test]
    fn test_ui_state_log_reset_restores_suggestions() {
        let mut state = UiState::new();
        state.show_suggestions = false;
        state.history_dirty = true;
        state.process_events(vec![ChatEvent::LogReset {
            greeting: Message::notice("cleared", "Chat cleared."),
        }]);
        assert!(state.show_suggestions);
        assert!(!state.history_dirty);
    }

    #[test]
    fn test_ui_state_upload_notices() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::UploadAccepted {
            filename: "notes.pdf".to_string(),
            file_type: "pdf".to_string(),
        }]);
        let notice = state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(notice.text.contains("notes.pdf"));

        state.process_events(vec![ChatEvent::UploadRejected {
            reason: "File too large".to_string(),
        }]);
        assert_eq!(state.notice, Some(Notice::error("File too large")));

        state.dismiss_notice();
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_ui_state_copy_failed_notice() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::CopyFailed {
            reason: "denied".to_string(),
        }]);
        assert_eq!(state.notice, Some(Notice::error("Copy failed: denied")));
    }

    #[test]
    fn test_ui_state_toggle_theme() {
        let mut state = UiState::new();
        state.toggle_theme();
        assert_eq!(state.theme, ThemeMode::Dark);
        state.toggle_theme();
        assert_eq!(state.theme, ThemeMode::Light);
    }

    #[test]
    fn test_ui_state_pick_suggestion() {
        let mut state = UiState::new();
        state.pick_suggestion(&SUGGESTIONS[1]);
        assert_eq!(state.input_text, "Solve a math problem");
        assert!(!state.show_suggestions);
    }

    // ─── History Sidebar Tests ───────────────────────────────

    #[test]
    fn test_record_conversation_only_when_dirty() {
        let mut state = UiState::new();
        let now = Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap();
        let messages = vec![Message::notice("welcome", "Hello!"), Message::user("2+2?")];

        state.record_conversation("s1", &messages, now);
        assert!(state.history.is_empty());

        state.history_dirty = true;
        state.record_conversation("s1", &messages, now);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].title, "2+2?");
        assert_eq!(state.current_chat_id.as_deref(), Some("s1"));
        assert!(!state.history_dirty);

        // same session updates in place
        let mut more = messages.clone();
        more.push(Message::assistant("4", Some("mathematics".to_string()), None));
        state.history_dirty = true;
        state.record_conversation("s1", &more, now);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].preview, "4...");
    }

    #[test]
    fn test_record_conversation_skips_greeting_only() {
        let mut state = UiState::new();
        state.history_dirty = true;
        state.record_conversation("s1", &[Message::notice("welcome", "Hello!")], Utc::now());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_merge_history_keeps_backend_order() {
        let mut state = UiState::new();
        state.history.push(entry("local", "Local", "2026-05-04T10:00:00"));
        state.merge_history(vec![
            entry("a", "A", "2026-05-04T09:00:00"),
            entry("local", "Local (server)", "2026-05-04T10:00:00"),
            entry("b", "B", "2026-05-03T09:00:00"),
        ]);
        let ids: Vec<&str> = state.history.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "local"]);
        assert_eq!(state.history[2].title, "Local (server)");
    }

    #[test]
    fn test_select_chat() {
        let mut state = UiState::new();
        state.history.push(entry("a", "A", "2026-05-04T09:00:00"));
        assert!(state.select_chat("a"));
        assert_eq!(state.current_chat_id.as_deref(), Some("a"));
        assert!(!state.show_suggestions);
        assert!(!state.select_chat("missing"));
        assert_eq!(state.current_chat_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_delete_chat() {
        let mut state = UiState::new();
        state.history.push(entry("a", "A", "2026-05-04T09:00:00"));
        state.history.push(entry("b", "B", "2026-05-04T09:00:00"));
        state.current_chat_id = Some("b".to_string());

        assert!(!state.delete_chat("a"));
        assert!(state.delete_chat("b"));
        assert!(!state.delete_chat("b"));
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_visible_and_grouped_history() {
        let mut state = UiState::new();
        state.history = vec![
            entry("a", "Python loops", "2026-05-04T09:00:00"),
            entry("b", "Calculus", "2026-05-03T09:00:00"),
            entry("c", "python decorators", "2026-04-01T09:00:00Z"),
        ];
        state.search_term = "  PYTHON ".to_string();
        let visible: Vec<&str> = state.visible_history().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(visible, vec!["a", "c"]);

        state.search_term.clear();
        let today = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let groups: Vec<DateGroup> = state.grouped_history(today).into_iter().map(|(g, _)| g).collect();
        assert_eq!(
            groups,
            vec![
                DateGroup::Today,
                DateGroup::Yesterday,
                DateGroup::On(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()),
            ]
        );
    }

    // ─── Theme Tests ─────────────────────────────────────────

    #[test]
    fn test_theme_mode_toggle_labels() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle_label(), "🌙 Dark");
        assert_ne!(ThemeMode::Light.palette().bg_primary, ThemeMode::Dark.palette().bg_primary);
    }

    #[test]
    fn test_subject_icon() {
        assert_eq!(subject_icon("programming"), "💻");
        assert_eq!(subject_icon("mathematics"), "📊");
        assert_eq!(subject_icon("general"), "🎯");
        assert_eq!(subject_icon("astrology"), "🎯");
        assert_eq!(subject_color("unknown"), subject_color("general"));
    }

    #[test]
    fn test_language_flag() {
        assert_eq!(language_flag("en"), "🇺🇸");
        assert_eq!(language_flag("hi"), "🇮🇳");
        assert_eq!(language_flag("ta"), "🇮🇳");
        assert_eq!(language_flag("bn"), "🇧🇩");
        assert_eq!(language_flag("fr"), "🌐");
    }
}

#[cfg(test)]
mod tests {
    use crate::block::*;
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;
    use crate::upload::*;
    use serde_json::json;

    fn sample_upload(content: serde_json::Value) -> UploadedFileRef {
        UploadedFileRef {
            filename: "notes.pdf".to_string(),
            file_type: "pdf".to_string(),
            content,
            session_id: Some("s1".to_string()),
        }
    }

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.id.kind(), "user");
        assert!(msg.subject_area.is_none());
        assert!(msg.detected_language.is_none());
        assert!(!msg.created_at.is_empty());
    }

    #[test]
    fn test_message_assistant_defaults_subject() {
        let msg = Message::assistant("4", None, None);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.id.kind(), "bot");
        assert_eq!(msg.subject_area(), "general");
        assert_eq!(msg.subject_area.as_deref(), Some("general"));
    }

    #[test]
    fn test_message_assistant_keeps_metadata() {
        let msg = Message::assistant(
            "4",
            Some("mathematics".to_string()),
            Some("en".to_string()),
        );
        assert_eq!(msg.subject_area(), "mathematics");
        assert_eq!(msg.detected_language.as_deref(), Some("en"));
    }

    #[test]
    fn test_message_notice() {
        let msg = Message::notice("welcome", "Hi there");
        assert!(msg.is_assistant());
        assert_eq!(msg.id.kind(), "welcome");
        assert_eq!(msg.subject_area(), "general");
    }

    #[test]
    fn test_message_attachment() {
        let file = sample_upload(json!({}));
        let msg = Message::attachment(&file);
        assert!(msg.is_user());
        assert_eq!(msg.id.kind(), "file");
        assert_eq!(msg.content, "📎 Uploaded: notes.pdf (pdf)");
        let info = msg.attachment.unwrap();
        assert_eq!(info.filename, "notes.pdf");
        assert_eq!(info.file_type, "pdf");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("x");
        let b = Message::user("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_serialization_omits_empty_metadata() {
        let msg = Message::user("test input");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("subject_area"));
        assert!(!json.contains("attachment"));
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.role, Role::User);
        assert_eq!(deserialized.id, msg.id);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    // ─── DisplayBlock Tests ──────────────────────────────────

    #[test]
    fn test_display_block_tagging() {
        let json = serde_json::to_value(DisplayBlock::code("py", "x=1")).unwrap();
        assert_eq!(json["type"], "code_block");
        assert_eq!(json["language"], "py");
        assert_eq!(json["code"], "x=1");

        let json = serde_json::to_value(DisplayBlock::Spacer).unwrap();
        assert_eq!(json["type"], "spacer");
    }

    #[test]
    fn test_display_block_is_code() {
        assert!(DisplayBlock::code("text", "").is_code());
        assert!(!DisplayBlock::paragraph("p").is_code());
    }

    // ─── Upload Tests ────────────────────────────────────────

    #[test]
    fn test_digest_prefers_text_content() {
        let file = sample_upload(json!({"text_content": "body", "summary": "sum"}));
        assert_eq!(file.digest(), "body");
    }

    #[test]
    fn test_digest_falls_back_to_summary() {
        let file = sample_upload(json!({"summary": "sum", "pages": 3}));
        assert_eq!(file.digest(), "sum");
    }

    #[test]
    fn test_digest_falls_back_to_json() {
        let file = sample_upload(json!({"pages": 3}));
        assert_eq!(file.digest(), r#"{"pages":3}"#);
    }

    #[test]
    fn test_draft_prompt() {
        let file = sample_upload(json!({}));
        assert_eq!(
            file.draft_prompt(),
            "I've uploaded a PDF file named \"notes.pdf\". "
        );
    }

    #[test]
    fn test_default_upload_limits() {
        let limits = UploadLimits::default();
        assert_eq!(limits.max_bytes, 16 * 1024 * 1024);
        assert!(limits.allows_mime("application/pdf"));
        assert!(limits.allows_mime("image/webp"));
        assert!(!limits.allows_mime("application/x-msdownload"));
        assert_eq!(limits.allowed_mime_types.len(), 14);
    }

    #[test]
    fn test_file_upload_size() {
        let file = FileUpload::new("a.txt", "text/plain", vec![0; 42]);
        assert_eq!(file.size(), 42);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert!(config.api.include_credentials);
        assert_eq!(config.timing.reply_delay_ms, 800);
        assert_eq!(config.timing.copy_reset_ms, 2000);
        assert!(!config.greetings.welcome.is_empty());
        assert_ne!(config.greetings.cleared, config.greetings.cleared_fallback);
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let api = ApiConfig {
            base_url: "https://chat.example/api/".to_string(),
            include_credentials: false,
        };
        assert_eq!(api.endpoint("/chat"), "https://chat.example/api/chat");
        assert_eq!(api.endpoint("files/upload"), "https://chat.example/api/files/upload");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ChatConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ChatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.timing, config.timing);
        assert_eq!(deserialized.upload, config.upload);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::SessionOpened {
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SessionOpened"));
        assert!(json.contains("abc"));
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ChatError::Validation("too large".to_string());
        assert_eq!(err.to_string(), "Validation error: too large");

        let err = ChatError::Backend {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error: HTTP 500: boom");

        let err = ChatError::Network("offline".to_string());
        assert_eq!(err.to_string(), "Network error: offline");
    }

    #[test]
    fn test_error_classification() {
        assert!(ChatError::Validation(String::new()).is_validation());
        assert!(ChatError::Network(String::new()).is_transport());
        assert!(ChatError::Backend {
            status: 400,
            message: String::new()
        }
        .is_transport());
        assert!(!ChatError::Clipboard(String::new()).is_transport());
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}

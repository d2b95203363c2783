use super::*;
use crate::types::{ChatAction, ParseMode};

#[test]
fn test_send_message_minimal_omits_optionals() {
    let params = SendMessage::new(42i64, "hi").into_params();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("chat_id"), Some(&ParamValue::Integer(42)));
    assert_eq!(params.get("text"), Some(&ParamValue::Text("hi".into())));
    assert!(!params.contains("parse_mode"));
    assert!(!params.contains("disable_web_page_preview"));
    assert!(!params.contains("reply_to_message_id"));
}

#[test]
fn test_send_message_empty_text_is_still_sent() {
    let params = SendMessage::new(42i64, "").into_params();
    assert_eq!(params.get("text"), Some(&ParamValue::Text(String::new())));
}

#[test]
fn test_send_message_all_options() {
    let params = SendMessage::new("@channel", "*hi*")
        .parse_mode(ParseMode::Markdown)
        .disable_web_page_preview()
        .reply_to(0)
        .reply_markup(serde_json::json!({"remove_keyboard": true}))
        .into_params();
    assert_eq!(
        params.get("chat_id"),
        Some(&ParamValue::Text("@channel".into()))
    );
    assert_eq!(
        params.get("parse_mode"),
        Some(&ParamValue::Text("Markdown".into()))
    );
    assert_eq!(
        params.get("disable_web_page_preview"),
        Some(&ParamValue::Bool(true))
    );
    // Zero is a real message id, not "absent".
    assert_eq!(
        params.get("reply_to_message_id"),
        Some(&ParamValue::Integer(0))
    );
    let pairs = params.to_form_pairs();
    assert!(pairs.contains(&(
        "reply_markup".to_string(),
        r#"{"remove_keyboard":true}"#.to_string()
    )));
}

#[test]
fn test_get_updates_params() {
    let params = GetUpdates {
        offset: 12,
        limit: 100,
        timeout: 5,
    }
    .into_params();
    assert_eq!(
        params.to_form_pairs(),
        vec![
            ("offset".to_string(), "12".to_string()),
            ("limit".to_string(), "100".to_string()),
            ("timeout".to_string(), "5".to_string()),
        ]
    );
}

#[test]
fn test_edit_message_text_targets() {
    let params = EditMessageText::new(
        EditTarget::Chat {
            chat_id: ChatId::Id(7),
            message_id: 3,
        },
        "new",
    )
    .into_params();
    assert!(params.contains("chat_id"));
    assert!(params.contains("message_id"));
    assert!(!params.contains("inline_message_id"));

    let params = EditMessageText::new(EditTarget::Inline("abc".into()), "new")
        .parse_mode(ParseMode::Html)
        .into_params();
    assert!(!params.contains("chat_id"));
    assert_eq!(
        params.get("inline_message_id"),
        Some(&ParamValue::Text("abc".into()))
    );
    assert_eq!(params.get("parse_mode"), Some(&ParamValue::Text("HTML".into())));
}

#[test]
fn test_answer_callback_query_flags() {
    let params = AnswerCallbackQuery::new("cb").into_params();
    assert_eq!(params.len(), 1);

    let params = AnswerCallbackQuery::new("cb").text("done").show_alert().into_params();
    assert_eq!(params.get("show_alert"), Some(&ParamValue::Bool(true)));
    assert_eq!(params.get("text"), Some(&ParamValue::Text("done".into())));
}

#[test]
fn test_send_location_params() {
    let params = SendLocation::new(1i64, 52.37, 4.89).silent().into_params();
    assert_eq!(params.get("latitude"), Some(&ParamValue::Float(52.37)));
    assert_eq!(
        params.get("disable_notification"),
        Some(&ParamValue::Bool(true))
    );
    assert!(!params.contains("reply_to_message_id"));
}

#[test]
fn test_send_document_upload_needs_multipart() {
    let file = InputFile::new("report.txt", b"hello".to_vec()).with_mime("text/plain");
    let params = SendDocument::new(1i64, DocumentSource::Upload(file))
        .caption("report")
        .into_params();
    assert!(params.has_files());
    // Files never appear among form pairs.
    let names: Vec<String> = params.to_form_pairs().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["chat_id".to_string(), "caption".to_string()]);

    let params = SendDocument::new(1i64, DocumentSource::FileId("BQAD".into())).into_params();
    assert!(!params.has_files());
}

#[test]
fn test_set_webhook_allowed_updates_as_json() {
    let mut req = SetWebhook::new("https://example.com/hook");
    req.allowed_updates = Some(vec!["message".into(), "callback_query".into()]);
    req.max_connections = Some(40);
    let pairs = req.into_params().to_form_pairs();
    assert!(pairs.contains(&(
        "allowed_updates".to_string(),
        r#"["message","callback_query"]"#.to_string()
    )));
    assert!(pairs.contains(&("max_connections".to_string(), "40".to_string())));
    assert!(!pairs.iter().any(|(n, _)| n == "certificate"));
}

#[test]
fn test_chat_action_params() {
    let params = chat_action_params(9i64, ChatAction::Typing);
    assert_eq!(params.get("action"), Some(&ParamValue::Text("typing".into())));
}

#[test]
fn test_params_insert_replaces_and_keeps_order() {
    let mut params = Params::new().with("a", 1i64).with("b", false);
    params.insert("a", 2i64);
    let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(params.get("a"), Some(&ParamValue::Integer(2)));
    // An explicit `false` is present, unlike an unset flag.
    assert_eq!(params.get("b"), Some(&ParamValue::Bool(false)));
}

#[test]
fn test_input_file_debug_hides_body() {
    let file = InputFile::new("a.bin", vec![0u8; 2048]);
    assert_eq!(format!("{file:?}"), "InputFile(a.bin, 2048 bytes)");
}

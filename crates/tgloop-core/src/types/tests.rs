use super::*;
use std::time::Duration;

fn private_message(extra: &str) -> String {
    format!(
        r#"{{
            "message_id": 1,
            "date": 1706529600,
            "chat": {{"id": 100, "type": "private", "first_name": "Ann"}}
            {extra}
        }}"#
    )
}

#[test]
fn test_chat_type_detection() {
    let group: Chat = serde_json::from_str(r#"{"id": -100123, "type": "group"}"#).unwrap();
    assert_eq!(group.chat_type, ChatType::Group);
    assert!(group.chat_type.is_group());

    let supergroup: Chat =
        serde_json::from_str(r#"{"id": -100456, "type": "supergroup"}"#).unwrap();
    assert!(supergroup.chat_type.is_group());

    let private: Chat = serde_json::from_str(r#"{"id": 789, "type": "private"}"#).unwrap();
    assert!(!private.chat_type.is_group());
    assert!(private.title.is_none());
}

#[test]
fn test_chat_type_unknown_value_is_error() {
    let result: Result<Chat, _> = serde_json::from_str(r#"{"id": 1, "type": "forum"}"#);
    assert!(result.is_err());
}

#[test]
fn test_chat_type_missing_is_error() {
    let result: Result<Chat, _> = serde_json::from_str(r#"{"id": 1}"#);
    assert!(result.is_err());
}

#[test]
fn test_message_text_only() {
    let msg: Message = serde_json::from_str(&private_message(r#", "text": "hello""#)).unwrap();
    assert_eq!(msg.id, 1);
    assert_eq!(msg.text.as_deref(), Some("hello"));
    assert_eq!(msg.date.timestamp(), 1706529600);
    assert!(msg.voice.is_none());
    assert!(msg.edit_date.is_none());
    assert!(!msg.delete_chat_photo);
}

#[test]
fn test_message_missing_required_field_is_error() {
    let json = r#"{"message_id": 1, "chat": {"id": 100, "type": "private"}}"#;
    let result: Result<Message, _> = serde_json::from_str(json);
    assert!(result.is_err(), "date is required");
}

#[test]
fn test_message_with_voice_zero_duration() {
    let msg: Message = serde_json::from_str(&private_message(
        r#", "voice": {"file_id": "abc123", "duration": 0, "mime_type": "audio/ogg"}"#,
    ))
    .unwrap();
    let voice = msg.voice.unwrap();
    assert_eq!(voice.file_id, "abc123");
    assert_eq!(voice.duration(), Duration::ZERO);
    assert_eq!(voice.mime_type.as_deref(), Some("audio/ogg"));
    assert!(voice.file_size.is_none());
}

#[test]
fn test_message_with_photo() {
    let msg: Message = serde_json::from_str(&private_message(
        r#", "photo": [
            {"file_id": "small", "width": 90, "height": 90, "file_size": 1000},
            {"file_id": "large", "width": 800, "height": 800, "file_size": 0}
        ], "caption": "Check this out""#,
    ))
    .unwrap();
    let largest = msg.largest_photo().unwrap();
    assert_eq!(largest.file_id, "large");
    assert_eq!(largest.file_size, Some(0));
    assert_eq!(msg.caption.as_deref(), Some("Check this out"));
}

#[test]
fn test_message_nested_reply_and_document_thumb() {
    let msg: Message = serde_json::from_str(&private_message(
        r#", "reply_to_message": {
            "message_id": 0,
            "date": 1706529000,
            "chat": {"id": 100, "type": "private"},
            "text": "original"
        },
        "document": {"file_id": "doc", "thumb": {"file_id": "t", "width": 10, "height": 10}}"#,
    ))
    .unwrap();
    let reply = msg.reply_to_message.as_deref().unwrap();
    assert_eq!(reply.id, 0);
    assert_eq!(reply.text.as_deref(), Some("original"));
    let doc = msg.document.unwrap();
    assert_eq!(doc.thumbnail.unwrap().file_id, "t");
    assert!(doc.file_name.is_none());
}

#[test]
fn test_message_service_flags() {
    let msg: Message = serde_json::from_str(&private_message(
        r#", "group_chat_created": true, "migrate_to_chat_id": 0"#,
    ))
    .unwrap();
    assert!(msg.group_chat_created);
    assert!(!msg.channel_chat_created);
    assert_eq!(msg.migrate_to_chat_id, Some(0));
    assert!(msg.migrate_from_chat_id.is_none());
}

#[test]
fn test_entity_unknown_type_is_error() {
    let result: Result<MessageEntity, _> =
        serde_json::from_str(r#"{"type": "sparkles", "offset": 0, "length": 1}"#);
    assert!(result.is_err());
}

#[test]
fn test_entity_extract_utf16() {
    let entity: MessageEntity =
        serde_json::from_str(r#"{"type": "hashtag", "offset": 3, "length": 4}"#).unwrap();
    // The emoji takes two UTF-16 code units.
    assert_eq!(entity.extract("\u{1F600} #rs!").as_deref(), Some("#rs!"));
    assert_eq!(entity.len(), 4);
    assert!(entity.extract("ab").is_none());
}

#[test]
fn test_message_commands() {
    let msg: Message = serde_json::from_str(&private_message(
        r#", "text": "/start@my_bot now",
        "entities": [{"type": "bot_command", "offset": 0, "length": 13}]"#,
    ))
    .unwrap();
    assert_eq!(msg.commands(), vec!["/start".to_string()]);
}

#[test]
fn test_user_display_name() {
    let user: User = serde_json::from_str(r#"{"id": 1, "first_name": "Ann"}"#).unwrap();
    assert_eq!(user.display_name(), "Ann");
    let user: User =
        serde_json::from_str(r#"{"id": 1, "first_name": "Ann", "last_name": "Lee"}"#).unwrap();
    assert_eq!(user.display_name(), "Ann Lee");
    let user: User =
        serde_json::from_str(r#"{"id": 1, "first_name": "Ann", "username": "ann"}"#).unwrap();
    assert_eq!(user.display_name(), "@ann");
}

#[test]
fn test_update_message_kind() {
    let json = format!(r#"{{"update_id": 10, "message": {}}}"#, private_message(""));
    let update: Update = serde_json::from_str(&json).unwrap();
    assert_eq!(update.id, 10);
    assert!(matches!(update.kind, UpdateKind::Message(_)));
    assert_eq!(update.chat_id(), Some(100));
    assert_eq!(update.kind_name(), "message");
}

#[test]
fn test_update_edited_channel_post_kind() {
    let json = format!(
        r#"{{"update_id": 11, "edited_channel_post": {}}}"#,
        private_message("")
    );
    let update: Update = serde_json::from_str(&json).unwrap();
    assert!(matches!(update.kind, UpdateKind::EditedChannelPost(_)));
    assert!(update.message().is_some());
}

#[test]
fn test_update_inline_query() {
    let json = r#"{
        "update_id": 12,
        "inline_query": {
            "id": "q1",
            "from": {"id": 5, "first_name": "Bo"},
            "query": "cats",
            "offset": ""
        }
    }"#;
    let update: Update = serde_json::from_str(json).unwrap();
    let UpdateKind::InlineQuery(ref q) = update.kind else {
        panic!("expected inline query");
    };
    assert_eq!(q.query, "cats");
    assert!(q.location.is_none());
    assert_eq!(update.user().unwrap().id, 5);
    assert!(update.chat_id().is_none());
}

#[test]
fn test_update_callback_query_with_message() {
    let json = format!(
        r#"{{
            "update_id": 13,
            "callback_query": {{
                "id": "cb",
                "from": {{"id": 5, "first_name": "Bo"}},
                "message": {},
                "data": "yes"
            }}
        }}"#,
        private_message("")
    );
    let update: Update = serde_json::from_str(&json).unwrap();
    assert!(matches!(update.kind, UpdateKind::CallbackQuery(_)));
    assert_eq!(update.chat_id(), Some(100));
}

#[test]
fn test_update_without_known_payload_is_unknown() {
    let update: Update =
        serde_json::from_str(r#"{"update_id": 14, "poll": {"id": "p"}}"#).unwrap();
    assert_eq!(update.id, 14);
    assert_eq!(update.kind, UpdateKind::Unknown);
}

#[test]
fn test_update_missing_id_is_error() {
    let result: Result<Update, _> = serde_json::from_str(r#"{"message": null}"#);
    assert!(result.is_err());
}

#[test]
fn test_update_bad_nested_payload_is_error() {
    let json = r#"{"update_id": 15, "message": {"message_id": 1}}"#;
    let result: Result<Update, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_webhook_info_empty_url() {
    let info: WebhookInfo = serde_json::from_str(
        r#"{"url": "", "has_custom_certificate": false, "pending_update_count": 0}"#,
    )
    .unwrap();
    assert!(!info.is_set());
    assert!(info.last_error_date.is_none());
    assert!(info.max_connections.is_none());
}

#[test]
fn test_parse_mode_and_chat_action_wire_names() {
    assert_eq!(ParseMode::Html.as_str(), "HTML");
    assert_eq!(ParseMode::Markdown.as_str(), "Markdown");
    assert_eq!(ChatAction::UploadDocument.as_str(), "upload_document");
    assert_eq!(
        serde_json::to_string(&ChatAction::FindLocation).unwrap(),
        "\"find_location\""
    );
}

#[test]
fn test_update_user_per_kind() {
    let message: Update = serde_json::from_str(
        r#"{"update_id": 1, "message": {"message_id": 1, "date": 0,
            "chat": {"id": 3, "type": "private"}, "from": {"id": 8, "first_name": "Al"}}}"#,
    )
    .unwrap();
    assert_eq!(message.user().unwrap().id, 8);

    let callback: Update = serde_json::from_str(
        r#"{"update_id": 2, "callback_query": {"id": "c", "data": "x",
            "from": {"id": 9, "first_name": "Bo"}}}"#,
    )
    .unwrap();
    assert_eq!(callback.user().unwrap().id, 9);

    let unknown: Update = serde_json::from_str(r#"{"update_id": 3}"#).unwrap();
    assert!(unknown.user().is_none());
}

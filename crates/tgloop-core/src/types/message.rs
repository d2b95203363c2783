use super::{Audio, Chat, Contact, Document, Location, PhotoSize, Sticker, User, Venue, Video, Voice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a special entity inside message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Blockquote,
    ExpandableBlockquote,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
}

/// One special entity in a text message: hashtag, username, URL, etc.
///
/// `offset` and `length` are measured in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: MessageEntityType,
    pub offset: usize,
    pub length: usize,
    pub url: Option<String>,
    pub user: Option<User>,
}

impl MessageEntity {
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Slice of `text` covered by this entity, or `None` if out of range.
    pub fn extract(&self, text: &str) -> Option<String> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let end = self.offset.checked_add(self.length)?;
        let slice = units.get(self.offset..end)?;
        String::from_utf16(slice).ok()
    }
}

/// A message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: i64,
    pub from: Option<User>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub chat: Chat,
    pub forward_from: Option<User>,
    pub forward_from_chat: Option<Chat>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub forward_date: Option<DateTime<Utc>>,
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub edit_date: Option<DateTime<Utc>>,
    pub text: Option<String>,
    pub entities: Option<Vec<MessageEntity>>,
    pub audio: Option<Audio>,
    pub document: Option<Document>,
    pub photo: Option<Vec<PhotoSize>>,
    pub sticker: Option<Sticker>,
    pub video: Option<Video>,
    pub voice: Option<Voice>,
    pub caption: Option<String>,
    pub contact: Option<Contact>,
    pub location: Option<Location>,
    pub venue: Option<Venue>,
    pub new_chat_member: Option<User>,
    pub left_chat_member: Option<User>,
    pub new_chat_title: Option<String>,
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    #[serde(default)]
    pub delete_chat_photo: bool,
    #[serde(default)]
    pub group_chat_created: bool,
    #[serde(default)]
    pub supergroup_chat_created: bool,
    #[serde(default)]
    pub channel_chat_created: bool,
    pub migrate_to_chat_id: Option<i64>,
    pub migrate_from_chat_id: Option<i64>,
    pub pinned_message: Option<Box<Message>>,
}

impl Message {
    /// Display name of the sender, if the message has one.
    pub fn sender(&self) -> Option<String> {
        self.from.as_ref().map(User::display_name)
    }

    /// Bot commands in the text, e.g. `/start`, without the `@botname` suffix.
    pub fn commands(&self) -> Vec<String> {
        let (Some(text), Some(entities)) = (self.text.as_deref(), self.entities.as_ref()) else {
            return Vec::new();
        };
        entities
            .iter()
            .filter(|e| e.kind == MessageEntityType::BotCommand)
            .filter_map(|e| e.extract(text))
            .map(|cmd| match cmd.split_once('@') {
                Some((name, _)) => name.to_string(),
                None => cmd,
            })
            .collect()
    }

    /// Largest photo size, if this is a photo message.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photo.as_ref().and_then(|sizes| sizes.last())
    }
}

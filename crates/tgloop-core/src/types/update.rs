use super::{CallbackQuery, ChosenInlineResult, InlineQuery, Message, User};
use serde::Deserialize;

/// An incoming update.
///
/// `id` is the cursor key: update identifiers increase sequentially, and
/// the poller asks for `offset = id + 1` once an update has been handled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawUpdate")]
pub struct Update {
    pub id: i64,
    pub kind: UpdateKind,
}

/// Payload of an update. The server sends at most one per update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    CallbackQuery(CallbackQuery),
    /// None of the payloads above; the update is still delivered.
    Unknown,
}

#[derive(Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<Message>,
    edited_message: Option<Message>,
    channel_post: Option<Message>,
    edited_channel_post: Option<Message>,
    inline_query: Option<InlineQuery>,
    chosen_inline_result: Option<ChosenInlineResult>,
    callback_query: Option<CallbackQuery>,
}

impl From<RawUpdate> for Update {
    fn from(raw: RawUpdate) -> Self {
        let kind = if let Some(m) = raw.message {
            UpdateKind::Message(m)
        } else if let Some(m) = raw.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(m) = raw.channel_post {
            UpdateKind::ChannelPost(m)
        } else if let Some(m) = raw.edited_channel_post {
            UpdateKind::EditedChannelPost(m)
        } else if let Some(q) = raw.inline_query {
            UpdateKind::InlineQuery(q)
        } else if let Some(r) = raw.chosen_inline_result {
            UpdateKind::ChosenInlineResult(r)
        } else if let Some(q) = raw.callback_query {
            UpdateKind::CallbackQuery(q)
        } else {
            UpdateKind::Unknown
        };
        Self {
            id: raw.update_id,
            kind,
        }
    }
}

impl Update {
    /// The message carried by any of the four message kinds.
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(m),
            UpdateKind::CallbackQuery(q) => q.message.as_deref(),
            _ => None,
        }
    }

    /// The user that caused this update, when known.
    pub fn user(&self) -> Option<&User> {
        match &self.kind {
            UpdateKind::InlineQuery(q) => Some(&q.from),
            UpdateKind::ChosenInlineResult(r) => Some(&r.from),
            UpdateKind::CallbackQuery(q) => Some(&q.from),
            _ => self.message().and_then(|m| m.from.as_ref()),
        }
    }

    /// Chat the update belongs to, when it has one.
    pub fn chat_id(&self) -> Option<i64> {
        self.message().map(|m| m.chat.id)
    }

    /// Short name of the payload kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            UpdateKind::Message(_) => "message",
            UpdateKind::EditedMessage(_) => "edited_message",
            UpdateKind::ChannelPost(_) => "channel_post",
            UpdateKind::EditedChannelPost(_) => "edited_channel_post",
            UpdateKind::InlineQuery(_) => "inline_query",
            UpdateKind::ChosenInlineResult(_) => "chosen_inline_result",
            UpdateKind::CallbackQuery(_) => "callback_query",
            UpdateKind::Unknown => "unknown",
        }
    }
}

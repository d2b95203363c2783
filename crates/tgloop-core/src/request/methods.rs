//! Parameter builders for the send family of calls.
//!
//! Omission rules: optional values are sent only when set, flags only
//! when `true`, parse mode only when not the plain-text default.

use super::{ChatId, InputFile, Params};
use crate::types::{ChatAction, ParseMode};

/// `getUpdates` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetUpdates {
    pub offset: i64,
    pub limit: u32,
    /// Server-side long-poll hold time in seconds.
    pub timeout: u32,
}

impl GetUpdates {
    pub fn into_params(self) -> Params {
        Params::new()
            .with("offset", self.offset)
            .with("limit", self.limit)
            .with("timeout", self.timeout)
    }
}

/// `sendMessage` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: bool,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<serde_json::Value>,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn disable_web_page_preview(mut self) -> Self {
        self.disable_web_page_preview = true;
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn reply_markup(mut self, markup: serde_json::Value) -> Self {
        self.reply_markup = Some(markup);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new()
            .with("chat_id", self.chat_id)
            .with("text", self.text);
        params
            .insert_opt("parse_mode", self.parse_mode.map(|m| m.as_str()))
            .insert_flag("disable_web_page_preview", self.disable_web_page_preview)
            .insert_opt("reply_to_message_id", self.reply_to_message_id)
            .insert_opt("reply_markup", self.reply_markup);
        params
    }
}

/// Which message `editMessageText` targets.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    /// A message sent by the bot into a chat.
    Chat { chat_id: ChatId, message_id: i64 },
    /// A message sent via the bot in inline mode.
    Inline(String),
}

/// `editMessageText` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EditMessageText {
    pub target: EditTarget,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: bool,
    pub reply_markup: Option<serde_json::Value>,
}

impl EditMessageText {
    pub fn new(target: EditTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            reply_markup: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn reply_markup(mut self, markup: serde_json::Value) -> Self {
        self.reply_markup = Some(markup);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().with("text", self.text);
        match self.target {
            EditTarget::Chat {
                chat_id,
                message_id,
            } => {
                params.insert("chat_id", chat_id).insert("message_id", message_id);
            }
            EditTarget::Inline(id) => {
                params.insert("inline_message_id", id);
            }
        }
        params
            .insert_opt("parse_mode", self.parse_mode.map(|m| m.as_str()))
            .insert_flag("disable_web_page_preview", self.disable_web_page_preview)
            .insert_opt("reply_markup", self.reply_markup);
        params
    }
}

/// `sendChatAction` parameters.
pub fn chat_action_params(chat_id: impl Into<ChatId>, action: ChatAction) -> Params {
    let chat_id: ChatId = chat_id.into();
    Params::new()
        .with("chat_id", chat_id)
        .with("action", action.as_str())
}

/// `answerCallbackQuery` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    pub text: Option<String>,
    pub show_alert: bool,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: false,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn show_alert(mut self) -> Self {
        self.show_alert = true;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().with("callback_query_id", self.callback_query_id);
        params
            .insert_opt("text", self.text)
            .insert_flag("show_alert", self.show_alert);
        params
    }
}

/// `sendLocation` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SendLocation {
    pub chat_id: ChatId,
    pub latitude: f64,
    pub longitude: f64,
    pub disable_notification: bool,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<serde_json::Value>,
}

impl SendLocation {
    pub fn new(chat_id: impl Into<ChatId>, latitude: f64, longitude: f64) -> Self {
        Self {
            chat_id: chat_id.into(),
            latitude,
            longitude,
            disable_notification: false,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = true;
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new()
            .with("chat_id", self.chat_id)
            .with("latitude", self.latitude)
            .with("longitude", self.longitude);
        params
            .insert_flag("disable_notification", self.disable_notification)
            .insert_opt("reply_to_message_id", self.reply_to_message_id)
            .insert_opt("reply_markup", self.reply_markup);
        params
    }
}

/// Document to send: one already on the servers, or a new upload.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    FileId(String),
    Upload(InputFile),
}

/// `sendDocument` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SendDocument {
    pub chat_id: ChatId,
    pub document: DocumentSource,
    pub caption: Option<String>,
    pub disable_notification: bool,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<serde_json::Value>,
}

impl SendDocument {
    pub fn new(chat_id: impl Into<ChatId>, document: DocumentSource) -> Self {
        Self {
            chat_id: chat_id.into(),
            document,
            caption: None,
            disable_notification: false,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = true;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().with("chat_id", self.chat_id);
        match self.document {
            DocumentSource::FileId(id) => params.insert("document", id),
            DocumentSource::Upload(file) => params.insert("document", file),
        };
        params
            .insert_opt("caption", self.caption)
            .insert_flag("disable_notification", self.disable_notification)
            .insert_opt("reply_to_message_id", self.reply_to_message_id)
            .insert_opt("reply_markup", self.reply_markup);
        params
    }
}

/// `setWebhook` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SetWebhook {
    pub url: String,
    /// Public key certificate for self-signed setups.
    pub certificate: Option<InputFile>,
    pub max_connections: Option<u32>,
    pub allowed_updates: Option<Vec<String>>,
}

impl SetWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            certificate: None,
            max_connections: None,
            allowed_updates: None,
        }
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().with("url", self.url);
        params
            .insert_opt("certificate", self.certificate)
            .insert_opt("max_connections", self.max_connections)
            .insert_opt(
                "allowed_updates",
                self.allowed_updates.map(serde_json::Value::from),
            );
        params
    }
}

//! Inline mode and callback buttons.

use super::{Location, Message, User};
use serde::{Deserialize, Serialize};

/// An incoming inline query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub location: Option<Location>,
    pub query: String,
    pub offset: String,
}

/// A result of an inline query that was chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    pub location: Option<Location>,
    pub inline_message_id: Option<String>,
    pub query: String,
}

/// A press on a callback button of an inline keyboard.
///
/// `message` is set for buttons on messages sent by the bot,
/// `inline_message_id` for buttons on messages sent via the bot in inline mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Box<Message>>,
    pub inline_message_id: Option<String>,
    pub data: String,
}

//! Bot API object model.
//!
//! Every optional field is an `Option`; absence never collapses into a
//! zero value. Wire enums are closed: an unknown value fails the decode.
//! Docs: <https://core.telegram.org/bots/api#available-types>

mod chat;
mod inline;
mod media;
mod message;
mod update;
mod webhook;

#[cfg(test)]
mod tests;

pub use chat::*;
pub use inline::*;
pub use media::*;
pub use message::*;
pub use update::*;
pub use webhook::*;

use serde::{Deserialize, Serialize};

/// Text formatting mode for outgoing messages.
///
/// The API default (plain text) is expressed as `None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
    #[serde(rename = "HTML")]
    Html,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
        }
    }
}

/// Activity shown to the chat partner via `sendChatAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
}

impl ChatAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::UploadPhoto => "upload_photo",
            Self::RecordVideo => "record_video",
            Self::UploadVideo => "upload_video",
            Self::RecordAudio => "record_audio",
            Self::UploadAudio => "upload_audio",
            Self::UploadDocument => "upload_document",
            Self::FindLocation => "find_location",
        }
    }
}

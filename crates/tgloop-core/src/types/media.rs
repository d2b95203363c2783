//! Files, media, and places attached to messages.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One size of a photo or a file/sticker thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u64>,
}

/// An audio file to be treated as music.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    pub file_id: String,
    /// Duration in seconds, as sent by the API.
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    pub performer: Option<String>,
    pub title: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

impl Audio {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs.into())
    }
}

/// A general file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    #[serde(rename = "thumb")]
    pub thumbnail: Option<PhotoSize>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "thumb")]
    pub thumbnail: Option<PhotoSize>,
    pub emoji: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    #[serde(rename = "thumb")]
    pub thumbnail: Option<PhotoSize>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

impl Video {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs.into())
    }
}

/// A voice note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub file_id: String,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

impl Voice {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs.into())
    }
}

/// A phone contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub user_id: Option<i64>,
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub location: Location,
    pub title: String,
    pub address: String,
    pub foursquare_id: Option<String>,
}

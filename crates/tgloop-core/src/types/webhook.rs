use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current webhook status. `url` is empty while the bot uses `getUpdates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookInfo {
    pub url: String,
    pub has_custom_certificate: bool,
    pub pending_update_count: u64,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub last_error_date: Option<DateTime<Utc>>,
    pub last_error_message: Option<String>,
    pub max_connections: Option<u32>,
    pub allowed_updates: Option<Vec<String>>,
}

impl WebhookInfo {
    pub fn is_set(&self) -> bool {
        !self.url.is_empty()
    }
}

//! Default value functions used by serde for config deserialization.

pub fn default_handler() -> String {
    "simple".to_string()
}

pub fn default_limit() -> u32 {
    100
}

pub fn default_poll_timeout() -> u32 {
    5
}

pub fn default_backoff_max() -> u64 {
    60
}

pub fn default_api_host() -> String {
    "api.telegram.org".to_string()
}

pub fn default_scheme() -> String {
    "https".to_string()
}

pub fn default_request_timeout() -> u64 {
    30
}

pub fn default_log_level() -> String {
    "info".to_string()
}

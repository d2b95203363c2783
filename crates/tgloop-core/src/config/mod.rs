mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::TgError;
use defaults::*;

/// Largest batch `getUpdates` accepts.
pub const MAX_LIMIT: u32 = 100;

/// Log levels accepted in `[log] level`.
pub const LOG_LEVELS: &[&str] = &["debug", "info", "warning", "error"];

/// Headroom kept between the long-poll hold time and the socket timeout.
pub const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Bot identity and handler selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
    /// Name of the registered handler to run.
    #[serde(default = "default_handler")]
    pub handler: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            handler: default_handler(),
        }
    }
}

/// What the poller does after a failed fetch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryMode {
    /// Fetch again on the next cycle without waiting.
    #[default]
    Immediate,
    /// Wait 1s, 2s, 4s, ... up to `backoff_max_secs` between failed fetches.
    Backoff,
}

/// Retry behavior handed to the runner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    #[default]
    Immediate,
    Backoff { max: Duration },
}

/// How a batch containing an undecodable update is treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// The whole fetch fails and is retried; nothing is delivered.
    #[default]
    Strict,
    /// The bad update is logged and skipped; the rest is delivered.
    Lenient,
}

/// Long-polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Server-side long-poll hold time in seconds.
    #[serde(default = "default_poll_timeout")]
    pub timeout_secs: u32,
    /// Cursor to start from. Unset = the server's oldest undelivered update.
    #[serde(default)]
    pub initial_offset: Option<i64>,
    #[serde(default)]
    pub retry: RetryMode,
    #[serde(default = "default_backoff_max")]
    pub backoff_max_secs: u64,
    #[serde(default)]
    pub decode: DecodePolicy,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            timeout_secs: default_poll_timeout(),
            initial_offset: None,
            retry: RetryMode::default(),
            backoff_max_secs: default_backoff_max(),
            decode: DecodePolicy::default(),
        }
    }
}

impl PollingConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        match self.retry {
            RetryMode::Immediate => RetryPolicy::Immediate,
            RetryMode::Backoff => RetryPolicy::Backoff {
                max: Duration::from_secs(self.backoff_max_secs.max(1)),
            },
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// `https` in production; `http` is only useful against local fakes.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Client socket timeout. Must exceed the long-poll hold time.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Connect over IPv4 only.
    #[serde(default)]
    pub ipv4_only: bool,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            scheme: default_scheme(),
            request_timeout_secs: default_request_timeout(),
            ipv4_only: false,
            accept_invalid_certs: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Unset = stderr.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Override the long-poll hold time, raising the client socket timeout
    /// to at least `secs + REQUEST_TIMEOUT_MARGIN_SECS`.
    pub fn set_poll_timeout(&mut self, secs: u32) {
        self.polling.timeout_secs = secs;
        let floor = u64::from(secs) + REQUEST_TIMEOUT_MARGIN_SECS;
        self.transport.request_timeout_secs = self.transport.request_timeout_secs.max(floor);
    }

    /// Check cross-field constraints before anything starts.
    pub fn validate(&self) -> Result<(), TgError> {
        if self.bot.token.trim().is_empty() {
            return Err(TgError::Config(
                "bot token is empty. Pass --token, set TGLOOP_TOKEN, or set [bot] token".into(),
            ));
        }
        if self.polling.limit == 0 || self.polling.limit > MAX_LIMIT {
            return Err(TgError::Config(format!(
                "polling limit must be within 1..={MAX_LIMIT}, got {}",
                self.polling.limit
            )));
        }
        if self.transport.request_timeout_secs <= u64::from(self.polling.timeout_secs) {
            return Err(TgError::Config(format!(
                "request timeout ({}s) must exceed the long-poll timeout ({}s)",
                self.transport.request_timeout_secs, self.polling.timeout_secs
            )));
        }
        if !matches!(self.transport.scheme.as_str(), "http" | "https") {
            return Err(TgError::Config(format!(
                "unsupported scheme: {}",
                self.transport.scheme
            )));
        }
        if !LOG_LEVELS.contains(&self.log.level.as_str()) {
            return Err(TgError::Config(format!(
                "unknown log level '{}', expected one of {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TgError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::debug!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| TgError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| TgError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}

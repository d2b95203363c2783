use thiserror::Error;

/// Top-level error type for Bot API calls.
#[derive(Debug, Error)]
pub enum TgError {
    /// The API answered with `ok: false`.
    #[error("api error: {description}")]
    Api {
        /// The `description` field, verbatim.
        description: String,
        error_code: Option<i64>,
    },

    /// Connection, TLS, timeout, or a body that is not a JSON envelope.
    #[error("http error: {0}")]
    Http(String),

    /// The `result` did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The call could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl TgError {
    /// Whether this is an API-level failure rather than a transport one.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// The API error description, if this is an API-level failure.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Api { description, .. } => Some(description),
            _ => None,
        }
    }
}

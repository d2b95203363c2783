//! Response envelope: `{"ok": bool, "result"?: any, "description"?: string}`.

use crate::error::TgError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub result: Option<Value>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// Classified result of one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success with a method-specific payload.
    Payload(Value),
    /// Success acknowledged with `true` (or no result at all).
    Ack,
    /// `ok: false`.
    ApiError {
        description: String,
        error_code: Option<i64>,
    },
}

impl ApiResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, TgError> {
        serde_json::from_slice(body)
            .map_err(|e| TgError::Http(format!("response is not an api envelope: {e}")))
    }

    pub fn classify(self) -> Outcome {
        if !self.ok {
            return Outcome::ApiError {
                description: self.description.unwrap_or_default(),
                error_code: self.error_code,
            };
        }
        match self.result {
            None | Some(Value::Bool(true)) => Outcome::Ack,
            Some(v) => Outcome::Payload(v),
        }
    }

    pub fn into_result(self) -> Result<Value, TgError> {
        self.classify().into_result()
    }
}

impl Outcome {
    /// The payload for the caller to decode; `Ack` becomes `true`.
    pub fn into_result(self) -> Result<Value, TgError> {
        match self {
            Self::Payload(v) => Ok(v),
            Self::Ack => Ok(Value::Bool(true)),
            Self::ApiError {
                description,
                error_code,
            } => Err(TgError::Api {
                description,
                error_code,
            }),
        }
    }
}

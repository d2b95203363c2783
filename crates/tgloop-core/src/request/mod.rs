//! Call parameters.
//!
//! A parameter that is not set is not inserted at all, so "absent" and
//! "present but empty/false" stay distinct on the wire.

mod methods;

#[cfg(test)]
mod tests;

pub use methods::*;

use serde::Serialize;
use std::fmt;

/// Target chat: a numeric id or a `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        Self::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        Self::Username(username)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

/// A file uploaded in the request body.
#[derive(Clone, PartialEq, Eq)]
pub struct InputFile {
    pub file_name: String,
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl InputFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            mime_type: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

// File bodies can be megabytes; logs only get the name and size.
impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputFile({}, {} bytes)", self.file_name, self.data.len())
    }
}

/// One parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Sent as its JSON serialization (reply markup, allowed updates).
    Json(serde_json::Value),
    File(InputFile),
}

impl ParamValue {
    /// Form-field rendering of a scalar value. `None` for files.
    pub fn to_form_value(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Json(v) => Some(v.to_string()),
            Self::File(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<InputFile> for ParamValue {
    fn from(v: InputFile) -> Self {
        Self::File(v)
    }
}

impl From<ChatId> for ParamValue {
    fn from(v: ChatId) -> Self {
        match v {
            ChatId::Id(id) => Self::Integer(id),
            ChatId::Username(name) => Self::Text(name),
        }
    }
}

/// Ordered named parameters of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an earlier value with the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
        self
    }

    /// Set `name` only when `value` is present.
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.insert(name, v);
        }
        self
    }

    /// Set a flag only when it is `true`.
    pub fn insert_flag(&mut self, name: &str, flag: bool) -> &mut Self {
        if flag {
            self.insert(name, true);
        }
        self
    }

    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Whether the call needs a multipart body.
    pub fn has_files(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, v)| matches!(v, ParamValue::File(_)))
    }

    /// Scalar parameters as url-encoded form pairs. Files are skipped.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.to_form_value().map(|s| (n.clone(), s)))
            .collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

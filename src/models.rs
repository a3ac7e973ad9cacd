use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const VALID_STATES: [&str; 2] = ["open", "closed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugState {
    Open,
    Closed,
}

impl BugState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugState::Open => VALID_STATES[0],
            BugState::Closed => VALID_STATES[1],
        }
    }
}

impl fmt::Display for BugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid state '{0}'. Must be one of: {valid}", valid = VALID_STATES.join(", "))]
pub struct ParseStateError(pub String);

impl FromStr for BugState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(BugState::Open),
            "closed" => Ok(BugState::Closed),
            other => Err(ParseStateError(other.to_string())),
        }
    }
}

/// Why a bug payload could not be decoded. No partial bug is ever produced.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("bug payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("bug payload is not a JSON object: {0}")]
    Deserialization(String),

    #[error("bug payload does not map to a bug: {0}")]
    Mapping(#[source] serde_json::Error),
}

/// An immutable bug record.
///
/// The serde form is the flat payload `{"state", "timestamp", "comment"}` with
/// the timestamp as integer seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    state: BugState,
    #[serde(with = "chrono::serde::ts_seconds")]
    timestamp: DateTime<Utc>,
    comment: String,
}

impl Bug {
    /// Build a bug from typed fields. The timestamp is truncated to whole
    /// seconds, the precision of the JSON payload and the store.
    pub fn new(state: BugState, timestamp: DateTime<Utc>, comment: impl Into<String>) -> Self {
        Bug {
            state,
            timestamp: timestamp.trunc_subsecs(0),
            comment: comment.into(),
        }
    }

    /// Decode a bug from raw bytes, which must be UTF-8 text.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        Self::from_json(text)
    }

    /// Decode a bug from a flat JSON object.
    ///
    /// Anything that is not a JSON object fails with `Deserialization`; a
    /// missing field, a wrongly typed value or an unknown state string fails
    /// with `Mapping`. Extra keys are ignored.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DecodeError::Deserialization(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        if !value.is_object() {
            return Err(DecodeError::Deserialization(format!(
                "expected an object, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(DecodeError::Mapping)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn state(&self) -> BugState {
        self.state
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

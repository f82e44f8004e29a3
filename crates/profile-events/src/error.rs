//! Error types for topology notifications

use std::fmt;

#[derive(Debug)]
pub enum EventError {
    JsonParse(String),
    UnknownAction(String),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::JsonParse(msg) => write!(f, "JSON parse error: {}", msg),
            EventError::UnknownAction(action) => {
                write!(f, "Unknown broadcast action: {}", action)
            }
        }
    }
}

impl std::error::Error for EventError {}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::JsonParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EventError>;

//! Error types for the profile resolver
//!
//! Only construction can fail. Platform anomalies during resolution are
//! logged and degrade the result instead of surfacing here.

use std::fmt;

#[derive(Debug)]
pub enum ResolverError {
    InvalidUser(i32),
    Config(String),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::InvalidUser(id) => write!(f, "Invalid user id: {}", id),
            ResolverError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ResolverError {}

impl From<std::num::ParseIntError> for ResolverError {
    fn from(err: std::num::ParseIntError) -> Self {
        ResolverError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;

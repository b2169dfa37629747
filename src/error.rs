// src/error.rs

//! Unified error handling for the placement archive.

use std::fmt;

use thiserror::Error;

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure to load a dataset from its data source.
///
/// Cloneable so every caller sharing one in-flight load receives the
/// same error value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source answered with a non-success status
    #[error("failed to load {key}: status {status}")]
    Status { key: String, status: u16 },

    /// The request never produced a response
    #[error("failed to load {key}: {message}")]
    Transport { key: String, message: String },

    /// The body did not match the dataset schema
    #[error("failed to parse {key}: {message}")]
    Parse { key: String, message: String },
}

impl LoadError {
    pub fn status(key: impl Into<String>, status: u16) -> Self {
        Self::Status {
            key: key.into(),
            status,
        }
    }

    pub fn transport(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Dataset key the failure belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::Status { key, .. } | Self::Transport { key, .. } | Self::Parse { key, .. } => key,
        }
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Dataset load failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Detail lookup found no matching record
    #[error("{what} not found: {id}")]
    NotFound { what: String, id: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for a detail lookup.
    pub fn not_found(what: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::NotFound {
            what: what.into(),
            id: id.to_string(),
        }
    }

    /// Whether this error is a detail-lookup miss rather than a load failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_carries_key_and_status() {
        let err = LoadError::status("data/stats.json", 503);
        assert_eq!(err.key(), "data/stats.json");
        assert_eq!(err.to_string(), "failed to load data/stats.json: status 503");
    }

    #[test]
    fn load_error_converts_into_app_error() {
        let err: AppError = LoadError::parse("data/x.json", "expected array").into();
        assert!(matches!(err, AppError::Load(LoadError::Parse { .. })));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_distinct_from_load() {
        let err = AppError::not_found("company", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "company not found: 42");
    }
}

// src/error.rs

//! Unified error handling for the aggregation engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// SQLite operation failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Job source fetch error
    #[error("Fetch error from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// Channel publish error
    #[error("Publish error on {channel}: {message}")]
    Publish { channel: String, message: String },

    /// Store access error (lock poisoning, row decode failures)
    #[error("Store error: {0}")]
    Store(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error with the originating source name.
    pub fn fetch(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a publish error with the originating channel name.
    pub fn publish(channel: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Publish {
            channel: channel.into(),
            message: message.to_string(),
        }
    }

    /// Create a store access error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

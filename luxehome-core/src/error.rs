//! Structured error types for luxehome-core.
//!
//! Library code returns `LuxeError`; the CLI wraps it in `anyhow`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for luxehome-core operations
#[derive(Error, Debug)]
pub enum LuxeError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config {path:?}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Required setting missing or unusable
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl LuxeError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = LuxeError::config("DATABASE_URL not set");
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL not set");
    }

    #[test]
    fn json_error_keeps_context() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LuxeError::json("amenities", source);
        assert!(err.to_string().starts_with("JSON error at amenities:"));
    }
}

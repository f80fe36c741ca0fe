//! Error types for beat loading and engine construction

use std::path::PathBuf;

/// Error type for engine setup and beat source loading
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Beat source missing or unreadable at start
    #[error("beat source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// Malformed beat or config data
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

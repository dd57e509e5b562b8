//! Error types shared across StillCut crates.

use std::path::PathBuf;

/// Top-level error type for StillCut operations.
#[derive(Debug, thiserror::Error)]
pub enum StillcutError {
    #[error("Transcript parse error: {message}")]
    Parse { message: String },

    #[error("Completion service error: {message}")]
    Service { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StillcutError.
pub type StillcutResult<T> = Result<T, StillcutError>;

impl StillcutError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

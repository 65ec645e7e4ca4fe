//! Error handling for NAV feed extraction.
//!
//! Provides error types with context for feed retrieval, parsing,
//! serialization, and output artifact failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input feed not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to fetch feed from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("JSON serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("Failed to write output {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl NavError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }

    /// Create a fetch error for the given URL
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an output write error
    pub fn output_write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the pipeline can continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NavError::Serialization { .. })
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

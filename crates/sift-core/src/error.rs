//! Error types for Sift operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Sift crates. Uses `thiserror` for derive macros.
//!
//! Only fatal conditions are modelled here. Documents that are dropped or
//! re-routed during collection are logged, never returned as errors.

use thiserror::Error;

/// Errors that can occur in Sift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stemmer plugin could not be loaded.
    #[error("Stemmer plugin for '{language}' failed to load: {reason}")]
    Plugin { language: String, reason: String },

    /// The index library rejected a document or failed to build.
    #[error("Index error: {0}")]
    Index(String),

    /// An extension hook aborted the build.
    #[error("Hook error: {0}")]
    Hook(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a plugin load error for `language`.
    pub fn plugin(language: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Plugin {
            language: language.into(),
            reason: reason.into(),
        }
    }

    /// Create an index construction error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    /// Create a hook error.
    pub fn hook(msg: impl Into<String>) -> Self {
        Self::Hook(msg.into())
    }

    /// Whether this error came from the index library itself.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_) | Self::InvalidData(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using Sift's Error type.
pub type Result<T> = std::result::Result<T, Error>;

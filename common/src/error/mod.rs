//! Error types for the market scanner
//!
//! This module provides a unified error type shared by the exchange client,
//! the exporter and the dashboard. Network, parse and exchange API failures
//! are recoverable at the boundary of a single call; the rest abort the
//! operation that raised them.

use std::fmt::Display;
use thiserror::Error;

/// Scanner error type
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, timeout, TLS, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed response carrying a non-success status code
    #[error("API error (code {code}): {message}")]
    Api {
        /// Exchange status code as returned (text)
        code: String,
        /// Exchange message
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether a feed may swallow this error and continue with an empty result
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Parse(_) | Error::Api { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::Network(msg) => Error::Network(format!("{}: {}", context, msg)),
                Error::Parse(msg) => Error::Parse(format!("{}: {}", context, msg)),
                Error::Api { code, message } => Error::Api {
                    code,
                    message: format!("{}: {}", context, message),
                },
                Error::Csv(msg) => Error::Csv(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Io(e) => Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", context, e))),
                Error::Serialization(e) => Error::Serialization(e),
            }
        })
    }
}

/// Trait for converting other error types to our Error type
pub trait IntoError {
    /// Convert to Error
    fn into_error(self, message: &str) -> Error;
}

impl<E: std::error::Error> IntoError for E {
    fn into_error(self, message: &str) -> Error {
        Error::Internal(format!("{}: {}", message, self))
    }
}

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}

//! Error types for the ACME DNS solver
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the ACME DNS solver
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, DNS, TLS or body-read failure at the HTTP layer
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The provider answered with something other than JSON
    #[error("unexpected content type: {0}")]
    UnexpectedContentType(String),

    /// A JSON body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported by the provider in its `{error: {code, description}}` envelope
    #[error("error: {code} ({description})")]
    Api {
        /// HTTP status the provider answered with
        status: u16,
        /// Provider error code
        code: String,
        /// Human readable description
        description: String,
    },

    /// An outgoing request body could not be encoded
    #[error("failed to serialize request json: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Strict cleanup finished with some deletions failing
    #[error("cleanup incomplete: {failed} of {matched} matching records could not be deleted")]
    PartialCleanup {
        /// Number of deletes that failed
        failed: usize,
        /// Number of records that matched the filter
        matched: usize,
    },
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an unexpected content type error
    pub fn unexpected_content_type(content_type: impl Into<String>) -> Self {
        Self::UnexpectedContentType(content_type.into())
    }

    /// Create a provider-reported error
    pub fn api(status: u16, code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            description: description.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Provider error code, if this error came from the provider's envelope
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

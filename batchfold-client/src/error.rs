//! Error types for the batchfold client

use aws_sdk_batch::error::DisplayErrorContext;
use batchfold_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the batchfold client
#[derive(Debug, Error)]
pub enum ClientError {
    /// A call to an AWS service failed
    #[error("{service} request failed: {message}")]
    Service {
        /// Service that was called (e.g. "batch", "s3")
        service: &'static str,
        /// Error chain reported by the SDK
        message: String,
    },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No deployed stack was created from the fold template
    #[error("No deployed fold stack found; pass a stack name explicitly")]
    NoFoldStack,

    /// Input validation or output parsing failed
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Local file handling failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Wrap an SDK error, keeping its full source chain in the message
    pub fn service<E: std::error::Error>(service: &'static str, err: E) -> Self {
        Self::Service {
            service,
            message: DisplayErrorContext(err).to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

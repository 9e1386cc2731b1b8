//! Transport error types.

use thiserror::Error;

/// Errors from a single HTTP exchange with the backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (unreachable, timeout, TLS).
    #[error("Request failed: {0}")]
    Request(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// The response body could not be read.
    #[error("Failed to read response: {0}")]
    Body(String),

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl TransportError {
    /// HTTP status code, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! Team board error types.

use thiserror::Error;

use crate::report::TransportError;

/// Errors from fetching the latest-positions feed.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to parse latest tracks: {0}")]
    Parse(String),
}

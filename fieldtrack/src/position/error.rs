//! Error types for platform location capabilities.

use std::time::Duration;

use thiserror::Error;

/// Errors reported by a platform capability.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlatformError {
    /// The user did not grant the requested permission.
    #[error("permission not granted")]
    PermissionNotGranted,

    /// The capability is not available on this device.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// A single-shot fix did not resolve in time.
    #[error("location request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The watch handle is unknown to the platform (already removed).
    #[error("watcher {0} not found")]
    WatcherNotFound(String),

    /// Any other failure reported by the platform.
    #[error("{0}")]
    Failed(String),
}

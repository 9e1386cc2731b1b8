//! Session error types.

use thiserror::Error;

use super::state::SessionState;

/// Errors returned by session operations that reject a call.
///
/// Tracking failures never surface here; they are reported on the status
/// line instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The context can only be replaced while the session is idle.
    #[error("session context can only change while idle (session is {0})")]
    NotIdle(SessionState),
}

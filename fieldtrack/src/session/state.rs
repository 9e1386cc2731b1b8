//! Tracking session lifecycle states.

use std::fmt;

/// Lifecycle of a [`TrackingSession`](super::TrackingSession).
///
/// `Idle -> Starting -> Active -> Stopping -> Idle`. Watch and timer handles
/// only exist while `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Starting,
    Active,
    Stopping,
}

impl SessionState {
    pub fn is_idle(self) -> bool {
        self == SessionState::Idle
    }

    pub fn is_active(self) -> bool {
        self == SessionState::Active
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Active => "active",
            SessionState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

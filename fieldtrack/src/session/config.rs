//! Tracking session configuration.

use crate::position::{ForegroundConfig, WatchOptions};

/// Default capacity of the queue between the position channels and the
/// dispatcher.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Configuration for a [`TrackingSession`](super::TrackingSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Foreground poll interval and fix timeout.
    pub foreground: ForegroundConfig,
    /// Hints for the background watch.
    pub watch: WatchOptions,
    /// Open the platform settings page when background permission is denied.
    pub open_settings_on_denial: bool,
    /// Bounded queue size; samples beyond it are dropped.
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            foreground: ForegroundConfig::default(),
            watch: WatchOptions::default(),
            open_settings_on_denial: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

//! Core types shared by both position channels.

use std::fmt;
use std::time::Duration;

/// Default minimum interval hint for the background watch.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(15);

/// Default fastest interval hint for the background watch.
pub const DEFAULT_WATCH_FASTEST_INTERVAL: Duration = Duration::from_secs(5);

/// Shortest period accepted for a timer-driven channel.
///
/// `tokio::time::interval` panics on a zero period; shorter periods are
/// raised to this value.
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(10);

/// Period actually used for a timer, clamped to [`MIN_TIMER_PERIOD`].
pub fn timer_period(requested: Duration) -> Duration {
    if requested < MIN_TIMER_PERIOD {
        tracing::warn!(
            requested_ms = requested.as_millis() as u64,
            min_ms = MIN_TIMER_PERIOD.as_millis() as u64,
            "Timer period too short, clamping"
        );
        return MIN_TIMER_PERIOD;
    }
    requested
}

/// Title of the persistent notification shown while the background watch runs.
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Dispatch tracking";

/// Body of the persistent notification shown while the background watch runs.
pub const DEFAULT_NOTIFICATION_MESSAGE: &str = "Live location active";

/// A single observed location in decimal degrees.
///
/// Positions are plain values: they carry no identity and are consumed once
/// by the reporter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Create a position from latitude and longitude.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Result of a permission request against a platform capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The user has not answered yet; treated as not granted.
    Prompt,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Opaque identifier returned by the platform when a watch is registered.
///
/// Only the tracking session holds these; removal is keyed by the handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchHandle(String);

impl WatchHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hints passed to the platform when registering the background watch.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Minimum movement in meters between callbacks (0 disables spatial filtering).
    pub distance_filter_m: f64,

    /// Preferred interval between callbacks.
    pub interval: Duration,

    /// Fastest interval the platform may deliver callbacks at.
    pub fastest_interval: Duration,

    /// Stop the watch when the app process is terminated.
    pub stop_on_terminate: bool,

    /// Restart the watch after the device boots.
    pub start_on_boot: bool,

    /// Allow cached positions older than the interval.
    pub stale: bool,

    /// Let the watcher prompt for permission itself. The session requests
    /// permission up front, so this stays off.
    pub request_permissions: bool,

    /// Persistent notification title (Android foreground service).
    pub notification_title: String,

    /// Persistent notification body.
    pub notification_message: String,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            distance_filter_m: 0.0,
            interval: DEFAULT_WATCH_INTERVAL,
            fastest_interval: DEFAULT_WATCH_FASTEST_INTERVAL,
            stop_on_terminate: false,
            start_on_boot: true,
            stale: false,
            request_permissions: false,
            notification_title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            notification_message: DEFAULT_NOTIFICATION_MESSAGE.to_string(),
        }
    }
}

/// Options for a single-shot foreground fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

/// Which acquisition channel produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Periodic single-shot fetch while the app is in the foreground.
    Foreground,
    /// Continuous platform watch that survives backgrounding.
    Background,
}

impl Channel {
    /// Short tag used in status lines.
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Foreground => "FG",
            Channel::Background => "BG",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Foreground => f.write_str("foreground"),
            Channel::Background => f.write_str("background"),
        }
    }
}

/// Uniform "position observed" event emitted by either channel.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    Position { channel: Channel, position: Position },
    Error { channel: Channel, reason: String },
}

impl SourceEvent {
    pub fn channel(&self) -> Channel {
        match self {
            SourceEvent::Position { channel, .. } | SourceEvent::Error { channel, .. } => *channel,
        }
    }
}

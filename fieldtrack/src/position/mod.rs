//! Position Source Adapter
//!
//! Normalizes the two acquisition channels of a field device into one
//! "position observed" event stream:
//!
//! - **Background** - a continuous platform watch ([`BackgroundWatcher`]).
//!   Requires the "always" permission; keeps running while the app is
//!   backgrounded. Hints: no distance filter, 15s interval, 5s fastest.
//! - **Foreground** - a periodic single-shot fix ([`ForegroundPoller`]),
//!   every 10s with a 15s timeout. Keeps reporting when the watch is denied
//!   or throttled by the OS.
//!
//! Both channels report through a [`PositionSink`] (`on_position` /
//! `on_error`) into one bounded queue of [`SourceEvent`]s. The channels are
//! independent: near-simultaneous samples from both are forwarded as-is.
//!
//! # Architecture
//!
//! ```text
//! DevicePlatform (injected)
//!     │
//!     ├── BackgroundWatcher ──► PositionSink(Background) ─┐
//!     │                                                   ├─► mpsc<SourceEvent>
//!     └── ForegroundPoller  ──► PositionSink(Foreground) ─┘
//! ```
//!
//! The platform capabilities are traits in [`platform`]; the
//! [`SimulatedPlatform`] implements all of them for desktop runs.

mod background;
mod error;
mod foreground;
pub mod platform;
mod simulated;
mod sink;
mod types;

pub use background::BackgroundWatcher;
pub use error::PlatformError;
pub use foreground::{
    ForegroundConfig, ForegroundHandle, ForegroundPoller, DEFAULT_FOREGROUND_INTERVAL,
    DEFAULT_FOREGROUND_TIMEOUT,
};
pub use platform::{
    BackgroundLocation, DevicePlatform, ForegroundLocation, NotificationPermission,
    SettingsLauncher,
};
pub use simulated::SimulatedPlatform;
pub use sink::{PositionSink, NO_LOCATION};
pub use types::{
    timer_period, Channel, FixOptions, PermissionState, Position, SourceEvent, WatchHandle,
    WatchOptions,
    DEFAULT_NOTIFICATION_MESSAGE, DEFAULT_NOTIFICATION_TITLE, DEFAULT_WATCH_FASTEST_INTERVAL,
    DEFAULT_WATCH_INTERVAL, MIN_TIMER_PERIOD,
};

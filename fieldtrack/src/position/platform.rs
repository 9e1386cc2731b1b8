//! Platform capability traits.
//!
//! The device's location, notification and settings facilities are external
//! collaborators. They are injected into the tracking session through these
//! traits so the session can run against a real bridge, the
//! [`SimulatedPlatform`](super::SimulatedPlatform), or a deterministic fake in
//! tests.

use std::future::Future;

use super::error::PlatformError;
use super::sink::PositionSink;
use super::types::{FixOptions, PermissionState, Position, WatchHandle, WatchOptions};

/// Continuous background location watch.
pub trait BackgroundLocation: Send + Sync {
    /// Request the "always" location permission needed for background watching.
    fn request_background_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionState, PlatformError>> + Send;

    /// Register a watch. Every callback is forwarded into `sink`; errors do
    /// not end the watch.
    fn add_watcher(
        &self,
        options: WatchOptions,
        sink: PositionSink,
    ) -> impl Future<Output = Result<WatchHandle, PlatformError>> + Send;

    /// Remove a previously registered watch.
    ///
    /// Returns [`PlatformError::WatcherNotFound`] if the handle is unknown.
    fn remove_watcher(
        &self,
        handle: &WatchHandle,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

/// Single-shot foreground location fix.
pub trait ForegroundLocation: Send + Sync {
    /// Request the while-in-use location permission.
    fn request_location_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionState, PlatformError>> + Send;

    /// Fetch one position. May fail or time out.
    fn get_current_position(
        &self,
        options: &FixOptions,
    ) -> impl Future<Output = Result<Position, PlatformError>> + Send;
}

/// Runtime notification permission (Android 13+). Best-effort.
pub trait NotificationPermission: Send + Sync {
    fn request_notification_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionState, PlatformError>> + Send;
}

/// Deep link into the app's platform settings page. Best-effort.
pub trait SettingsLauncher: Send + Sync {
    fn open_settings(&self) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

/// Everything the tracking session needs from the device.
pub trait DevicePlatform:
    BackgroundLocation + ForegroundLocation + NotificationPermission + SettingsLauncher + 'static
{
}

impl<T> DevicePlatform for T where
    T: BackgroundLocation + ForegroundLocation + NotificationPermission + SettingsLauncher + 'static
{
}

//! Simulated device platform for desktop runs.
//!
//! Grants every permission and reports a fixed coordinate. Each registered
//! watch is a spawned task that emits the coordinate on the watch interval
//! until it is removed. Used by the CLI to exercise a backend without a phone.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use super::error::PlatformError;
use super::platform::{
    BackgroundLocation, ForegroundLocation, NotificationPermission, SettingsLauncher,
};
use super::sink::PositionSink;
use super::types::{
    timer_period, FixOptions, PermissionState, Position, WatchHandle, WatchOptions,
};

/// Platform that always reports the same position.
pub struct SimulatedPlatform {
    position: Position,
    next_id: AtomicU64,
    watchers: Mutex<HashMap<String, CancellationToken>>,
}

impl SimulatedPlatform {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            next_id: AtomicU64::new(1),
            watchers: Mutex::new(HashMap::new()),
        }
    }

    /// Number of watches currently registered.
    pub fn active_watchers(&self) -> usize {
        self.watchers.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl BackgroundLocation for SimulatedPlatform {
    async fn request_background_permission(&self) -> Result<PermissionState, PlatformError> {
        Ok(PermissionState::Granted)
    }

    async fn add_watcher(
        &self,
        options: WatchOptions,
        sink: PositionSink,
    ) -> Result<WatchHandle, PlatformError> {
        let id = format!("sim-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let cancellation = CancellationToken::new();

        self.watchers
            .lock()
            .map_err(|_| PlatformError::Failed("watcher registry poisoned".to_string()))?
            .insert(id.clone(), cancellation.clone());

        let position = self.position;
        let period = timer_period(options.interval);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = cancellation.cancelled() => break,
                    _ = ticker.tick() => {
                        sink.on_position(position);
                    }
                }
            }
        });

        Ok(WatchHandle::new(id))
    }

    async fn remove_watcher(&self, handle: &WatchHandle) -> Result<(), PlatformError> {
        let removed = self
            .watchers
            .lock()
            .map_err(|_| PlatformError::Failed("watcher registry poisoned".to_string()))?
            .remove(handle.as_str());

        match removed {
            Some(token) => {
                token.cancel();
                Ok(())
            }
            None => Err(PlatformError::WatcherNotFound(handle.to_string())),
        }
    }
}

impl ForegroundLocation for SimulatedPlatform {
    async fn request_location_permission(&self) -> Result<PermissionState, PlatformError> {
        Ok(PermissionState::Granted)
    }

    async fn get_current_position(&self, _options: &FixOptions) -> Result<Position, PlatformError> {
        Ok(self.position)
    }
}

impl NotificationPermission for SimulatedPlatform {
    async fn request_notification_permission(&self) -> Result<PermissionState, PlatformError> {
        Ok(PermissionState::Granted)
    }
}

impl SettingsLauncher for SimulatedPlatform {
    async fn open_settings(&self) -> Result<(), PlatformError> {
        tracing::info!("Simulated platform has no settings page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::position::{Channel, SourceEvent};

    #[tokio::test]
    async fn test_watch_emits_fixed_position() {
        let platform = SimulatedPlatform::new(Position::new(50.85, 4.35));
        let (tx, mut rx) = mpsc::channel(8);
        let options = WatchOptions {
            interval: Duration::from_millis(20),
            ..Default::default()
        };

        let handle = platform
            .add_watcher(options, PositionSink::new(Channel::Background, tx))
            .await
            .unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            SourceEvent::Position {
                channel: Channel::Background,
                position: Position::new(50.85, 4.35),
            }
        );

        assert_eq!(platform.active_watchers(), 1);
        platform.remove_watcher(&handle).await.unwrap();
        assert_eq!(platform.active_watchers(), 0);
    }

    #[tokio::test]
    async fn test_zero_interval_watch_keeps_running() {
        let platform = SimulatedPlatform::new(Position::new(50.85, 4.35));
        let (tx, mut rx) = mpsc::channel(8);
        let options = WatchOptions {
            interval: Duration::ZERO,
            ..Default::default()
        };

        let handle = platform
            .add_watcher(options, PositionSink::new(Channel::Background, tx))
            .await
            .unwrap();

        for _ in 0..2 {
            let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert!(matches!(event, SourceEvent::Position { .. }));
        }

        platform.remove_watcher(&handle).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_unknown_watcher() {
        let platform = SimulatedPlatform::new(Position::new(0.0, 0.0));
        let result = platform.remove_watcher(&WatchHandle::new("nope")).await;
        assert!(matches!(result, Err(PlatformError::WatcherNotFound(_))));
    }

    #[tokio::test]
    async fn test_handles_are_unique() {
        let platform = SimulatedPlatform::new(Position::new(0.0, 0.0));
        let (tx, _rx) = mpsc::channel(8);

        let a = platform
            .add_watcher(
                WatchOptions::default(),
                PositionSink::new(Channel::Background, tx.clone()),
            )
            .await
            .unwrap();
        let b = platform
            .add_watcher(
                WatchOptions::default(),
                PositionSink::new(Channel::Background, tx),
            )
            .await
            .unwrap();

        assert_ne!(a, b);
        platform.remove_watcher(&a).await.unwrap();
        platform.remove_watcher(&b).await.unwrap();
    }
}

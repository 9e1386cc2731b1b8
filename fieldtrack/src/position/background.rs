//! Background watch channel.
//!
//! Wraps a platform [`BackgroundLocation`] capability: permission first, then
//! registration of one continuous watch whose callbacks are forwarded into a
//! [`PositionSink`]. The returned [`WatchHandle`] is owned by the caller and
//! is the only way to remove the watch again.

use std::sync::Arc;

use super::error::PlatformError;
use super::platform::BackgroundLocation;
use super::sink::PositionSink;
use super::types::{WatchHandle, WatchOptions};

/// Background watch channel bound to one platform.
pub struct BackgroundWatcher<B: BackgroundLocation> {
    platform: Arc<B>,
    options: WatchOptions,
}

impl<B: BackgroundLocation> BackgroundWatcher<B> {
    pub fn new(platform: Arc<B>, options: WatchOptions) -> Self {
        Self { platform, options }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Request the background permission.
    ///
    /// Anything other than `Granted` maps to
    /// [`PlatformError::PermissionNotGranted`].
    pub async fn ensure_permission(&self) -> Result<(), PlatformError> {
        let state = self.platform.request_background_permission().await?;
        if state.is_granted() {
            Ok(())
        } else {
            tracing::info!(?state, "Background location permission not granted");
            Err(PlatformError::PermissionNotGranted)
        }
    }

    /// Register the watch.
    pub async fn register(&self, sink: PositionSink) -> Result<WatchHandle, PlatformError> {
        let handle = self.platform.add_watcher(self.options.clone(), sink).await?;
        tracing::info!(
            watcher = %handle,
            interval_secs = self.options.interval.as_secs(),
            fastest_interval_secs = self.options.fastest_interval.as_secs(),
            "Background watcher registered"
        );
        Ok(handle)
    }

    /// Remove a watch. An unknown handle counts as already removed.
    pub async fn remove(&self, handle: &WatchHandle) -> Result<(), PlatformError> {
        match self.platform.remove_watcher(handle).await {
            Ok(()) => {
                tracing::info!(watcher = %handle, "Background watcher removed");
                Ok(())
            }
            Err(PlatformError::WatcherNotFound(id)) => {
                tracing::debug!(watcher = %id, "Background watcher already removed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::sync::mpsc;

    use super::*;
    use crate::position::{Channel, PermissionState, Position, SourceEvent};

    struct FakeBackground {
        permission: PermissionState,
        watchers: Mutex<Vec<String>>,
    }

    impl FakeBackground {
        fn new(permission: PermissionState) -> Self {
            Self {
                permission,
                watchers: Mutex::new(Vec::new()),
            }
        }
    }

    impl BackgroundLocation for FakeBackground {
        async fn request_background_permission(&self) -> Result<PermissionState, PlatformError> {
            Ok(self.permission)
        }

        async fn add_watcher(
            &self,
            _options: WatchOptions,
            sink: PositionSink,
        ) -> Result<WatchHandle, PlatformError> {
            sink.on_position(Position::new(51.2, 4.4));
            let mut watchers = self.watchers.lock().unwrap();
            let id = format!("watch-{}", watchers.len() + 1);
            watchers.push(id.clone());
            Ok(WatchHandle::new(id))
        }

        async fn remove_watcher(&self, handle: &WatchHandle) -> Result<(), PlatformError> {
            let mut watchers = self.watchers.lock().unwrap();
            match watchers.iter().position(|w| w == handle.as_str()) {
                Some(index) => {
                    watchers.remove(index);
                    Ok(())
                }
                None => Err(PlatformError::WatcherNotFound(handle.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_granted_permission() {
        let watcher = BackgroundWatcher::new(
            Arc::new(FakeBackground::new(PermissionState::Granted)),
            WatchOptions::default(),
        );
        assert!(watcher.ensure_permission().await.is_ok());
    }

    #[tokio::test]
    async fn test_prompt_counts_as_not_granted() {
        let watcher = BackgroundWatcher::new(
            Arc::new(FakeBackground::new(PermissionState::Prompt)),
            WatchOptions::default(),
        );
        assert_eq!(
            watcher.ensure_permission().await,
            Err(PlatformError::PermissionNotGranted)
        );
    }

    #[tokio::test]
    async fn test_register_forwards_callbacks() {
        let watcher = BackgroundWatcher::new(
            Arc::new(FakeBackground::new(PermissionState::Granted)),
            WatchOptions::default(),
        );
        let (tx, mut rx) = mpsc::channel(4);

        let handle = watcher
            .register(PositionSink::new(Channel::Background, tx))
            .await
            .unwrap();

        assert_eq!(handle.as_str(), "watch-1");
        assert!(matches!(
            rx.try_recv().unwrap(),
            SourceEvent::Position {
                channel: Channel::Background,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let platform = Arc::new(FakeBackground::new(PermissionState::Granted));
        let watcher = BackgroundWatcher::new(platform.clone(), WatchOptions::default());
        let (tx, _rx) = mpsc::channel(4);

        let handle = watcher
            .register(PositionSink::new(Channel::Background, tx))
            .await
            .unwrap();

        assert!(watcher.remove(&handle).await.is_ok());
        assert!(watcher.remove(&handle).await.is_ok());
        assert!(platform.watchers.lock().unwrap().is_empty());
    }
}

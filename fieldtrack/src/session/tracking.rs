//! Tracking session state machine.
//!
//! Owns the foreground timer, the background watch handle and the dispatcher
//! for one `Active` period. All handles are created when entering `Active`
//! and released when returning to `Idle`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::config::SessionConfig;
use super::context::SessionContext;
use super::dispatch::{DispatchHandle, Dispatcher};
use super::error::SessionError;
use super::state::SessionState;
use crate::position::{
    BackgroundWatcher, Channel, DevicePlatform, ForegroundHandle, ForegroundPoller, PositionSink,
    WatchHandle,
};
use crate::report::{Reporter, TrackTransport, VALIDATION_POSITION};
use crate::status::StatusSink;

/// Status written when tracking ends.
pub const STOPPED_STATUS: &str = "Tracking stopped.";

/// What happened to the background channel during the last start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundStatus {
    NotStarted,
    Running,
    PermissionDenied,
    Failed,
}

impl BackgroundStatus {
    /// Suffix appended to the validation status when the watch is not running.
    fn validation_suffix(self) -> Option<&'static str> {
        match self {
            BackgroundStatus::Running | BackgroundStatus::NotStarted => None,
            BackgroundStatus::PermissionDenied => {
                Some(" | background location not granted, foreground only")
            }
            BackgroundStatus::Failed => Some(" | background watch unavailable, foreground only"),
        }
    }
}

/// Coordinates the position channels and the reporter.
///
/// At most one background watch and one foreground timer exist at any time.
/// `start` is a no-op unless `Idle`, `stop` is a no-op while `Idle`.
/// Delivery failures never change the state.
pub struct TrackingSession<P: DevicePlatform, T: TrackTransport + 'static> {
    platform: Arc<P>,
    watcher: BackgroundWatcher<P>,
    reporter: Reporter<T>,
    config: SessionConfig,
    status: StatusSink,
    context: Arc<SessionContext>,
    state: SessionState,
    background: BackgroundStatus,
    foreground: Option<ForegroundHandle>,
    watch: Option<WatchHandle>,
    /// Watches whose removal failed; retried on the next start, stop or drop.
    orphaned_watches: Vec<WatchHandle>,
    dispatcher: Option<DispatchHandle>,
}

impl<P: DevicePlatform, T: TrackTransport + 'static> TrackingSession<P, T> {
    /// Create an idle session. Status writes go to the reporter's sink.
    pub fn new(platform: Arc<P>, reporter: Reporter<T>, config: SessionConfig) -> Self {
        let watcher = BackgroundWatcher::new(Arc::clone(&platform), config.watch.clone());
        let status = reporter.status().clone();

        Self {
            platform,
            watcher,
            reporter,
            config,
            status,
            context: Arc::new(SessionContext::default()),
            state: SessionState::Idle,
            background: BackgroundStatus::NotStarted,
            foreground: None,
            watch: None,
            orphaned_watches: Vec::new(),
            dispatcher: None,
        }
    }

    /// Use `context` instead of the default team.
    pub fn with_context(mut self, context: SessionContext) -> Self {
        self.context = Arc::new(context);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn status(&self) -> &StatusSink {
        &self.status
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether a background watch is registered.
    pub fn has_watch(&self) -> bool {
        self.watch.is_some()
    }

    /// Number of watches still waiting for a successful removal.
    pub fn orphaned_watches(&self) -> usize {
        self.orphaned_watches.len()
    }

    /// Whether the foreground timer is running.
    pub fn has_foreground_timer(&self) -> bool {
        self.foreground.is_some()
    }

    /// Replace the team and incident from raw operator input.
    ///
    /// Only allowed while `Idle`; a running session keeps its context.
    pub fn set_context(&mut self, team: &str, incident_id: &str) -> Result<(), SessionError> {
        if !self.state.is_idle() {
            return Err(SessionError::NotIdle(self.state));
        }

        let context = SessionContext::from_input(team, incident_id);
        info!(context = %context, "Session context updated");
        self.context = Arc::new(context);
        Ok(())
    }

    /// Start tracking.
    ///
    /// Requests permissions, starts the foreground timer and (if permitted)
    /// the background watch, then performs one validation delivery. Returns
    /// once the validation result is on the status line.
    pub async fn start(&mut self) {
        if !self.state.is_idle() || self.foreground.is_some() || self.watch.is_some() {
            debug!(state = %self.state, "Start ignored, session not idle");
            return;
        }

        self.state = SessionState::Starting;
        info!(context = %self.context, "Tracking starting");

        self.remove_orphaned_watches().await;

        self.request_ancillary_permissions().await;
        let background_permitted = self.request_background_permission().await;

        let (tx, rx) = mpsc::channel(self.config.event_capacity.max(1));
        self.dispatcher = Some(
            Dispatcher::new(
                self.reporter.clone(),
                Arc::clone(&self.context),
                rx,
                self.status.clone(),
            )
            .start(),
        );

        self.state = SessionState::Active;

        self.foreground = Some(
            ForegroundPoller::new(
                Arc::clone(&self.platform),
                PositionSink::new(Channel::Foreground, tx.clone()),
                self.config.foreground.clone(),
            )
            .start(),
        );

        if background_permitted {
            self.register_watch(PositionSink::new(Channel::Background, tx))
                .await;
        }

        info!(
            foreground = self.has_foreground_timer(),
            background = self.has_watch(),
            "Tracking active"
        );

        self.validate().await;
    }

    /// Stop tracking. Safe to call repeatedly.
    pub async fn stop(&mut self) {
        if self.state.is_idle() {
            debug!("Stop ignored, session idle");
            return;
        }

        self.state = SessionState::Stopping;

        if let Some(foreground) = self.foreground.take() {
            foreground.cancel();
        }

        if let Some(handle) = self.watch.take() {
            self.orphaned_watches.push(handle);
        }
        self.remove_orphaned_watches().await;

        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.cancel();
        }

        self.background = BackgroundStatus::NotStarted;
        self.state = SessionState::Idle;
        info!("Tracking stopped");
        self.status.set(STOPPED_STATUS);
    }

    /// Start when idle, stop otherwise. The input only applies when starting.
    pub async fn toggle(&mut self, team: &str, incident_id: &str) -> SessionState {
        if self.state.is_idle() {
            // Cannot fail while idle
            let _ = self.set_context(team, incident_id);
            self.start().await;
        } else {
            self.stop().await;
        }
        self.state
    }

    /// Remove every pending watch, keeping the ones that fail again.
    async fn remove_orphaned_watches(&mut self) {
        let mut still_registered = Vec::new();
        for handle in std::mem::take(&mut self.orphaned_watches) {
            if let Err(e) = self.watcher.remove(&handle).await {
                warn!(
                    watcher = %handle,
                    error = %e,
                    "Failed to remove background watcher, will retry"
                );
                still_registered.push(handle);
            }
        }
        self.orphaned_watches = still_registered;
    }

    async fn request_ancillary_permissions(&self) {
        match self.platform.request_notification_permission().await {
            Ok(state) => debug!(?state, "Notification permission"),
            Err(e) => warn!(error = %e, "Notification permission request failed"),
        }

        match self.platform.request_location_permission().await {
            Ok(state) => debug!(?state, "Foreground location permission"),
            Err(e) => warn!(error = %e, "Foreground location permission request failed"),
        }
    }

    /// Returns whether the background watch may be registered.
    async fn request_background_permission(&mut self) -> bool {
        match self.watcher.ensure_permission().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Background location unavailable, foreground only");
                self.background = BackgroundStatus::PermissionDenied;
                self.status.set(format!("Background location: {}", e));

                if self.config.open_settings_on_denial {
                    if let Err(e) = self.platform.open_settings().await {
                        debug!(error = %e, "Could not open platform settings");
                    }
                }
                false
            }
        }
    }

    async fn register_watch(&mut self, sink: PositionSink) {
        self.status.set("Starting watcher…");
        match self.watcher.register(sink).await {
            Ok(handle) => {
                self.watch = Some(handle);
                self.background = BackgroundStatus::Running;
                self.status.set("Watcher started");
            }
            Err(e) => {
                warn!(error = %e, "Background watcher failed to start");
                self.background = BackgroundStatus::Failed;
                self.status.set(format!("Watcher failed to start: {}", e));
            }
        }
    }

    /// Deliver the fixed validation position via POST, then confirm via GET.
    async fn validate(&self) {
        self.reporter
            .validate(VALIDATION_POSITION, &self.context)
            .await;

        if let Some(suffix) = self.background.validation_suffix() {
            self.status.append(suffix);
        }
    }
}

impl<P: DevicePlatform, T: TrackTransport + 'static> Drop for TrackingSession<P, T> {
    fn drop(&mut self) {
        // Timer and dispatcher cancel themselves; watches need the platform
        let mut handles = std::mem::take(&mut self.orphaned_watches);
        handles.extend(self.watch.take());
        if handles.is_empty() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let platform = Arc::clone(&self.platform);
                runtime.spawn(async move {
                    for handle in handles {
                        if let Err(e) = platform.remove_watcher(&handle).await {
                            debug!(watcher = %handle, error = %e, "Watcher removal on drop failed");
                        }
                    }
                });
            }
            Err(_) => {
                warn!(
                    watchers = handles.len(),
                    "Session dropped outside a runtime, watchers left registered"
                );
            }
        }
    }
}

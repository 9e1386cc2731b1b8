//! Integration tests for the tracking session.
//!
//! These tests drive a full `TrackingSession` against a scripted device
//! platform and a recording HTTP transport that share one journal, so the
//! order of permission requests, watch registration and network calls is
//! observable:
//! - Start sequence and validation delivery
//! - Permission gate and foreground-only operation
//! - Fallback encoding and failure reporting
//! - Idempotent start/stop and watch teardown
//! - Live delivery from both channels
//!
//! Run with: `cargo test --test session_integration`

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldtrack::position::{
    BackgroundLocation, FixOptions, ForegroundLocation, NotificationPermission, PermissionState,
    PlatformError, Position, PositionSink, SettingsLauncher, WatchHandle, WatchOptions,
};
use fieldtrack::report::{Endpoint, FormField, Reporter, TrackTransport, TransportError};
use fieldtrack::session::{
    SessionConfig, SessionContext, SessionState, TrackingSession, STOPPED_STATUS,
};
use fieldtrack::status::StatusSink;

// ============================================================================
// Test Helpers
// ============================================================================

type Journal = Arc<Mutex<Vec<String>>>;

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

fn count(journal: &Journal, prefix: &str) -> usize {
    entries(journal)
        .iter()
        .filter(|e| e.starts_with(prefix))
        .count()
}

/// Device platform whose answers are scripted per test.
struct ScriptedPlatform {
    journal: Journal,
    background_permission: PermissionState,
    fail_add_watcher: bool,
    forget_watchers: bool,
    /// Number of upcoming `remove_watcher` calls that fail.
    failing_removals: AtomicUsize,
    fix: Position,
    next_id: AtomicU64,
    watchers: Mutex<HashMap<String, PositionSink>>,
}

impl ScriptedPlatform {
    fn new(journal: &Journal) -> Self {
        Self {
            journal: Arc::clone(journal),
            background_permission: PermissionState::Granted,
            fail_add_watcher: false,
            forget_watchers: false,
            failing_removals: AtomicUsize::new(0),
            fix: Position::new(50.85, 4.35),
            next_id: AtomicU64::new(1),
            watchers: Mutex::new(HashMap::new()),
        }
    }

    fn record(&self, entry: impl Into<String>) {
        self.journal.lock().unwrap().push(entry.into());
    }

    fn watcher_count(&self) -> usize {
        self.watchers.lock().unwrap().len()
    }

    /// Simulate a watch callback on every registered watcher.
    fn emit(&self, position: Option<Position>, error: Option<&str>) {
        for sink in self.watchers.lock().unwrap().values() {
            sink.on_watch_callback(position, error.map(str::to_string));
        }
    }
}

impl BackgroundLocation for ScriptedPlatform {
    async fn request_background_permission(&self) -> Result<PermissionState, PlatformError> {
        self.record("background-permission");
        Ok(self.background_permission)
    }

    async fn add_watcher(
        &self,
        options: WatchOptions,
        sink: PositionSink,
    ) -> Result<WatchHandle, PlatformError> {
        self.record(format!(
            "add-watcher interval={}s fastest={}s",
            options.interval.as_secs(),
            options.fastest_interval.as_secs()
        ));
        if self.fail_add_watcher {
            return Err(PlatformError::Unavailable("location services off".to_string()));
        }

        let id = format!("w{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        if !self.forget_watchers {
            self.watchers.lock().unwrap().insert(id.clone(), sink);
        }
        Ok(WatchHandle::new(id))
    }

    async fn remove_watcher(&self, handle: &WatchHandle) -> Result<(), PlatformError> {
        self.record("remove-watcher");
        if self
            .failing_removals
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(PlatformError::Failed("bridge busy".to_string()));
        }
        match self.watchers.lock().unwrap().remove(handle.as_str()) {
            Some(_) => Ok(()),
            None => Err(PlatformError::WatcherNotFound(handle.to_string())),
        }
    }
}

impl ForegroundLocation for ScriptedPlatform {
    async fn request_location_permission(&self) -> Result<PermissionState, PlatformError> {
        self.record("location-permission");
        Ok(PermissionState::Granted)
    }

    async fn get_current_position(&self, _options: &FixOptions) -> Result<Position, PlatformError> {
        self.record("current-position");
        Ok(self.fix)
    }
}

impl NotificationPermission for ScriptedPlatform {
    async fn request_notification_permission(&self) -> Result<PermissionState, PlatformError> {
        self.record("notification-permission");
        Err(PlatformError::Unavailable("not supported".to_string()))
    }
}

impl SettingsLauncher for ScriptedPlatform {
    async fn open_settings(&self) -> Result<(), PlatformError> {
        self.record("open-settings");
        Ok(())
    }
}

/// Transport that journals every exchange and answers with fixed statuses.
struct RecordingTransport {
    journal: Journal,
    form_status: u16,
    json_status: u16,
    get_status: u16,
}

impl RecordingTransport {
    fn new(journal: &Journal, form_status: u16, json_status: u16, get_status: u16) -> Self {
        Self {
            journal: Arc::clone(journal),
            form_status,
            json_status,
            get_status,
        }
    }

    fn answer(status: u16) -> Result<Vec<u8>, TransportError> {
        if (200..300).contains(&status) {
            Ok(br#"{"ok":true}"#.to_vec())
        } else {
            Err(TransportError::Status {
                status,
                body: "server error".to_string(),
            })
        }
    }
}

impl TrackTransport for RecordingTransport {
    async fn post_form(&self, url: &str, fields: &[FormField]) -> Result<Vec<u8>, TransportError> {
        let fields: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.journal
            .lock()
            .unwrap()
            .push(format!("POST multipart {url} {}", fields.join("&")));
        Self::answer(self.form_status)
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, TransportError> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("POST json {url} {json_body}"));
        Self::answer(self.json_status)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.journal.lock().unwrap().push(format!("GET {url}"));
        Self::answer(self.get_status)
    }
}

/// Config with timers slow enough that nothing fires during a test.
fn quiet_config() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.foreground.interval = Duration::from_secs(60);
    config
}

fn build(
    platform: ScriptedPlatform,
    transport: RecordingTransport,
    config: SessionConfig,
) -> (
    Arc<ScriptedPlatform>,
    TrackingSession<ScriptedPlatform, RecordingTransport>,
) {
    let platform = Arc::new(platform);
    let reporter = Reporter::new(
        Arc::new(transport),
        &Endpoint::new("https://dispatch.test"),
        StatusSink::new(),
    );
    let session = TrackingSession::new(Arc::clone(&platform), reporter, config);
    (platform, session)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(60)).await;
}

// ============================================================================
// Start sequence
// ============================================================================

#[tokio::test]
async fn test_end_to_end_with_permission_granted() {
    let journal = Journal::default();
    let (_platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );
    session.set_context("ploeg-1", "").unwrap();

    session.start().await;

    assert_eq!(
        entries(&journal),
        vec![
            "notification-permission".to_string(),
            "location-permission".to_string(),
            "background-permission".to_string(),
            "add-watcher interval=15s fastest=5s".to_string(),
            "POST multipart https://dispatch.test/api/track.php team=ploeg-1&incident_id=&lat=51.2194&lon=4.4025".to_string(),
            "GET https://dispatch.test/api/track.php?team=ploeg-1&lat=51.2194&lon=4.4025".to_string(),
        ]
    );
    assert_eq!(session.state(), SessionState::Active);
    assert!(session.has_foreground_timer());
    assert!(session.has_watch());

    let status = session.status().current();
    assert_eq!(status, "POST ok | GET ok");
}

#[tokio::test]
async fn test_http_500_everywhere_keeps_session_active() {
    let journal = Journal::default();
    let (_platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 500, 500, 500),
        quiet_config(),
    );

    session.start().await;

    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(count(&journal, "POST multipart"), 1);
    assert_eq!(count(&journal, "POST json"), 1);
    assert_eq!(count(&journal, "GET"), 1);
    assert_eq!(
        session.status().current(),
        "POST failed: multipart: HTTP 500; json: HTTP 500 | GET failed: HTTP 500"
    );
}

#[tokio::test]
async fn test_json_fallback_in_validation() {
    let journal = Journal::default();
    let (_platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 415, 200, 200),
        quiet_config(),
    );

    session.start().await;

    assert_eq!(count(&journal, "POST"), 2);
    let json_post = entries(&journal)
        .into_iter()
        .find(|e| e.starts_with("POST json"))
        .unwrap();
    assert!(json_post.contains(r#""team":"ploeg-1""#));
    assert!(json_post.contains(r#""lat":51.2194"#));
    assert_eq!(session.status().current(), "POST ok (json) | GET ok");
}

#[tokio::test]
async fn test_blank_team_reports_default() {
    let journal = Journal::default();
    let (_platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );
    session.set_context("   ", " INC-12 ").unwrap();

    session.start().await;

    assert_eq!(session.context(), &SessionContext::from_input("ploeg-1", "INC-12"));
    let post = entries(&journal)
        .into_iter()
        .find(|e| e.starts_with("POST multipart"))
        .unwrap();
    assert!(post.contains("team=ploeg-1&incident_id=INC-12"));
}

// ============================================================================
// Permission gate
// ============================================================================

#[tokio::test]
async fn test_background_denied_runs_foreground_only() {
    let journal = Journal::default();
    let mut platform = ScriptedPlatform::new(&journal);
    platform.background_permission = PermissionState::Denied;
    let (platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;

    assert_eq!(count(&journal, "add-watcher"), 0);
    assert_eq!(count(&journal, "open-settings"), 1);
    assert_eq!(platform.watcher_count(), 0);
    assert!(!session.has_watch());
    assert!(session.has_foreground_timer());
    assert_eq!(session.state(), SessionState::Active);

    let status = session.status().current();
    assert!(status.starts_with("POST ok | GET ok"), "status: {status}");
    assert!(status.contains("not granted"), "status: {status}");
}

#[tokio::test]
async fn test_prompt_state_counts_as_denied() {
    let journal = Journal::default();
    let mut platform = ScriptedPlatform::new(&journal);
    platform.background_permission = PermissionState::Prompt;
    let mut config = quiet_config();
    config.open_settings_on_denial = false;
    let (_platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        config,
    );

    session.start().await;

    assert_eq!(count(&journal, "add-watcher"), 0);
    assert_eq!(count(&journal, "open-settings"), 0);
    assert!(session.status().current().contains("not granted"));
}

#[tokio::test]
async fn test_watch_registration_failure_is_not_fatal() {
    let journal = Journal::default();
    let mut platform = ScriptedPlatform::new(&journal);
    platform.fail_add_watcher = true;
    let (_platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;

    assert_eq!(session.state(), SessionState::Active);
    assert!(!session.has_watch());
    assert!(session.has_foreground_timer());
    assert!(session
        .status()
        .current()
        .ends_with(" | background watch unavailable, foreground only"));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_double_start_registers_once() {
    let journal = Journal::default();
    let (platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;
    session.start().await;

    assert_eq!(count(&journal, "add-watcher"), 1);
    assert_eq!(count(&journal, "background-permission"), 1);
    assert_eq!(platform.watcher_count(), 1);
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let journal = Journal::default();
    let (platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;
    session.stop().await;
    session.stop().await;

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(count(&journal, "remove-watcher"), 1);
    assert_eq!(platform.watcher_count(), 0);
    assert!(!session.has_watch());
    assert!(!session.has_foreground_timer());
    assert_eq!(session.status().current(), STOPPED_STATUS);
}

#[tokio::test]
async fn test_stop_while_idle_is_noop() {
    let journal = Journal::default();
    let (_platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.stop().await;

    assert!(entries(&journal).is_empty());
    assert_eq!(session.status().current(), "");
}

#[tokio::test]
async fn test_stop_tolerates_already_removed_watch() {
    let journal = Journal::default();
    let mut platform = ScriptedPlatform::new(&journal);
    platform.forget_watchers = true;
    let (_platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;
    session.stop().await;

    assert_eq!(count(&journal, "remove-watcher"), 1);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.status().current(), STOPPED_STATUS);
}

#[tokio::test]
async fn test_failed_watch_removal_is_retried() {
    let journal = Journal::default();
    let platform = ScriptedPlatform::new(&journal);
    platform.failing_removals.store(1, Ordering::SeqCst);
    let (platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;
    session.stop().await;

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(platform.watcher_count(), 1);
    assert_eq!(session.orphaned_watches(), 1);

    // The next start clears the leftover before registering a new watch
    session.start().await;
    assert_eq!(session.orphaned_watches(), 0);
    assert_eq!(platform.watcher_count(), 1);

    session.stop().await;
    assert_eq!(platform.watcher_count(), 0);
    assert_eq!(count(&journal, "remove-watcher"), 3);
}

#[tokio::test]
async fn test_repeated_failed_removals_do_not_accumulate_watches() {
    let journal = Journal::default();
    let platform = ScriptedPlatform::new(&journal);
    platform.failing_removals.store(3, Ordering::SeqCst);
    let (platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    for _ in 0..3 {
        session.start().await;
        session.stop().await;
    }
    session.stop().await;
    session.start().await;
    session.stop().await;

    assert_eq!(session.orphaned_watches(), 0);
    assert_eq!(platform.watcher_count(), 0);
}

#[tokio::test]
async fn test_drop_removes_orphaned_watches() {
    let journal = Journal::default();
    let platform = ScriptedPlatform::new(&journal);
    platform.failing_removals.store(1, Ordering::SeqCst);
    let (platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;
    session.stop().await;
    assert_eq!(platform.watcher_count(), 1);

    drop(session);
    settle().await;

    assert_eq!(platform.watcher_count(), 0);
}

#[tokio::test]
async fn test_restart_after_stop() {
    let journal = Journal::default();
    let (platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );

    session.start().await;
    session.stop().await;
    session.set_context("ploeg-2", "").unwrap();
    session.start().await;

    assert_eq!(count(&journal, "add-watcher"), 2);
    assert_eq!(platform.watcher_count(), 1);
    assert_eq!(session.context().team(), "ploeg-2");
}

// ============================================================================
// Live delivery
// ============================================================================

#[tokio::test]
async fn test_watch_callbacks_are_delivered() {
    let journal = Journal::default();
    let (platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );
    session.start().await;

    platform.emit(Some(Position::new(51.05, 3.72)), None);
    settle().await;

    let last = entries(&journal).pop().unwrap();
    assert!(last.contains("lat=51.05&lon=3.72"), "last: {last}");
    assert!(session.status().current().starts_with("BG sent @ "));
}

#[tokio::test]
async fn test_watch_errors_keep_watch_registered() {
    let journal = Journal::default();
    let (platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );
    session.start().await;

    platform.emit(None, Some("provider disabled"));
    settle().await;
    assert_eq!(session.status().current(), "BG error: provider disabled");

    platform.emit(None, None);
    settle().await;
    assert_eq!(session.status().current(), "BG error: no location");

    assert!(session.has_watch());
    assert_eq!(platform.watcher_count(), 1);
}

#[tokio::test]
async fn test_foreground_timer_delivers() {
    let journal = Journal::default();
    let mut config = SessionConfig::default();
    config.foreground.interval = Duration::from_millis(25);
    let mut platform = ScriptedPlatform::new(&journal);
    platform.background_permission = PermissionState::Denied;
    let (_platform, mut session) = build(
        platform,
        RecordingTransport::new(&journal, 200, 200, 200),
        config,
    );

    session.start().await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    session.stop().await;

    let fixes = count(&journal, "current-position");
    assert!(fixes >= 2, "fixes: {fixes}");
    let live_posts = entries(&journal)
        .iter()
        .filter(|e| e.contains("lat=50.85&lon=4.35"))
        .count();
    assert!(live_posts >= 1, "live posts: {live_posts}");

    // No ticks after stop
    let after_stop = count(&journal, "current-position");
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(count(&journal, "current-position"), after_stop);
}

#[tokio::test]
async fn test_delivery_failure_does_not_stop_session() {
    let journal = Journal::default();
    let (platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 503, 503, 200),
        quiet_config(),
    );
    session.start().await;

    platform.emit(Some(Position::new(51.0, 4.0)), None);
    settle().await;

    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(
        session.status().current(),
        "Network error (json): HTTP 503"
    );
}

#[tokio::test]
async fn test_status_subscribers_see_stop() {
    let journal = Journal::default();
    let (_platform, mut session) = build(
        ScriptedPlatform::new(&journal),
        RecordingTransport::new(&journal, 200, 200, 200),
        quiet_config(),
    );
    let mut rx = session.status().subscribe();

    session.start().await;
    session.stop().await;

    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), STOPPED_STATUS);
}

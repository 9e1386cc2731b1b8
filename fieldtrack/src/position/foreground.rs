//! Foreground polling channel.
//!
//! The [`ForegroundPoller`] performs a single-shot high-accuracy fix on a
//! fixed period and forwards the result into a [`PositionSink`]. It is the
//! fallback for devices where the background watch is denied or throttled.
//!
//! # Design
//!
//! Follows the same daemon pattern as the other adapters in this crate:
//! - `new()` + `start()` spawns an async task
//! - `tokio::time::interval` drives the ticks, first tick after one period
//! - a `CancellationToken` stops future ticks
//!
//! Every tick starts its own fix, so the schedule is strictly periodic even
//! when fixes are slow. A failed or timed-out fix emits an error for that
//! tick only. Fixes may overlap when the timeout exceeds the period; a
//! period shorter than [`MIN_TIMER_PERIOD`](super::MIN_TIMER_PERIOD) is
//! clamped.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::error::PlatformError;
use super::platform::ForegroundLocation;
use super::sink::PositionSink;
use super::types::{timer_period, FixOptions, Position};

/// Default period between foreground fixes.
pub const DEFAULT_FOREGROUND_INTERVAL: Duration = Duration::from_secs(10);

/// Default timeout for a single foreground fix.
pub const DEFAULT_FOREGROUND_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the foreground channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ForegroundConfig {
    /// Period between ticks.
    pub interval: Duration,

    /// Timeout applied to each fix.
    pub timeout: Duration,
}

impl ForegroundConfig {
    pub fn fix_options(&self) -> FixOptions {
        FixOptions {
            high_accuracy: true,
            timeout: self.timeout,
        }
    }
}

impl Default for ForegroundConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FOREGROUND_INTERVAL,
            timeout: DEFAULT_FOREGROUND_TIMEOUT,
        }
    }
}

/// Foreground polling daemon.
pub struct ForegroundPoller<L: ForegroundLocation> {
    locator: Arc<L>,
    sink: PositionSink,
    config: ForegroundConfig,
}

impl<L: ForegroundLocation + 'static> ForegroundPoller<L> {
    pub fn new(locator: Arc<L>, sink: PositionSink, config: ForegroundConfig) -> Self {
        Self {
            locator,
            sink,
            config,
        }
    }

    /// Spawn the poll loop and return the handle that owns its timer.
    pub fn start(self) -> ForegroundHandle {
        let cancellation = CancellationToken::new();
        let token = cancellation.clone();
        let task = tokio::spawn(async move {
            self.run(token).await;
        });

        ForegroundHandle { cancellation, task }
    }

    async fn run(self, cancellation: CancellationToken) {
        let period = timer_period(self.config.interval);
        tracing::debug!(
            interval_ms = period.as_millis() as u64,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Foreground poller started"
        );

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() fires immediately; the first fix is due one period later
        ticker.tick().await;

        // Fixes run detached from the tick loop so a hanging fix never delays
        // the next tick. Each one is bounded by the fix timeout.
        let mut fixes = JoinSet::new();

        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }

            while fixes.try_join_next().is_some() {}

            if self.sink.is_closed() {
                tracing::debug!("Foreground event queue closed, stopping");
                break;
            }

            self.spawn_fix(&mut fixes);
        }

        fixes.abort_all();
        tracing::debug!("Foreground poller stopped");
    }

    fn spawn_fix(&self, fixes: &mut JoinSet<()>) {
        let locator = Arc::clone(&self.locator);
        let sink = self.sink.clone();
        let config = self.config.clone();
        fixes.spawn(async move {
            poll_once(locator.as_ref(), &sink, &config).await;
        });
    }
}

/// Perform one fix and forward the result.
async fn poll_once<L: ForegroundLocation>(
    locator: &L,
    sink: &PositionSink,
    config: &ForegroundConfig,
) {
    match fetch(locator, config).await {
        Ok(position) => {
            tracing::trace!(%position, "Foreground fix");
            sink.on_position(position);
        }
        Err(e) => {
            tracing::debug!(error = %e, "Foreground fix failed");
            sink.on_error(e.to_string());
        }
    }
}

async fn fetch<L: ForegroundLocation>(
    locator: &L,
    config: &ForegroundConfig,
) -> Result<Position, PlatformError> {
    let options = config.fix_options();
    match tokio::time::timeout(config.timeout, locator.get_current_position(&options)).await {
        Ok(result) => result,
        Err(_) => Err(PlatformError::Timeout(config.timeout)),
    }
}

/// Owner of a running foreground poll loop.
///
/// Cancelling is idempotent; dropping the handle cancels as well, so the
/// timer never outlives its owner.
#[derive(Debug)]
pub struct ForegroundHandle {
    cancellation: CancellationToken,
    task: JoinHandle<()>,
}

impl ForegroundHandle {
    /// Stop future ticks.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ForegroundHandle {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

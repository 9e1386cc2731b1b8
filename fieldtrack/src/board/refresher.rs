//! Periodic team board refresh daemon.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::feed::LatestTracksClient;
use super::team_board::TeamBoard;
use crate::report::TrackTransport;

/// Default refresh interval (5 seconds).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Team board configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub refresh_interval: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Spawns a task that refreshes `board` immediately and then every
/// `interval` until `cancellation` fires.
///
/// A failed fetch is logged and the board keeps its previous positions.
pub fn spawn_board_refresher<T: TrackTransport + 'static>(
    client: LatestTracksClient<T>,
    board: Arc<TeamBoard>,
    interval: Duration,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = cancellation.cancelled() => break,
                _ = refresh(&client, &board) => {}
            }
        }

        tracing::debug!("Team board refresher stopped");
    })
}

/// Fetch once and merge into the board.
pub async fn refresh<T: TrackTransport>(client: &LatestTracksClient<T>, board: &TeamBoard) {
    match client.fetch().await {
        Ok(rows) => {
            let summary = board.apply(rows);
            tracing::debug!(
                inserted = summary.inserted,
                updated = summary.updated,
                teams = board.len(),
                "Team board refreshed"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Team board refresh failed");
        }
    }
}

//! Client for the latest-positions feed.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::error::BoardError;
use crate::position::Position;
use crate::report::{Endpoint, TrackTransport};

/// Last known position of one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPosition {
    pub team: String,
    pub position: Position,
}

/// Response of `tracks_latest.php`.
///
/// The backend emits coordinates either as JSON numbers or as numeric
/// strings depending on the database driver, so rows are kept loosely typed
/// until they are validated.
#[derive(Deserialize)]
struct LatestTracksResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    rows: Vec<RawRow>,
}

#[derive(Deserialize)]
struct RawRow {
    #[serde(default)]
    team: Value,
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lon: Value,
}

impl RawRow {
    fn into_team_position(self) -> Option<TeamPosition> {
        let team = match self.team {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if team.is_empty() {
            return None;
        }

        let position = Position::new(coordinate(&self.lat)?, coordinate(&self.lon)?);
        position.is_finite().then_some(TeamPosition { team, position })
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a feed body. `ok: false` yields no rows; invalid rows are skipped.
pub fn parse_latest_tracks(body: &[u8]) -> Result<Vec<TeamPosition>, BoardError> {
    let response: LatestTracksResponse =
        serde_json::from_slice(body).map_err(|e| BoardError::Parse(e.to_string()))?;

    if !response.ok {
        tracing::debug!("Latest tracks feed returned ok=false");
        return Ok(Vec::new());
    }

    let total = response.rows.len();
    let rows: Vec<TeamPosition> = response
        .rows
        .into_iter()
        .filter_map(RawRow::into_team_position)
        .collect();

    if rows.len() < total {
        tracing::debug!(total, valid = rows.len(), "Skipped invalid feed rows");
    }

    Ok(rows)
}

/// Fetches `GET {endpoint}/api/tracks_latest.php`.
pub struct LatestTracksClient<T> {
    transport: Arc<T>,
    url: String,
}

impl<T: TrackTransport> LatestTracksClient<T> {
    pub fn new(transport: Arc<T>, endpoint: &Endpoint) -> Self {
        Self {
            transport,
            url: endpoint.tracks_latest_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the last known position of every team.
    pub async fn fetch(&self) -> Result<Vec<TeamPosition>, BoardError> {
        let body = self.transport.get(&self.url).await?;
        let rows = parse_latest_tracks(&body)?;
        tracing::debug!(teams = rows.len(), "Latest tracks fetched");
        Ok(rows)
    }
}

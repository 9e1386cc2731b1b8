//! Last-known position per team.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::feed::TeamPosition;
use crate::position::Position;

/// Counts from one [`TeamBoard::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub inserted: usize,
    pub updated: usize,
}

/// One marker per team, moved in place on every refresh.
///
/// Teams missing from a later feed keep their last position.
#[derive(Debug, Default)]
pub struct TeamBoard {
    teams: RwLock<HashMap<String, Position>>,
}

impl TeamBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge feed rows into the board.
    pub fn apply(&self, rows: impl IntoIterator<Item = TeamPosition>) -> ApplySummary {
        let mut summary = ApplySummary::default();
        let mut teams = self.write();

        for row in rows {
            match teams.insert(row.team, row.position) {
                Some(_) => summary.updated += 1,
                None => summary.inserted += 1,
            }
        }

        summary
    }

    pub fn get(&self, team: &str) -> Option<Position> {
        self.read().get(team).copied()
    }

    /// All teams, sorted by name.
    pub fn snapshot(&self) -> Vec<TeamPosition> {
        let mut rows: Vec<TeamPosition> = self
            .read()
            .iter()
            .map(|(team, position)| TeamPosition {
                team: team.clone(),
                position: *position,
            })
            .collect();
        rows.sort_by(|a, b| a.team.cmp(&b.team));
        rows
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panicking writer cannot leave a half-applied entry, so poison is ignored
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Position>> {
        self.teams.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Position>> {
        self.teams.write().unwrap_or_else(|e| e.into_inner())
    }
}

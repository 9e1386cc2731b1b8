//! Session context: who is reporting, and for which incident.

use std::fmt;

/// Team used when the operator leaves the team field blank.
pub const DEFAULT_TEAM: &str = "ploeg-1";

/// Team and incident tag attached to every delivered position.
///
/// Replaced only at the `Idle -> Starting` boundary; shared read-only with
/// the reporter while tracking runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    team: String,
    incident_id: String,
}

impl SessionContext {
    /// Build a context from raw operator input.
    ///
    /// Both fields are trimmed; a blank team falls back to [`DEFAULT_TEAM`],
    /// a blank incident stays blank.
    pub fn from_input(team: &str, incident_id: &str) -> Self {
        let team = team.trim();
        Self {
            team: if team.is_empty() {
                DEFAULT_TEAM.to_string()
            } else {
                team.to_string()
            },
            incident_id: incident_id.trim().to_string(),
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn incident_id(&self) -> &str {
        &self.incident_id
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::from_input(DEFAULT_TEAM, "")
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.incident_id.is_empty() {
            f.write_str(&self.team)
        } else {
            write!(f, "{} (incident {})", self.team, self.incident_id)
        }
    }
}

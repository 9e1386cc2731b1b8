//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Backend settings
    pub endpoint: EndpointSettings,
    /// Default team and incident
    pub session: SessionSettings,
    /// Position channel settings
    pub tracking: TrackingSettings,
    /// Team board settings
    pub board: BoardSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Dispatch backend configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSettings {
    /// Base URL, without the `api/` path
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Session context used when the CLI gets no `--team`/`--incident`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub team: String,
    /// May be empty
    pub incident_id: String,
}

/// Foreground poller and background watch configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    pub foreground_interval_secs: u64,
    pub foreground_timeout_secs: u64,
    pub watch_interval_secs: u64,
    pub watch_fastest_interval_secs: u64,
    /// Open the platform settings when background permission is denied
    pub open_settings_on_denial: bool,
}

/// Team board configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    pub refresh_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

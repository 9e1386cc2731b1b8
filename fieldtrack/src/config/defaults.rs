//! Default values and constants for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::logging::DEFAULT_LOG_FILE;
use crate::session::DEFAULT_TEAM;

/// Default dispatch backend.
pub const DEFAULT_BASE_URL: &str = "https://dispatch.example.org";

/// Default HTTP request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default foreground poll interval (seconds).
pub const DEFAULT_FOREGROUND_INTERVAL_SECS: u64 = 10;

/// Default foreground fix timeout (seconds).
pub const DEFAULT_FOREGROUND_TIMEOUT_SECS: u64 = 15;

/// Default background watch interval (seconds).
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 15;

/// Default fastest background watch interval (seconds).
pub const DEFAULT_WATCH_FASTEST_INTERVAL_SECS: u64 = 5;

/// Default team board refresh interval (seconds).
pub const DEFAULT_BOARD_REFRESH_SECS: u64 = 5;

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = config_directory();

        Self {
            endpoint: EndpointSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            session: SessionSettings {
                team: DEFAULT_TEAM.to_string(),
                incident_id: String::new(),
            },
            tracking: TrackingSettings {
                foreground_interval_secs: DEFAULT_FOREGROUND_INTERVAL_SECS,
                foreground_timeout_secs: DEFAULT_FOREGROUND_TIMEOUT_SECS,
                watch_interval_secs: DEFAULT_WATCH_INTERVAL_SECS,
                watch_fastest_interval_secs: DEFAULT_WATCH_FASTEST_INTERVAL_SECS,
                open_settings_on_denial: true,
            },
            board: BoardSettings {
                refresh_interval_secs: DEFAULT_BOARD_REFRESH_SECS,
            },
            logging: LoggingSettings {
                file: config_dir.join("logs").join(DEFAULT_LOG_FILE),
            },
        }
    }
}

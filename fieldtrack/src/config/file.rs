//! Configuration file handling for ~/.fieldtrack/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::board::BoardConfig;
use crate::logging::LoggingConfig;
use crate::position::{ForegroundConfig, WatchOptions};
use crate::report::{Endpoint, ReporterConfig};
use crate::session::{SessionConfig, SessionContext};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.fieldtrack/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.fieldtrack/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
        }
        Ok(path)
    }

    /// Backend endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(&self.endpoint.base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.endpoint.request_timeout_secs)
    }

    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig::new(self.endpoint()).with_request_timeout(self.request_timeout())
    }

    /// Session context from the configured team and incident.
    pub fn session_context(&self) -> SessionContext {
        SessionContext::from_input(&self.session.team, &self.session.incident_id)
    }

    pub fn session_config(&self) -> SessionConfig {
        let tracking = &self.tracking;
        SessionConfig {
            foreground: ForegroundConfig {
                interval: Duration::from_secs(tracking.foreground_interval_secs),
                timeout: Duration::from_secs(tracking.foreground_timeout_secs),
            },
            watch: WatchOptions {
                interval: Duration::from_secs(tracking.watch_interval_secs),
                fastest_interval: Duration::from_secs(tracking.watch_fastest_interval_secs),
                ..WatchOptions::default()
            },
            open_settings_on_denial: tracking.open_settings_on_denial,
            ..SessionConfig::default()
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::new(self.logging.file.clone())
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig {
            refresh_interval: Duration::from_secs(self.board.refresh_interval_secs),
        }
    }
}

/// Get the path to the config directory (~/.fieldtrack).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fieldtrack")
}

/// Get the path to the config file (~/.fieldtrack/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [endpoint] section
    if let Some(section) = ini.section(Some("endpoint")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid(
                    "endpoint",
                    "base_url",
                    v,
                    "must start with http:// or https://",
                ));
            }
            config.endpoint.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = section.get("request_timeout_secs") {
            config.endpoint.request_timeout_secs =
                parse_secs("endpoint", "request_timeout_secs", v)?;
        }
    }

    // [session] section
    if let Some(section) = ini.section(Some("session")) {
        if let Some(v) = section.get("team") {
            let v = v.trim();
            if !v.is_empty() {
                config.session.team = v.to_string();
            }
        }
        if let Some(v) = section.get("incident_id") {
            config.session.incident_id = v.trim().to_string();
        }
    }

    // [tracking] section
    if let Some(section) = ini.section(Some("tracking")) {
        if let Some(v) = section.get("foreground_interval_secs") {
            config.tracking.foreground_interval_secs =
                parse_secs("tracking", "foreground_interval_secs", v)?;
        }
        if let Some(v) = section.get("foreground_timeout_secs") {
            config.tracking.foreground_timeout_secs =
                parse_secs("tracking", "foreground_timeout_secs", v)?;
        }
        if let Some(v) = section.get("watch_interval_secs") {
            config.tracking.watch_interval_secs =
                parse_secs("tracking", "watch_interval_secs", v)?;
        }
        if let Some(v) = section.get("watch_fastest_interval_secs") {
            config.tracking.watch_fastest_interval_secs =
                parse_secs("tracking", "watch_fastest_interval_secs", v)?;
        }
        if let Some(v) = section.get("open_settings_on_denial") {
            config.tracking.open_settings_on_denial = parse_bool(v);
        }
    }

    // [board] section
    if let Some(section) = ini.section(Some("board")) {
        if let Some(v) = section.get("refresh_interval_secs") {
            config.board.refresh_interval_secs =
                parse_secs("board", "refresh_interval_secs", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    if config.tracking.watch_fastest_interval_secs > config.tracking.watch_interval_secs {
        return Err(invalid(
            "tracking",
            "watch_fastest_interval_secs",
            &config.tracking.watch_fastest_interval_secs.to_string(),
            "must not exceed watch_interval_secs",
        ));
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a positive number of seconds.
fn parse_secs(section: &str, key: &str, value: &str) -> Result<u64, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(invalid(
            section,
            key,
            value,
            "must be a positive integer (seconds)",
        )),
    }
}

/// Parse a boolean value from a string.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

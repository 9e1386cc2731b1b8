//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let open_settings_on_denial = if config.tracking.open_settings_on_denial {
        "true"
    } else {
        "false"
    };

    format!(
        r#"[endpoint]
; Dispatch backend base URL. Positions go to <base_url>/api/track.php
base_url = {}
; Timeout in seconds for each HTTP request (default: 30)
request_timeout_secs = {}

[session]
; Team reported with every position (default: ploeg-1)
team = {}
; Incident tag, may be empty
incident_id = {}

[tracking]
; Foreground fix every N seconds (default: 10)
foreground_interval_secs = {}
; Give up on a single foreground fix after N seconds (default: 15)
foreground_timeout_secs = {}
; Background watch interval hint (default: 15)
watch_interval_secs = {}
; Fastest background watch interval hint (default: 5)
watch_fastest_interval_secs = {}
; Open the platform settings page when background location is denied
open_settings_on_denial = {}

[board]
; Team board refresh interval in seconds (default: 5)
refresh_interval_secs = {}

[logging]
; Log file, cleared at every start
file = {}
"#,
        config.endpoint.base_url,
        config.endpoint.request_timeout_secs,
        config.session.team,
        config.session.incident_id,
        config.tracking.foreground_interval_secs,
        config.tracking.foreground_timeout_secs,
        config.tracking.watch_interval_secs,
        config.tracking.watch_fastest_interval_secs,
        open_settings_on_denial,
        config.board.refresh_interval_secs,
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to a string, replacing the home directory with `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::super::settings::ConfigFile;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.endpoint.base_url = "http://localhost:8080".to_string();
        config.session.team = "ploeg-3".to_string();
        config.session.incident_id = "INC-7".to_string();
        config.tracking.open_settings_on_denial = false;
        config.board.refresh_interval_secs = 30;

        config.save_to(&path).unwrap();
        let reloaded = ConfigFile::load_from(&path).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_output_is_commented() {
        let content = super::to_config_string(&ConfigFile::default());
        assert!(content.contains("[endpoint]"));
        assert!(content.contains("; Team reported with every position"));
        assert!(content.contains("team = ploeg-1"));
    }
}

//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`track`] - Run a tracking session against a simulated device
//! - [`ping`] - One validation delivery plus GET confirmation
//! - [`board`] - Show the latest position of every team
//! - [`update`] - Check the published version manifest
//! - [`config`] - Configuration management (path, show, init)

pub mod board;
pub mod config;
pub mod ping;
pub mod track;
pub mod update;

use fieldtrack::position::Position;

use crate::error::CliError;

/// Build a position from command-line coordinates.
pub(crate) fn position_from_args(lat: f64, lon: f64) -> Result<Position, CliError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CliError::InvalidArgument(format!(
            "latitude {lat} is outside -90..=90"
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(CliError::InvalidArgument(format!(
            "longitude {lon} is outside -180..=180"
        )));
    }
    Ok(Position::new(lat, lon))
}

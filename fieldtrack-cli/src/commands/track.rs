//! Track command - run a tracking session until stopped.
//!
//! The device is simulated: every fix and every background update reports
//! the coordinates given on the command line. Status changes are printed as
//! they happen.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use fieldtrack::position::SimulatedPlatform;
use fieldtrack::session::{SessionState, TrackingSession};
use fieldtrack::status::StatusSink;
use tracing::info;

use super::position_from_args;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the track command.
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Team name (defaults to [session] team from the config file)
    #[arg(long)]
    pub team: Option<String>,

    /// Incident identifier (defaults to [session] incident_id)
    #[arg(long)]
    pub incident: Option<String>,

    /// Simulated latitude in decimal degrees
    #[arg(long, default_value = "51.2194", allow_hyphen_values = true)]
    pub lat: f64,

    /// Simulated longitude in decimal degrees
    #[arg(long, default_value = "4.4025", allow_hyphen_values = true)]
    pub lon: f64,

    /// Stop after this many seconds (default: run until Ctrl-C)
    #[arg(long)]
    pub duration: Option<u64>,
}

/// Run the track command.
pub async fn run(args: TrackArgs, runner: &CliRunner) -> Result<(), CliError> {
    let position = position_from_args(args.lat, args.lon)?;
    let config = runner.config();

    let team = args.team.unwrap_or_else(|| config.session.team.clone());
    let incident = args
        .incident
        .unwrap_or_else(|| config.session.incident_id.clone());

    let status = StatusSink::new();
    let reporter = runner.reporter(status)?;
    let platform = Arc::new(SimulatedPlatform::new(position));
    let mut session = TrackingSession::new(platform, reporter, config.session_config());
    session.set_context(&team, &incident)?;

    println!(
        "Tracking team '{}' (incident '{}') at {:.5}, {:.5}",
        session.context().team(),
        session.context().incident_id(),
        position.latitude,
        position.longitude
    );
    println!("Reporting to {}", config.endpoint().track_url());
    println!("Press Ctrl-C to stop.");
    println!();

    let mut updates = session.status().subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let line = updates.borrow_and_update().clone();
            if !line.is_empty() {
                println!("  {line}");
            }
        }
    });

    session.start().await;
    info!(state = %session.state(), "Tracking session running");

    if session.state() == SessionState::Active {
        wait_for_stop(args.duration).await;
    }

    printer.abort();
    session.stop().await;
    println!("{}", session.status().current());

    Ok(())
}

async fn wait_for_stop(duration: Option<u64>) {
    match duration {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                    info!(secs, "Tracking duration elapsed");
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                }
            }
        }
        None => {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            }
        }
    }
}

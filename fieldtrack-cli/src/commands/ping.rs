//! Ping command - send the validation position once.
//!
//! Runs the same POST then GET check a session performs on start, without
//! registering any watch or timer.

use clap::Args;
use fieldtrack::report::{DeliveryOutcome, VALIDATION_POSITION};
use fieldtrack::session::SessionContext;
use fieldtrack::status::StatusSink;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the ping command.
#[derive(Debug, Args)]
pub struct PingArgs {
    /// Team name (defaults to [session] team from the config file)
    #[arg(long)]
    pub team: Option<String>,

    /// Incident identifier (defaults to [session] incident_id)
    #[arg(long)]
    pub incident: Option<String>,
}

/// Run the ping command.
pub async fn run(args: PingArgs, runner: &CliRunner) -> Result<(), CliError> {
    let config = runner.config();
    let context = SessionContext::from_input(
        args.team.as_deref().unwrap_or(&config.session.team),
        args.incident
            .as_deref()
            .unwrap_or(&config.session.incident_id),
    );

    let status = StatusSink::new();
    let reporter = runner.reporter(status.clone())?;

    println!("Pinging {} as '{}'", reporter.track_url(), context.team());

    let outcome = reporter.validate(VALIDATION_POSITION, &context).await;
    println!("{}", status.current());

    match outcome {
        DeliveryOutcome::Ok { .. } => Ok(()),
        DeliveryOutcome::Failed { reason } => Err(CliError::Delivery(reason)),
    }
}

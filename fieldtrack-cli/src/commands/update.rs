//! Check-update command - compare installed versions with the manifest.

use clap::Args;
use fieldtrack::update::{UpdateChecker, UpdateDecision};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the check-update command.
#[derive(Debug, Args)]
pub struct CheckUpdateArgs {
    /// Installed native shell version (defaults to this binary's version)
    #[arg(long)]
    pub native_version: Option<String>,

    /// Installed web bundle version, if any
    #[arg(long)]
    pub bundle_version: Option<String>,
}

/// Run the check-update command.
pub async fn run(args: CheckUpdateArgs, runner: &CliRunner) -> Result<(), CliError> {
    let native_version = args
        .native_version
        .unwrap_or_else(|| fieldtrack::VERSION.to_string());

    let checker = UpdateChecker::new(runner.transport()?, &runner.config().endpoint());
    let decision = checker
        .check(&native_version, args.bundle_version.as_deref())
        .await?;

    println!("Native version: {native_version}");
    println!(
        "Bundle version: {}",
        args.bundle_version.as_deref().unwrap_or("(none)")
    );
    println!();
    println!("{decision}");

    if let UpdateDecision::NativeUpdateRequired { apk_url: None, .. } = decision {
        println!("No download link published; contact the dispatch team.");
    }

    Ok(())
}

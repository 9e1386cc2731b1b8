//! fieldtrack CLI - Command-line interface
//!
//! Drives the fieldtrack reporting core from a terminal: run a tracking
//! session against a simulated device, ping the backend, watch the team
//! board and check for updates.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::board::BoardArgs;
use commands::config::ConfigCommands;
use commands::ping::PingArgs;
use commands::track::TrackArgs;
use commands::update::CheckUpdateArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "fieldtrack")]
#[command(version)]
#[command(about = "Report field team positions to the dispatch backend", long_about = None)]
struct Cli {
    /// Enable debug-level logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Mirror log output to the terminal
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a tracking session with a simulated device until stopped
    Track(TrackArgs),

    /// Send the validation position once and confirm it with a GET
    Ping(PingArgs),

    /// Show the latest position of every team
    Board(BoardArgs),

    /// Check the published version manifest
    CheckUpdate(CheckUpdateArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config(command) = cli.command {
        return commands::config::run(command);
    }

    let runner = CliRunner::new(cli.debug, cli.verbose)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Config(format!("Failed to start async runtime: {e}")))?;

    runtime.block_on(async {
        match cli.command {
            Commands::Track(args) => {
                runner.log_startup("track");
                commands::track::run(args, &runner).await
            }
            Commands::Ping(args) => {
                runner.log_startup("ping");
                commands::ping::run(args, &runner).await
            }
            Commands::Board(args) => {
                runner.log_startup("board");
                commands::board::run(args, &runner).await
            }
            Commands::CheckUpdate(args) => {
                runner.log_startup("check-update");
                commands::update::run(args, &runner).await
            }
            Commands::Config(_) => Ok(()),
        }
    })
}

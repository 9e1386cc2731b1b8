//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`. None of them
//! initialize logging, so they never touch the log file.

use clap::Subcommand;
use fieldtrack::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration (file values over defaults)
    Show,

    /// Write a commented configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load()?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!();
    println!("[endpoint]");
    println!("base_url = {}", config.endpoint.base_url);
    println!("request_timeout_secs = {}", config.endpoint.request_timeout_secs);
    println!();
    println!("[session]");
    println!("team = {}", config.session.team);
    println!("incident_id = {}", config.session.incident_id);
    println!();
    println!("[tracking]");
    println!(
        "foreground_interval_secs = {}",
        config.tracking.foreground_interval_secs
    );
    println!(
        "foreground_timeout_secs = {}",
        config.tracking.foreground_timeout_secs
    );
    println!("watch_interval_secs = {}", config.tracking.watch_interval_secs);
    println!(
        "watch_fastest_interval_secs = {}",
        config.tracking.watch_fastest_interval_secs
    );
    println!(
        "open_settings_on_denial = {}",
        config.tracking.open_settings_on_denial
    );
    println!();
    println!("[board]");
    println!("refresh_interval_secs = {}", config.board.refresh_interval_secs);
    println!();
    println!("[logging]");
    println!("file = {}", config.logging.file.display());

    Ok(())
}

fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();

    if path.exists() && !force {
        println!("Configuration already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

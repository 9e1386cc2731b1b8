//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use fieldtrack::board::BoardError;
use fieldtrack::config::ConfigFileError;
use fieldtrack::report::TransportError;
use fieldtrack::session::SessionError;
use fieldtrack::update::UpdateError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Invalid command-line argument
    InvalidArgument(String),
    /// Failed to create the HTTP client
    Transport(TransportError),
    /// The validation delivery was rejected
    Delivery(String),
    /// Session rejected an operation
    Session(SessionError),
    /// Team board fetch failed
    Board(BoardError),
    /// Update check failed
    Update(UpdateError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Delivery(_) | CliError::Board(_) | CliError::Update(_) => {
                eprintln!();
                eprintln!("Check that [endpoint] base_url in the config file points to the");
                eprintln!("dispatch backend: fieldtrack config show");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Regenerate a default file with: fieldtrack config init --force");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Transport(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Delivery(reason) => write!(f, "Position delivery failed: {}", reason),
            CliError::Session(e) => write!(f, "Session error: {}", e),
            CliError::Board(e) => write!(f, "Team board unavailable: {}", e),
            CliError::Update(e) => write!(f, "Update check failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Transport(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Board(e) => Some(e),
            CliError::Update(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        CliError::Transport(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

impl From<BoardError> for CliError {
    fn from(e: BoardError) -> Self {
        CliError::Board(e)
    }
}

impl From<UpdateError> for CliError {
    fn from(e: UpdateError) -> Self {
        CliError::Update(e)
    }
}

//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and HTTP client
//! creation to reduce duplication across command handlers.

use std::sync::Arc;

use fieldtrack::config::ConfigFile;
use fieldtrack::logging::{init_logging, LoggingGuard};
use fieldtrack::report::{Reporter, ReqwestTransport};
use fieldtrack::status::StatusSink;
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - Default to debug-level logging when RUST_LOG is unset
    /// * `verbose` - Mirror log lines to stdout
    pub fn new(debug_mode: bool, verbose: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let mut logging = config.logging_config();
        logging.debug = debug_mode;
        logging.stdout = verbose;

        let logging_guard =
            init_logging(&logging).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("fieldtrack v{}", fieldtrack::VERSION);
        info!(
            endpoint = %self.config.endpoint(),
            "fieldtrack CLI: {} command", command
        );
    }

    /// HTTP transport with the configured timeout.
    pub fn transport(&self) -> Result<Arc<ReqwestTransport>, CliError> {
        let transport = ReqwestTransport::with_timeout(self.config.request_timeout())?;
        Ok(Arc::new(transport))
    }

    /// Reporter writing to `status`.
    pub fn reporter(&self, status: StatusSink) -> Result<Reporter<ReqwestTransport>, CliError> {
        Ok(Reporter::with_config(
            self.transport()?,
            &self.config.reporter_config(),
            status,
        ))
    }
}

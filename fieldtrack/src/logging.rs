//! Logging infrastructure for fieldtrack.
//!
//! Provides structured logging with file output and optional console output:
//! - Writes to `~/.fieldtrack/logs/fieldtrack.log` (cleared on every start)
//! - Optionally mirrors to stdout for interactive runs
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "fieldtrack.log";

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Logging options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Full path of the log file
    pub file: PathBuf,
    /// Mirror log lines to stdout
    pub stdout: bool,
    /// Default to DEBUG instead of INFO when RUST_LOG is unset
    pub debug: bool,
}

impl LoggingConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            stdout: false,
            debug: false,
        }
    }
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file,
/// and installs the global subscriber.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the log file
/// cannot be cleared.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, io::Error> {
    let (log_dir, log_file) = prepare_log_file(&config.file)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = config.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .compact()
    });

    let default_level = if config.debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create the log directory and truncate the log file.
///
/// Returns the directory and the file name for the appender.
pub fn prepare_log_file(path: &Path) -> Result<(PathBuf, String), io::Error> {
    let (log_dir, log_file) = split_log_path(path);

    fs::create_dir_all(&log_dir)?;
    fs::write(log_dir.join(&log_file), "")?;

    Ok((log_dir, log_file))
}

fn split_log_path(path: &Path) -> (PathBuf, String) {
    let log_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    let log_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (log_dir, log_file)
}

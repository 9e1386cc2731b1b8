//! User configuration (`~/.fieldtrack/config.ini`).
//!
//! The INI file is read into a [`ConfigFile`] whose sections map one to one
//! onto the settings structs. Conversion helpers turn it into the runtime
//! configuration of each component:
//!
//! ```ignore
//! use fieldtrack::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let session_config = config.session_config();
//! let endpoint = config.endpoint();
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    BoardSettings, ConfigFile, EndpointSettings, LoggingSettings, SessionSettings,
    TrackingSettings,
};

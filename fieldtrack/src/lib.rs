//! fieldtrack - live position reporting for field teams
//!
//! This library acquires device positions from two channels (a continuous
//! background watch and a periodic foreground fix), tags them with the team
//! and incident of the running session, and delivers them to a dispatch
//! backend over HTTP.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use fieldtrack::config::ConfigFile;
//! use fieldtrack::position::{Position, SimulatedPlatform};
//! use fieldtrack::report::{Reporter, ReqwestTransport};
//! use fieldtrack::session::TrackingSession;
//! use fieldtrack::status::StatusSink;
//!
//! let config = ConfigFile::load()?;
//! let transport = Arc::new(ReqwestTransport::with_timeout(config.request_timeout())?);
//! let reporter = Reporter::with_config(transport, &config.reporter_config(), StatusSink::new());
//! let platform = Arc::new(SimulatedPlatform::new(Position::new(51.2194, 4.4025)));
//!
//! let mut session = TrackingSession::new(platform, reporter, config.session_config())
//!     .with_context(config.session_context());
//! session.start().await;
//! ```

pub mod board;
pub mod config;
pub mod logging;
pub mod position;
pub mod report;
pub mod session;
pub mod status;
pub mod update;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

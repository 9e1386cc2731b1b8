//! Tracking Session - start/stop lifecycle for position reporting.
//!
//! A [`TrackingSession`] ties the position channels to the [`Reporter`]:
//!
//! ```text
//! start()
//!   ├── notification + foreground permission (best-effort)
//!   ├── background permission ── denied ──► foreground only
//!   ├── Dispatcher      ◄── mpsc<SourceEvent> ◄── ForegroundPoller
//!   │      │                                 ◄── background watch
//!   │      └──► Reporter::deliver ──► StatusSink
//!   └── validation delivery (POST, then GET)
//! ```
//!
//! The session context (team, incident) is only replaced while `Idle`.
//!
//! [`Reporter`]: crate::report::Reporter

mod config;
mod context;
mod dispatch;
mod error;
mod state;
mod tracking;

pub use config::{SessionConfig, DEFAULT_EVENT_CAPACITY};
pub use context::{SessionContext, DEFAULT_TEAM};
pub use error::SessionError;
pub use state::SessionState;
pub use tracking::{TrackingSession, STOPPED_STATUS};

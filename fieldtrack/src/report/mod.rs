//! Reporter - delivers observed positions to the dispatch backend.
//!
//! A delivery is one POST of `{team, incident_id, lat, lon}` to
//! `{endpoint}/api/track.php`. The encodings are tried in order and the first
//! 2xx answer wins:
//!
//! 1. multipart/form-data
//! 2. JSON (`Content-Type: application/json`)
//!
//! There is no retry queue and no backoff. A failed delivery is reported on
//! the [`StatusSink`](crate::status::StatusSink) and the sample is dropped.
//!
//! # Architecture
//!
//! ```text
//! Reporter::deliver(position, context)
//!     │
//!     ├── Encoding::Multipart ─► TrackTransport::post_form ─┐
//!     │        (on failure)                                 ├─► ReqwestTransport
//!     └── Encoding::Json ──────► TrackTransport::post_json ─┘
//! ```

mod encoding;
mod endpoint;
mod error;
mod reporter;
mod transport;

pub use encoding::{Encoding, TrackPayload};
pub use endpoint::{Endpoint, TRACKS_LATEST_PATH, TRACK_PATH, VERSION_MANIFEST_PATH};
pub use error::TransportError;
pub use reporter::{DeliveryOutcome, Reporter, ReporterConfig, VALIDATION_POSITION};
pub use transport::{
    url_with_query, FormField, ReqwestTransport, TrackTransport, DEFAULT_REQUEST_TIMEOUT,
};

//! Position delivery with ordered encoding fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::encoding::{Encoding, TrackPayload};
use super::endpoint::Endpoint;
use super::error::TransportError;
use super::transport::{url_with_query, TrackTransport, DEFAULT_REQUEST_TIMEOUT};
use crate::position::Position;
use crate::session::SessionContext;
use crate::status::StatusSink;

/// Fixed coordinate used to validate connectivity when tracking starts.
pub const VALIDATION_POSITION: Position = Position::new(51.2194, 4.4025);

/// Reporter configuration.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Backend base URL.
    pub endpoint: Endpoint,
    /// Per-request timeout for the HTTP transport.
    pub request_timeout: Duration,
    /// Encodings tried in order; first success wins.
    pub encodings: Vec<Encoding>,
}

impl ReporterConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            encodings: Encoding::FALLBACK_ORDER.to_vec(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_encodings(mut self, encodings: Vec<Encoding>) -> Self {
        self.encodings = encodings;
        self
    }
}

/// Result of one [`Reporter::deliver`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The backend accepted the position with this encoding.
    Ok { encoding: Encoding },
    /// Every encoding failed; the reason names each failure.
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, DeliveryOutcome::Ok { .. })
    }
}

/// Delivers positions to the backend.
///
/// Holds no mutable state, so concurrent deliveries from both channels are
/// safe. Each attempt writes its outcome to the status sink; nothing is ever
/// returned as an error.
pub struct Reporter<T> {
    transport: Arc<T>,
    track_url: String,
    encodings: Vec<Encoding>,
    status: StatusSink,
}

impl<T> Clone for Reporter<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            track_url: self.track_url.clone(),
            encodings: self.encodings.clone(),
            status: self.status.clone(),
        }
    }
}

impl<T: TrackTransport> Reporter<T> {
    /// Create a reporter with the default encoding order.
    pub fn new(transport: Arc<T>, endpoint: &Endpoint, status: StatusSink) -> Self {
        Self::with_config(transport, &ReporterConfig::new(endpoint.clone()), status)
    }

    pub fn with_config(transport: Arc<T>, config: &ReporterConfig, status: StatusSink) -> Self {
        Self {
            transport,
            track_url: config.endpoint.track_url(),
            encodings: config.encodings.clone(),
            status,
        }
    }

    pub fn track_url(&self) -> &str {
        &self.track_url
    }

    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    pub fn status(&self) -> &StatusSink {
        &self.status
    }

    /// Deliver one position, falling through the encodings until one succeeds.
    pub async fn deliver(&self, position: Position, context: &SessionContext) -> DeliveryOutcome {
        let payload = TrackPayload::new(position, context);
        let mut failures = Vec::with_capacity(self.encodings.len());

        for &encoding in &self.encodings {
            match encoding
                .send(self.transport.as_ref(), &self.track_url, &payload)
                .await
            {
                Ok(_) => {
                    debug!(
                        encoding = encoding.label(),
                        team = %payload.team,
                        lat = payload.lat,
                        lon = payload.lon,
                        "Position delivered"
                    );
                    self.status.set(encoding.success_status());
                    return DeliveryOutcome::Ok { encoding };
                }
                Err(e) => {
                    warn!(
                        encoding = encoding.label(),
                        team = %payload.team,
                        error = %e,
                        "Position delivery attempt failed"
                    );
                    self.status
                        .set(format!("Network error ({}): {}", encoding.label(), e));
                    failures.push(format!("{}: {}", encoding.label(), e));
                }
            }
        }

        if failures.is_empty() {
            failures.push("no encodings configured".to_string());
        }

        DeliveryOutcome::Failed {
            reason: failures.join("; "),
        }
    }

    /// Confirm GET-based ingestion with a query-string request.
    pub async fn confirm_get(
        &self,
        position: Position,
        context: &SessionContext,
    ) -> Result<(), TransportError> {
        let lat = position.latitude.to_string();
        let lon = position.longitude.to_string();
        let url = url_with_query(
            &self.track_url,
            &[("team", context.team()), ("lat", &lat), ("lon", &lon)],
        )?;

        self.transport.get(&url).await.map(|_| ())
    }

    /// Validate connectivity: deliver `position`, then confirm it with a GET.
    ///
    /// Leaves `POST <outcome> | GET <outcome>` on the status line and returns
    /// the delivery outcome.
    pub async fn validate(&self, position: Position, context: &SessionContext) -> DeliveryOutcome {
        let outcome = self.deliver(position, context).await;
        self.status.set(match &outcome {
            DeliveryOutcome::Ok { encoding } => encoding.success_status().to_string(),
            DeliveryOutcome::Failed { reason } => format!("POST failed: {}", reason),
        });

        match self.confirm_get(position, context).await {
            Ok(()) => self.status.append(" | GET ok"),
            Err(e) => self.status.append(format!(" | GET failed: {}", e)),
        }

        outcome
    }
}

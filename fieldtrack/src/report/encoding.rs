//! Request encodings for a track delivery.
//!
//! Some intermediaries mangle multipart bodies, so a delivery walks an
//! ordered list of encodings and stops at the first one the backend accepts.

use std::fmt;

use serde::Serialize;

use super::error::TransportError;
use super::transport::{FormField, TrackTransport};
use crate::position::Position;
use crate::session::SessionContext;

/// The four fields the backend ingests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPayload {
    pub team: String,
    pub incident_id: String,
    pub lat: f64,
    pub lon: f64,
}

impl TrackPayload {
    pub fn new(position: Position, context: &SessionContext) -> Self {
        Self {
            team: context.team().to_string(),
            incident_id: context.incident_id().to_string(),
            lat: position.latitude,
            lon: position.longitude,
        }
    }

    /// Multipart text fields; coordinates use their shortest decimal form.
    pub fn form_fields(&self) -> Vec<FormField> {
        vec![
            ("team", self.team.clone()),
            ("incident_id", self.incident_id.clone()),
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
        ]
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::Encode(e.to_string()))
    }
}

/// One way of putting a [`TrackPayload`] on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// multipart/form-data POST.
    Multipart,
    /// application/json POST.
    Json,
}

impl Encoding {
    /// Default order: multipart first, JSON as fallback.
    pub const FALLBACK_ORDER: [Encoding; 2] = [Encoding::Multipart, Encoding::Json];

    pub fn label(self) -> &'static str {
        match self {
            Encoding::Multipart => "multipart",
            Encoding::Json => "json",
        }
    }

    /// Status line written when this encoding is accepted.
    pub fn success_status(self) -> &'static str {
        match self {
            Encoding::Multipart => "POST ok",
            Encoding::Json => "POST ok (json)",
        }
    }

    /// Send the payload with this encoding.
    pub async fn send<T: TrackTransport>(
        self,
        transport: &T,
        url: &str,
        payload: &TrackPayload,
    ) -> Result<Vec<u8>, TransportError> {
        match self {
            Encoding::Multipart => transport.post_form(url, &payload.form_fields()).await,
            Encoding::Json => {
                let body = payload.to_json()?;
                transport.post_json(url, &body).await
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

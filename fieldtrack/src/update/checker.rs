//! Manifest fetch and update check.

use std::sync::Arc;

use thiserror::Error;

use super::decision::UpdateDecision;
use super::manifest::VersionManifest;
use crate::report::{url_with_query, Endpoint, TrackTransport, TransportError};

/// Errors from an update check.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Manifest request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid manifest: {0}")]
    Parse(String),
}

/// Reads `app/version.json` and decides whether an update is due.
pub struct UpdateChecker<T> {
    transport: Arc<T>,
    manifest_url: String,
}

impl<T: TrackTransport> UpdateChecker<T> {
    pub fn new(transport: Arc<T>, endpoint: &Endpoint) -> Self {
        Self {
            transport,
            manifest_url: endpoint.version_manifest_url(),
        }
    }

    /// Fetch the manifest, bypassing caches with a millisecond timestamp.
    pub async fn fetch_manifest(&self) -> Result<VersionManifest, UpdateError> {
        let ts = chrono::Utc::now().timestamp_millis().to_string();
        let url = url_with_query(&self.manifest_url, &[("ts", &ts)])?;

        let body = self.transport.get(&url).await?;
        serde_json::from_slice(&body).map_err(|e| UpdateError::Parse(e.to_string()))
    }

    /// Fetch the manifest and evaluate it against the installed versions.
    pub async fn check(
        &self,
        native_version: &str,
        current_bundle: Option<&str>,
    ) -> Result<UpdateDecision, UpdateError> {
        let manifest = self.fetch_manifest().await?;
        let decision = UpdateDecision::evaluate(&manifest, native_version, current_bundle);

        tracing::info!(
            native_version,
            current_bundle = current_bundle.unwrap_or("none"),
            min_native_version = manifest.min_native_version.as_deref().unwrap_or("none"),
            bundle_version = manifest.bundle_version.as_deref().unwrap_or("none"),
            decision = %decision,
            "Update check complete"
        );

        Ok(decision)
    }
}

//! Backend endpoint and its well-known paths.

use std::fmt;

/// Position ingestion script (POST multipart/JSON, GET query).
pub const TRACK_PATH: &str = "api/track.php";

/// Last-known position per team.
pub const TRACKS_LATEST_PATH: &str = "api/tracks_latest.php";

/// Web bundle / native version manifest.
pub const VERSION_MANIFEST_PATH: &str = "app/version.json";

/// Base URL of the dispatch backend, e.g. `https://dispatch.example.org`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Create an endpoint. Trailing slashes are dropped.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Join a relative path onto the base.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub fn track_url(&self) -> String {
        self.url(TRACK_PATH)
    }

    pub fn tracks_latest_url(&self) -> String {
        self.url(TRACKS_LATEST_PATH)
    }

    pub fn version_manifest_url(&self) -> String {
        self.url(VERSION_MANIFEST_PATH)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

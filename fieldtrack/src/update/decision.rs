//! Update decision from a manifest and the installed versions.

use std::cmp::Ordering;
use std::fmt;

use super::manifest::{compare_versions, VersionManifest};

/// What the client should do after reading the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// Nothing to do.
    UpToDate,
    /// The native shell is older than the bundle requires.
    NativeUpdateRequired {
        min_version: String,
        apk_url: Option<String>,
    },
    /// A different web bundle is published.
    BundleUpdateAvailable { version: String, url: String },
}

impl UpdateDecision {
    /// Decide what to do.
    ///
    /// A native update takes precedence over a bundle update. A bundle is
    /// offered when the manifest names both version and URL and the version
    /// differs from `current_bundle` (no bundle installed counts as
    /// different).
    pub fn evaluate(
        manifest: &VersionManifest,
        native_version: &str,
        current_bundle: Option<&str>,
    ) -> Self {
        if let Some(min) = manifest.min_native_version.as_deref() {
            if compare_versions(native_version, min) == Ordering::Less {
                return UpdateDecision::NativeUpdateRequired {
                    min_version: min.to_string(),
                    apk_url: manifest.apk_url.clone(),
                };
            }
        }

        match (
            manifest.bundle_version.as_deref(),
            manifest.bundle_url.as_deref(),
        ) {
            (Some(version), Some(url)) if current_bundle != Some(version) => {
                UpdateDecision::BundleUpdateAvailable {
                    version: version.to_string(),
                    url: url.to_string(),
                }
            }
            _ => UpdateDecision::UpToDate,
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        matches!(self, UpdateDecision::UpToDate)
    }
}

impl fmt::Display for UpdateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateDecision::UpToDate => f.write_str("Up to date"),
            UpdateDecision::NativeUpdateRequired {
                min_version,
                apk_url: Some(url),
            } => write!(f, "New app version required (min. {min_version}): {url}"),
            UpdateDecision::NativeUpdateRequired { min_version, .. } => {
                write!(f, "New app version required (min. {min_version})")
            }
            UpdateDecision::BundleUpdateAvailable { version, url } => {
                write!(f, "Bundle {version} available: {url}")
            }
        }
    }
}

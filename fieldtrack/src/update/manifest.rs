//! Version manifest and version comparison.

use std::cmp::Ordering;

use semver::Version;
use serde::{Deserialize, Serialize};

/// Contents of `app/version.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionManifest {
    /// Oldest native shell that can run the current bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_native_version: Option<String>,

    /// Where to download a newer native shell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apk_url: Option<String>,

    /// Latest web bundle version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_version: Option<String>,

    /// Where to download the latest web bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_url: Option<String>,
}

/// Compare two version strings.
///
/// Valid semver on both sides compares by semver rules. Anything else falls
/// back to a dotted numeric comparison where a missing or non-numeric part
/// counts as 0 and a part's leading digits are used (`"3rc1"` is 3).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if let (Ok(va), Ok(vb)) = (Version::parse(a.trim()), Version::parse(b.trim())) {
        return va.cmp(&vb);
    }

    let pa = dotted_parts(a);
    let pb = dotted_parts(b);
    let len = pa.len().max(pb.len());

    (0..len)
        .map(|i| {
            let x = pa.get(i).copied().unwrap_or(0);
            let y = pb.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn dotted_parts(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|part| {
            let digits: String = part
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_camel_case() {
        let json = r#"{
            "minNativeVersion": "1.4.0",
            "apkUrl": "https://dispatch.example.org/app/fieldtrack.apk",
            "bundleVersion": "2026.10.1",
            "bundleUrl": "https://dispatch.example.org/app/bundle.zip"
        }"#;

        let manifest: VersionManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.min_native_version.as_deref(), Some("1.4.0"));
        assert_eq!(manifest.bundle_version.as_deref(), Some("2026.10.1"));
    }

    #[test]
    fn test_manifest_fields_optional() {
        let manifest: VersionManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest, VersionManifest::default());
    }

    #[test]
    fn test_compare_semver() {
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.0-beta.1", "1.2.0"), Ordering::Less);
    }

    #[test]
    fn test_compare_lenient() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.3", "1.2.9"), Ordering::Greater);
        assert_eq!(compare_versions("2", "10"), Ordering::Less);
        assert_eq!(compare_versions("1.x", "1.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.3rc1", "1.2"), Ordering::Greater);
    }
}

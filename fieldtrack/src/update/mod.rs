//! Update Check - compares installed versions against the published manifest.
//!
//! `GET {endpoint}/app/version.json?ts=<ms>` returns
//! `{minNativeVersion?, apkUrl?, bundleVersion?, bundleUrl?}`. The check only
//! decides; downloading and swapping bundles is left to the host shell.

mod checker;
mod decision;
mod manifest;

pub use checker::{UpdateChecker, UpdateError};
pub use decision::UpdateDecision;
pub use manifest::{compare_versions, VersionManifest};

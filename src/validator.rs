//! Structural checks on the submitted manifest.

use crate::types::Manifest;

pub const MISSING_NAME: &str = "Package name is missing from the manifest";
pub const MISSING_VERSION: &str = "Package version is missing from the manifest";

/// Report missing or empty `name` / `version` fields.
///
/// Absence is a reportable condition, not an error: one issue per missing
/// field, both can be emitted.
pub fn validate(manifest: &Manifest) -> Vec<String> {
    let mut issues = Vec::new();

    if manifest.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        issues.push(MISSING_NAME.to_string());
    }
    if manifest.version.as_deref().map_or(true, |v| v.trim().is_empty()) {
        issues.push(MISSING_VERSION.to_string());
    }

    issues
}

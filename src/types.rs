//! Core types and errors for the manifest scanner.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scanning.
///
/// Registry failures never show up here: an unreachable or misbehaving
/// registry degrades to an issue string in the scan report. Only client
/// errors (unusable manifest) and internal failures propagate.
#[derive(Error, Debug)]
pub enum DepvetError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, DepvetError>;

/// Canonical result when a scan finds nothing to report.
pub const NO_ISSUES_FOUND: &str = "No issues found";

/// A parsed dependency manifest (package.json shape).
///
/// Supplied wholesale by the caller and immutable for the duration of a
/// scan. `IndexMap` keeps the declaration order of scripts and
/// dependencies, which the scan report ordering depends on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<IndexMap<String, String>>,
    pub scripts: Option<IndexMap<String, String>>,
}

impl Manifest {
    /// Union of `dependencies` and `devDependencies` in declaration order.
    ///
    /// A name declared in both sections is checked once, at its first
    /// occurrence.
    pub fn declared_dependencies(&self) -> Vec<(String, String)> {
        let mut seen = std::collections::HashSet::new();
        let mut deps = Vec::new();

        for map in [&self.dependencies, &self.dev_dependencies].into_iter().flatten() {
            for (name, spec) in map {
                if seen.insert(name.clone()) {
                    deps.push((name.clone(), spec.clone()));
                }
            }
        }

        deps
    }
}

/// Result of a live registry lookup for one package.
///
/// A malformed registry response (body missing the required fields)
/// classifies as `Unreachable`, never as `ZeroVersions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCheck {
    /// Package exists with at least one published version.
    Available,
    /// Package record exists but lists no published versions.
    ZeroVersions,
    /// Non-success HTTP status, malformed body, or transport failure.
    Unreachable { detail: String },
}

/// Complete scan result for one manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Ordered, deduplicated issue strings. Never empty: a clean scan
    /// holds the single [`NO_ISSUES_FOUND`] sentinel.
    pub issues: Vec<String>,
    /// Number of distinct dependencies that were checked.
    pub dependencies_checked: usize,
    /// Scan duration in seconds.
    pub duration_secs: f64,
}

impl ScanReport {
    /// True when the scan found nothing to report.
    pub fn is_clean(&self) -> bool {
        self.issues.len() == 1 && self.issues[0] == NO_ISSUES_FOUND
    }
}

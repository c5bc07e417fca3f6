//! Scan orchestration: validator, script scanner, and reputation verifier
//! merged into one ordered, deduplicated issue list.

use crate::config::ScanConfig;
use crate::registry::{
    DenoClient, ModuleDirectory, NpmClient, PrimaryRegistry, SecondaryRegistry,
};
use crate::types::{DepvetError, Manifest, Result, ScanReport, NO_ISSUES_FOUND};
use crate::verifier::Verifier;
use crate::{scripts, validator};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Orchestrates one manifest scan end to end.
///
/// Generic over the registry seams so tests can run without the network;
/// `Scanner::new` wires in the real npm and deno.land/x clients.
pub struct Scanner<P = NpmClient, S = DenoClient> {
    verifier: Verifier<P, S>,
}

impl Scanner {
    /// Create a scanner backed by the live registries.
    pub fn new(config: &ScanConfig, directory: Arc<ModuleDirectory>) -> Result<Self> {
        let primary = NpmClient::new(
            &config.registry_url,
            config.timeout,
            config.rate_limit,
            config.cache_ttl,
        )?;
        let secondary = DenoClient::new(
            &config.index_api_url,
            &config.index_base_url,
            config.timeout,
            config.cache_ttl,
        )?;

        Ok(Self::with_registries(config, primary, secondary, directory))
    }
}

impl<P: PrimaryRegistry, S: SecondaryRegistry> Scanner<P, S> {
    /// Create a scanner over caller-supplied registry implementations.
    pub fn with_registries(
        config: &ScanConfig,
        primary: P,
        secondary: S,
        directory: Arc<ModuleDirectory>,
    ) -> Scanner<P, S> {
        Scanner {
            verifier: Verifier::new(
                primary,
                secondary,
                directory,
                config.concurrency,
                Duration::from_secs(config.deadline),
                !config.no_zero_version_check,
            ),
        }
    }

    /// Scan one manifest.
    ///
    /// Issue order: metadata, then scripts in declaration order, then
    /// per-dependency findings in declaration order. Exact-string repeats
    /// are dropped, and an empty result becomes the canonical
    /// no-issues sentinel.
    ///
    /// A manifest with neither `dependencies` nor `devDependencies` is a
    /// client error: there is nothing to reputation-check.
    pub async fn scan(&self, manifest: &Manifest) -> Result<ScanReport> {
        let start = Instant::now();

        if manifest.dependencies.is_none() && manifest.dev_dependencies.is_none() {
            return Err(DepvetError::InvalidManifest(
                "manifest declares neither dependencies nor devDependencies".to_string(),
            ));
        }

        let mut issues = validator::validate(manifest);
        issues.extend(scripts::scan(manifest.scripts.as_ref()));

        let deps = manifest.declared_dependencies();
        debug!("Verifying {} dependencies", deps.len());
        for dep_issues in self.verifier.verify_dependencies(&deps).await {
            issues.extend(dep_issues);
        }

        let mut seen = HashSet::new();
        issues.retain(|issue| seen.insert(issue.clone()));

        if issues.is_empty() {
            issues.push(NO_ISSUES_FOUND.to_string());
        }

        Ok(ScanReport {
            issues,
            dependencies_checked: deps.len(),
            duration_secs: start.elapsed().as_secs_f64(),
        })
    }
}

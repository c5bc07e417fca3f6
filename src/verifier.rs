//! Reputation verification for declared dependencies.
//!
//! Per dependency, in report order: version-format check, npm blocklist,
//! npm live check, deno.land/x blocklist, deno.land/x live check (gated on
//! the module directory). The format and blocklist checks are cheap and
//! run inline; only the live checks enter the bounded fan-out.

use crate::blocklist;
use crate::patterns::VERSION_SPEC;
use crate::registry::{ModuleDirectory, PrimaryRegistry, SecondaryRegistry};
use crate::types::RegistryCheck;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

pub fn invalid_version_issue(name: &str, spec: &str) -> String {
    format!(
        "Invalid version format for dependency \"{}\": \"{}\" (expected MAJOR.MINOR.PATCH, optionally prefixed with ^ or ~)",
        name, spec
    )
}

pub fn npm_blocklist_issue(name: &str, reason: &str) -> String {
    format!("Dependency \"{}\" is a blocklisted npm package: {}", name, reason)
}

pub fn npm_unreachable_issue(name: &str) -> String {
    format!(
        "Dependency \"{}\" does not exist or is unreachable on the npm registry - always install packages from the official registry",
        name
    )
}

pub fn npm_zero_versions_issue(name: &str) -> String {
    format!(
        "Dependency \"{}\" has no published versions on the npm registry (possible placeholder or typosquat)",
        name
    )
}

pub fn deno_blocklist_issue(name: &str, reason: &str) -> String {
    format!("Dependency \"{}\" is a blocklisted deno.land/x module: {}", name, reason)
}

pub fn deno_entry_point_issue(name: &str, detail: &str) -> String {
    format!(
        "deno.land/x module \"{}\" entry point could not be fetched ({})",
        name, detail
    )
}

pub fn timeout_issue(name: &str) -> String {
    format!("Dependency \"{}\" could not be verified in time", name)
}

/// Outcome of one dependency's live checks.
struct LiveFindings {
    primary: Option<String>,
    secondary: Option<String>,
}

enum LiveOutcome {
    Checked(LiveFindings),
    TimedOut,
}

/// Checks dependencies against blocklists and live registries.
pub struct Verifier<P, S> {
    primary: P,
    secondary: S,
    directory: Arc<ModuleDirectory>,
    concurrency: usize,
    deadline: Duration,
    /// Zero published versions as a malicious signal. Kept separate so it
    /// can be disabled independently of the existence check.
    zero_version_check: bool,
}

impl<P: PrimaryRegistry, S: SecondaryRegistry> Verifier<P, S> {
    pub fn new(
        primary: P,
        secondary: S,
        directory: Arc<ModuleDirectory>,
        concurrency: usize,
        deadline: Duration,
        zero_version_check: bool,
    ) -> Self {
        Self {
            primary,
            secondary,
            directory,
            concurrency: concurrency.max(1),
            deadline,
            zero_version_check,
        }
    }

    /// Verify all dependencies, returning one ordered issue list per
    /// dependency, in input order.
    ///
    /// Live checks run concurrently under the configured limit; a
    /// dependency whose live checks miss the overall deadline reports the
    /// could-not-verify issue instead of silently dropping out.
    pub async fn verify_dependencies(&self, deps: &[(String, String)]) -> Vec<Vec<String>> {
        let deadline = Instant::now() + self.deadline;

        let live_outcomes: Vec<(usize, LiveOutcome)> = stream::iter(deps.iter().enumerate())
            .map(|(idx, (name, _))| async move {
                match tokio::time::timeout_at(deadline, self.check_live(name)).await {
                    Ok(findings) => (idx, LiveOutcome::Checked(findings)),
                    Err(_) => {
                        debug!("Live checks for {} missed the scan deadline", name);
                        (idx, LiveOutcome::TimedOut)
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // Re-impose declaration order over the unordered fan-in
        let mut ordered: Vec<Option<LiveOutcome>> = deps.iter().map(|_| None).collect();
        for (idx, outcome) in live_outcomes {
            ordered[idx] = Some(outcome);
        }

        deps.iter()
            .zip(ordered)
            .map(|((name, spec), outcome)| {
                self.assemble(name, spec, outcome.unwrap_or(LiveOutcome::TimedOut))
            })
            .collect()
    }

    /// Merge sync and live findings into the canonical per-dependency order.
    fn assemble(&self, name: &str, spec: &str, outcome: LiveOutcome) -> Vec<String> {
        let mut issues = Vec::new();

        if !VERSION_SPEC.is_match(spec) {
            issues.push(invalid_version_issue(name, spec));
        }
        if let Some(reason) = blocklist::npm_blocklist_reason(name) {
            issues.push(npm_blocklist_issue(name, reason));
        }

        match outcome {
            LiveOutcome::Checked(live) => {
                issues.extend(live.primary);
                if let Some(reason) = blocklist::deno_blocklist_reason(name) {
                    issues.push(deno_blocklist_issue(name, reason));
                }
                issues.extend(live.secondary);
            }
            LiveOutcome::TimedOut => {
                if let Some(reason) = blocklist::deno_blocklist_reason(name) {
                    issues.push(deno_blocklist_issue(name, reason));
                }
                issues.push(timeout_issue(name));
            }
        }

        issues
    }

    /// Live registry checks for one dependency. Every registry failure
    /// degrades to an issue string: fail-closed, never a hard error.
    async fn check_live(&self, name: &str) -> LiveFindings {
        let primary = match self.primary.check_package(name).await {
            RegistryCheck::Available => None,
            RegistryCheck::ZeroVersions => {
                self.zero_version_check.then(|| npm_zero_versions_issue(name))
            }
            RegistryCheck::Unreachable { detail } => {
                debug!("npm check failed for {}: {}", name, detail);
                Some(npm_unreachable_issue(name))
            }
        };

        // Fail-open gate: names unknown to the module directory are not
        // deno.land/x modules and get no lookup there.
        let secondary = if self.directory.contains(name) {
            match self.secondary.check_entry_point(name).await {
                RegistryCheck::Available => None,
                RegistryCheck::Unreachable { detail } => {
                    Some(deno_entry_point_issue(name, &detail))
                }
                RegistryCheck::ZeroVersions => {
                    Some(deno_entry_point_issue(name, "no published versions"))
                }
            }
        } else {
            None
        };

        LiveFindings { primary, secondary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakePrimary {
        results: HashMap<String, RegistryCheck>,
    }

    impl FakePrimary {
        fn with(entries: &[(&str, RegistryCheck)]) -> Self {
            Self {
                results: entries
                    .iter()
                    .map(|(n, r)| (n.to_string(), r.clone()))
                    .collect(),
            }
        }
    }

    impl PrimaryRegistry for FakePrimary {
        async fn check_package(&self, name: &str) -> RegistryCheck {
            self.results.get(name).cloned().unwrap_or(RegistryCheck::Available)
        }
    }

    #[derive(Default)]
    struct FakeSecondary {
        results: HashMap<String, RegistryCheck>,
        calls: AtomicUsize,
    }

    impl SecondaryRegistry for FakeSecondary {
        async fn check_entry_point(&self, name: &str) -> RegistryCheck {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results.get(name).cloned().unwrap_or(RegistryCheck::Available)
        }
    }

    /// Primary registry that never answers before the deadline.
    struct StalledPrimary;

    impl PrimaryRegistry for StalledPrimary {
        async fn check_package(&self, _name: &str) -> RegistryCheck {
            tokio::time::sleep(Duration::from_secs(60)).await;
            RegistryCheck::Available
        }
    }

    fn verifier<P: PrimaryRegistry, S: SecondaryRegistry>(
        primary: P,
        secondary: S,
        directory: Arc<ModuleDirectory>,
    ) -> Verifier<P, S> {
        Verifier::new(primary, secondary, directory, 4, Duration::from_secs(10), true)
    }

    fn dep(name: &str, spec: &str) -> (String, String) {
        (name.to_string(), spec.to_string())
    }

    #[tokio::test]
    async fn test_clean_dependency_yields_nothing() {
        let v = verifier(
            FakePrimary::default(),
            FakeSecondary::default(),
            Arc::new(ModuleDirectory::new()),
        );

        let issues = v.verify_dependencies(&[dep("lodash", "4.17.21")]).await;
        assert_eq!(issues, vec![Vec::<String>::new()]);
    }

    #[tokio::test]
    async fn test_invalid_version_spec_reported() {
        let v = verifier(
            FakePrimary::default(),
            FakeSecondary::default(),
            Arc::new(ModuleDirectory::new()),
        );

        let issues = v.verify_dependencies(&[dep("lodash", "latest")]).await;
        assert_eq!(issues[0], vec![invalid_version_issue("lodash", "latest")]);
    }

    #[tokio::test]
    async fn test_blocklist_hit_regardless_of_registry_state() {
        // Blocklist membership must be reported even when the registry is
        // down, and the outage itself is reported too.
        let v = verifier(
            FakePrimary::with(&[(
                "crossenv",
                RegistryCheck::Unreachable { detail: "HTTP 503".into() },
            )]),
            FakeSecondary::default(),
            Arc::new(ModuleDirectory::new()),
        );

        let all = v.verify_dependencies(&[dep("crossenv", "1.0.0")]).await;
        let issues = &all[0];
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("blocklisted npm package"));
        assert_eq!(issues[1], npm_unreachable_issue("crossenv"));
    }

    #[tokio::test]
    async fn test_unreachable_registry_degrades_to_issue() {
        let v = verifier(
            FakePrimary::with(&[(
                "ghost",
                RegistryCheck::Unreachable { detail: "HTTP 404".into() },
            )]),
            FakeSecondary::default(),
            Arc::new(ModuleDirectory::new()),
        );

        let all = v.verify_dependencies(&[dep("ghost", "1.0.0")]).await;
        assert_eq!(all[0], vec![npm_unreachable_issue("ghost")]);
    }

    #[tokio::test]
    async fn test_zero_versions_reported_and_independently_disabled() {
        let directory = Arc::new(ModuleDirectory::new());

        let v = verifier(
            FakePrimary::with(&[("placeholder", RegistryCheck::ZeroVersions)]),
            FakeSecondary::default(),
            directory.clone(),
        );
        let all = v.verify_dependencies(&[dep("placeholder", "1.0.0")]).await;
        assert_eq!(all[0], vec![npm_zero_versions_issue("placeholder")]);

        let v = Verifier::new(
            FakePrimary::with(&[("placeholder", RegistryCheck::ZeroVersions)]),
            FakeSecondary::default(),
            directory,
            4,
            Duration::from_secs(10),
            false,
        );
        let all = v.verify_dependencies(&[dep("placeholder", "1.0.0")]).await;
        assert!(all[0].is_empty());
    }

    #[tokio::test]
    async fn test_directory_gates_secondary_lookup() {
        let secondary = FakeSecondary::default();
        let v = verifier(FakePrimary::default(), secondary, Arc::new(ModuleDirectory::new()));

        // Name unknown to the directory: no secondary call at all.
        let all = v.verify_dependencies(&[dep("lodash", "1.0.0")]).await;
        assert!(all[0].is_empty());
        assert_eq!(v.secondary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_known_module_entry_point_checked() {
        let directory = Arc::new(ModuleDirectory::new());
        directory.replace(["oak"].iter().map(|s| s.to_string()).collect());

        let mut secondary = FakeSecondary::default();
        secondary.results.insert(
            "oak".to_string(),
            RegistryCheck::Unreachable { detail: "HTTP 451".into() },
        );

        let v = verifier(FakePrimary::default(), secondary, directory);
        let all = v.verify_dependencies(&[dep("oak", "1.0.0")]).await;

        assert_eq!(all[0], vec![deno_entry_point_issue("oak", "HTTP 451")]);
        assert_eq!(v.secondary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_per_dependency_issue_order() {
        let directory = Arc::new(ModuleDirectory::new());
        directory.replace(["crossenv"].iter().map(|s| s.to_string()).collect());

        let mut secondary = FakeSecondary::default();
        secondary.results.insert(
            "crossenv".to_string(),
            RegistryCheck::Unreachable { detail: "HTTP 404".into() },
        );

        let v = verifier(
            FakePrimary::with(&[(
                "crossenv",
                RegistryCheck::Unreachable { detail: "HTTP 404".into() },
            )]),
            secondary,
            directory,
        );

        let all = v.verify_dependencies(&[dep("crossenv", "latest")]).await;
        let issues = &all[0];
        assert_eq!(issues.len(), 4);
        assert!(issues[0].starts_with("Invalid version format"));
        assert!(issues[1].contains("blocklisted npm package"));
        assert_eq!(issues[2], npm_unreachable_issue("crossenv"));
        assert_eq!(issues[3], deno_entry_point_issue("crossenv", "HTTP 404"));
    }

    #[tokio::test]
    async fn test_output_order_matches_input_order() {
        let v = verifier(
            FakePrimary::with(&[(
                "bbb",
                RegistryCheck::Unreachable { detail: "HTTP 404".into() },
            )]),
            FakeSecondary::default(),
            Arc::new(ModuleDirectory::new()),
        );

        let deps = vec![dep("zzz", "1.0.0"), dep("bbb", "1.0.0"), dep("aaa", "latest")];
        let issues = v.verify_dependencies(&deps).await;

        assert!(issues[0].is_empty());
        assert_eq!(issues[1], vec![npm_unreachable_issue("bbb")]);
        assert_eq!(issues[2], vec![invalid_version_issue("aaa", "latest")]);
    }

    #[tokio::test]
    async fn test_deadline_expiry_reports_every_pending_dependency() {
        let v = Verifier::new(
            StalledPrimary,
            FakeSecondary::default(),
            Arc::new(ModuleDirectory::new()),
            4,
            Duration::from_millis(50),
            true,
        );

        let deps = vec![dep("left", "1.0.0"), dep("right", "latest")];
        let issues = v.verify_dependencies(&deps).await;

        // No dependency vanishes; sync findings survive the timeout.
        assert_eq!(issues[0], vec![timeout_issue("left")]);
        assert_eq!(
            issues[1],
            vec![invalid_version_issue("right", "latest"), timeout_issue("right")]
        );
    }
}

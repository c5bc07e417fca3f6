//! npm registry checker for verifying package availability.

use crate::registry::cache::RegistryCache;
use crate::registry::PrimaryRegistry;
use crate::types::{RegistryCheck, Result};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// npm registry API response for package metadata.
///
/// `versions` is required: a body without it is a malformed response and
/// classifies as unreachable, not as zero versions.
#[derive(Debug, Deserialize)]
struct NpmPackageInfo {
    versions: HashMap<String, serde_json::Value>,
}

/// Checker for verifying packages against the npm registry.
pub struct NpmClient {
    client: Client,
    cache: RegistryCache,
    rate_limiter: Arc<RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>>,
    registry_url: String,
}

impl NpmClient {
    /// Create a new npm checker.
    pub fn new(registry_url: &str, timeout_secs: u64, rate_limit: u32, cache_ttl_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("depvet/0.1")
            .http1_only() // Force HTTP/1.1 to avoid HTTP/2 stream limit issues
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        let quota = Quota::per_second(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(5).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            client,
            cache: RegistryCache::new(cache_ttl_secs),
            rate_limiter,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        })
    }

    /// Perform the actual npm registry check.
    async fn do_check(&self, package_name: &str) -> RegistryCheck {
        let url = format!("{}/{}", self.registry_url, urlencoding::encode(package_name));
        trace!("Checking npm: {}", url);

        match self.client.get(&url).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    match response.json::<NpmPackageInfo>().await {
                        Ok(info) if info.versions.is_empty() => {
                            debug!("Package has zero published versions: {}", package_name);
                            RegistryCheck::ZeroVersions
                        }
                        Ok(_) => {
                            trace!("Package available: {}", package_name);
                            RegistryCheck::Available
                        }
                        Err(e) => {
                            warn!("Malformed npm response for {}: {}", package_name, e);
                            RegistryCheck::Unreachable {
                                detail: format!("malformed registry response: {}", e),
                            }
                        }
                    }
                } else {
                    // 404 included: a missing package is suspicious, not neutral
                    debug!("npm returned {} for {}", response.status(), package_name);
                    RegistryCheck::Unreachable {
                        detail: format!("HTTP {}", response.status()),
                    }
                }
            }
            Err(e) => RegistryCheck::Unreachable {
                detail: e.to_string(),
            },
        }
    }
}

impl PrimaryRegistry for NpmClient {
    /// Check a package, going through the TTL cache and rate limiter.
    async fn check_package(&self, name: &str) -> RegistryCheck {
        if let Some(cached) = self.cache.get(name) {
            trace!("Cache hit for {}", name);
            return cached;
        }

        self.rate_limiter.until_ready().await;

        let result = self.do_check(name).await;
        self.cache.set(name, result.clone());

        result
    }
}

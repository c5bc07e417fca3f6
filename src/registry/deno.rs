//! deno.land/x index client: bulk module listing and entry-point checks.

use crate::registry::cache::RegistryCache;
use crate::registry::SecondaryRegistry;
use crate::types::{RegistryCheck, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, trace};

/// Bulk listing response from the module index.
#[derive(Debug, Deserialize)]
struct ModuleListing {
    items: Vec<ModuleEntry>,
}

#[derive(Debug, Deserialize)]
struct ModuleEntry {
    name: String,
}

/// Client for the deno.land/x module index.
pub struct DenoClient {
    client: Client,
    cache: RegistryCache,
    api_url: String,
    base_url: String,
}

impl DenoClient {
    /// Create a new deno.land/x client.
    pub fn new(api_url: &str, base_url: &str, timeout_secs: u64, cache_ttl_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("depvet/0.1")
            .http1_only()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            cache: RegistryCache::new(cache_ttl_secs),
            api_url: api_url.trim_end_matches('/').to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full module name listing from the index.
    ///
    /// Used by the directory cache refresh, never by the scan path. Any
    /// transport or parse failure propagates so the caller can keep its
    /// previous snapshot.
    pub async fn fetch_module_listing(&self) -> Result<HashSet<String>> {
        let url = format!("{}/modules", self.api_url);
        trace!("Fetching module listing: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let listing = response.json::<ModuleListing>().await?;

        Ok(listing.items.into_iter().map(|entry| entry.name).collect())
    }
}

impl SecondaryRegistry for DenoClient {
    /// Fetch the module's canonical entry point. Any non-200 response or
    /// transport failure is suspicious.
    async fn check_entry_point(&self, name: &str) -> RegistryCheck {
        if let Some(cached) = self.cache.get(name) {
            trace!("Cache hit for {}", name);
            return cached;
        }

        let url = format!("{}/x/{}/mod.ts", self.base_url, urlencoding::encode(name));
        trace!("Checking deno.land/x entry point: {}", url);

        let result = match self.client.get(&url).send().await {
            Ok(response) => {
                if response.status().as_u16() == 200 {
                    RegistryCheck::Available
                } else {
                    debug!("deno.land/x returned {} for {}", response.status(), name);
                    RegistryCheck::Unreachable {
                        detail: format!("HTTP {}", response.status()),
                    }
                }
            }
            Err(e) => RegistryCheck::Unreachable {
                detail: e.to_string(),
            },
        };

        self.cache.set(name, result.clone());
        result
    }
}

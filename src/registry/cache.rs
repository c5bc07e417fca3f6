//! In-memory caching layer for registry checks.

use crate::types::RegistryCheck;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache entry with TTL.
#[derive(Debug, Clone)]
struct CacheEntry {
    result: RegistryCheck,
    expires_at: Instant,
}

/// Thread-safe cache for per-package registry check results.
#[derive(Debug, Clone)]
pub struct RegistryCache {
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl RegistryCache {
    /// Create a new cache with the given TTL in seconds.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get a cached result if it exists and hasn't expired.
    pub fn get(&self, package_name: &str) -> Option<RegistryCheck> {
        let entry = self.cache.get(package_name)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.result.clone());
        }
        // Entry expired, remove it
        drop(entry);
        self.cache.remove(package_name);
        None
    }

    /// Store a result in the cache.
    pub fn set(&self, package_name: &str, result: RegistryCheck) {
        let entry = CacheEntry {
            result,
            expires_at: Instant::now() + self.ttl,
        };
        self.cache.insert(package_name.to_string(), entry);
    }
}

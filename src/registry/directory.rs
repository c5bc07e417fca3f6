//! Process-wide cache of module names known to the deno.land/x index.
//!
//! Scopes which dependencies are even eligible for the secondary live
//! check: most names in an npm manifest mean nothing on deno.land/x and
//! must not trigger a lookup there.

use crate::registry::DenoClient;
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{info, warn};

/// Snapshot set of known module names.
///
/// Written only by [`refresh`](Self::refresh), read concurrently by
/// verifier tasks. The new set is built fully off-lock and swapped in one
/// write, so readers never observe a partially-populated snapshot. An
/// empty cache is a valid state: `contains` just answers false.
#[derive(Debug, Default)]
pub struct ModuleDirectory {
    modules: RwLock<HashSet<String>>,
}

impl ModuleDirectory {
    /// Create an empty directory. Populated later by `refresh`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure membership query. Never blocks on the network.
    pub fn contains(&self, name: &str) -> bool {
        self.modules
            .read()
            .expect("module directory lock poisoned")
            .contains(name)
    }

    /// Number of known modules in the current snapshot.
    pub fn len(&self) -> usize {
        self.modules
            .read()
            .expect("module directory lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomically replace the snapshot.
    pub fn replace(&self, modules: HashSet<String>) {
        *self
            .modules
            .write()
            .expect("module directory lock poisoned") = modules;
    }

    /// Best-effort refresh from the live index.
    ///
    /// On any fetch or parse failure the previous snapshot stays valid and
    /// nothing is raised: this runs as a background maintenance task, never
    /// on the scan path.
    pub async fn refresh(&self, client: &DenoClient) {
        match client.fetch_module_listing().await {
            Ok(modules) => {
                info!("Module directory refreshed: {} modules", modules.len());
                self.replace(modules);
            }
            Err(e) => {
                warn!("Module directory refresh failed, keeping previous snapshot: {}", e);
            }
        }
    }
}

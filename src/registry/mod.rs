//! Registry clients and the known-module directory cache.

pub mod cache;
pub mod deno;
pub mod directory;
pub mod npm;

pub use cache::RegistryCache;
pub use deno::DenoClient;
pub use directory::ModuleDirectory;
pub use npm::NpmClient;

use crate::types::RegistryCheck;
use std::future::Future;

/// Live lookup against the primary (npm) registry.
///
/// A trait seam so the verifier can be exercised against fakes; the
/// production implementation is [`NpmClient`].
pub trait PrimaryRegistry: Send + Sync {
    fn check_package(&self, name: &str) -> impl Future<Output = RegistryCheck> + Send;
}

/// Live entry-point lookup against the secondary (deno.land/x) index.
pub trait SecondaryRegistry: Send + Sync {
    fn check_entry_point(&self, name: &str) -> impl Future<Output = RegistryCheck> + Send;
}

//! depvet - dependency manifest security scanner.
//!
//! This library inspects a dependency manifest (package.json) and reports
//! security-relevant findings by:
//! - Validating manifest metadata and dependency version specs
//! - Matching lifecycle scripts against a suspicious-command pattern set
//! - Checking dependencies against static blocklists for npm and deno.land/x
//! - Verifying dependency availability against both live registries
//!
//! # Example
//!
//! ```no_run
//! use depvet::registry::ModuleDirectory;
//! use depvet::{Manifest, ScanConfig, Scanner};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let directory = Arc::new(ModuleDirectory::new());
//!     let scanner = Scanner::new(&ScanConfig::default(), directory).unwrap();
//!
//!     let manifest: Manifest =
//!         serde_json::from_str(r#"{"name":"app","version":"1.0.0","dependencies":{}}"#).unwrap();
//!     let report = scanner.scan(&manifest).await.unwrap();
//!     for issue in &report.issues {
//!         println!("{}", issue);
//!     }
//! }
//! ```

pub mod blocklist;
pub mod config;
pub mod console;
pub mod patterns;
pub mod registry;
pub mod scanner;
pub mod scripts;
pub mod types;
pub mod validator;
pub mod verifier;

pub use config::ScanConfig;
pub use scanner::Scanner;
pub use types::{DepvetError, Manifest, RegistryCheck, Result, ScanReport, NO_ISSUES_FOUND};

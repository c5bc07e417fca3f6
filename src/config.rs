//! Configuration handling for the scanner.

use clap::Parser;
use std::path::PathBuf;

/// Dependency manifest security scanner.
#[derive(Parser, Debug, Clone)]
#[command(name = "depvet")]
#[command(author, version, about, long_about = None)]
pub struct ScanConfig {
    /// Manifest file(s) to scan (package.json)
    #[arg(required_unless_present = "file")]
    pub manifests: Vec<PathBuf>,

    /// File containing manifest paths to scan (one per line)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quiet mode: only show output for manifests with issues
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "8")]
    pub timeout: u64,

    /// Overall deadline for one manifest scan in seconds
    #[arg(long, default_value = "30")]
    pub deadline: u64,

    /// Maximum in-flight registry checks per scan
    #[arg(long, default_value = "8")]
    pub concurrency: usize,

    /// Rate limit for npm registry requests (requests per second)
    #[arg(long, default_value = "10")]
    pub rate_limit: u32,

    /// Registry check cache TTL in seconds
    #[arg(long, default_value = "3600")]
    pub cache_ttl: u64,

    /// npm registry base URL
    #[arg(long, env = "DEPVET_REGISTRY_URL", default_value = "https://registry.npmjs.org")]
    pub registry_url: String,

    /// deno.land module index API base URL
    #[arg(long, env = "DEPVET_INDEX_API_URL", default_value = "https://api.deno.land")]
    pub index_api_url: String,

    /// deno.land base URL for entry-point fetches
    #[arg(long, env = "DEPVET_INDEX_BASE_URL", default_value = "https://deno.land")]
    pub index_base_url: String,

    /// Module directory refresh interval in seconds (0 = refresh once at startup)
    #[arg(long, default_value = "900")]
    pub refresh_interval: u64,

    /// Disable the zero-published-versions heuristic
    #[arg(long)]
    pub no_zero_version_check: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            manifests: Vec::new(),
            file: None,
            verbose: false,
            json: false,
            output: None,
            quiet: false,
            timeout: 8,
            deadline: 30,
            concurrency: 8,
            rate_limit: 10,
            cache_ttl: 3600,
            registry_url: "https://registry.npmjs.org".to_string(),
            index_api_url: "https://api.deno.land".to_string(),
            index_base_url: "https://deno.land".to_string(),
            refresh_interval: 900,
            no_zero_version_check: false,
        }
    }
}

impl ScanConfig {
    /// Collect manifest paths from positional args and the optional list file.
    pub fn load_manifest_paths(&self) -> crate::types::Result<Vec<PathBuf>> {
        let mut paths = self.manifests.clone();

        if let Some(ref file_path) = self.file {
            let content = std::fs::read_to_string(file_path)?;
            for line in content.lines() {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    paths.push(PathBuf::from(trimmed));
                }
            }
        }

        Ok(paths)
    }
}

//! depvet - dependency manifest security scanner.
//!
//! CLI entry point.

use clap::Parser;
use depvet::console::ConsoleOutput;
use depvet::registry::{DenoClient, ModuleDirectory};
use depvet::{Manifest, ScanConfig, Scanner};
use serde_json::json;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ScanConfig::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("depvet=debug,info")
    } else {
        EnvFilter::new("depvet=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let console = ConsoleOutput::new(config.verbose, config.json, config.quiet);

    // Load manifest paths
    let paths = match config.load_manifest_paths() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to load manifest paths: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if paths.is_empty() {
        error!("No manifests specified. Use positional arguments or -f <file>.");
        return ExitCode::FAILURE;
    }
    console.print_progress(&format!("Loaded {} manifest path(s)", paths.len()));

    // Module directory with fire-and-forget background refresh. The scan
    // path never waits on it; an empty directory just skips the
    // deno.land/x live checks.
    let directory = Arc::new(ModuleDirectory::new());
    match DenoClient::new(
        &config.index_api_url,
        &config.index_base_url,
        config.timeout,
        config.cache_ttl,
    ) {
        Ok(index_client) => {
            let refresh_directory = directory.clone();
            let refresh_interval = config.refresh_interval;
            tokio::spawn(async move {
                refresh_directory.refresh(&index_client).await;
                if refresh_interval > 0 {
                    let mut ticker =
                        tokio::time::interval(Duration::from_secs(refresh_interval));
                    ticker.tick().await; // consume the immediate first tick
                    loop {
                        ticker.tick().await;
                        refresh_directory.refresh(&index_client).await;
                    }
                }
            });
        }
        Err(e) => warn!("Module directory refresh disabled: {}", e),
    }

    // Create scanner
    let scanner = match Scanner::new(&config, directory) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create scanner: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Scan all manifests in input order
    let start = Instant::now();
    let mut results = Vec::new();
    let mut total_dependencies = 0usize;
    let mut total_issues = 0usize;
    let mut failures = 0usize;

    for path in &paths {
        console.print_scan_start(path);

        let manifest: Manifest = match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
        {
            Ok(m) => m,
            Err(e) => {
                let message = format!("could not read manifest: {}", e);
                console.print_failure(path, &message);
                results.push(json!({ "manifest": path.display().to_string(), "error": message }));
                failures += 1;
                continue;
            }
        };

        match scanner.scan(&manifest).await {
            Ok(report) => {
                console.print_report(path, &report);
                total_dependencies += report.dependencies_checked;
                if !report.is_clean() {
                    total_issues += report.issues.len();
                }
                results.push(json!({
                    "manifest": path.display().to_string(),
                    "issues": report.issues,
                    "dependencies_checked": report.dependencies_checked,
                    "duration_secs": report.duration_secs,
                }));
            }
            Err(e) => {
                let message = e.to_string();
                console.print_failure(path, &message);
                results.push(json!({ "manifest": path.display().to_string(), "error": message }));
                failures += 1;
            }
        }
    }

    console.print_summary(paths.len(), total_dependencies, total_issues, start.elapsed().as_secs_f64());

    // Output results
    let json_output = serde_json::to_string_pretty(&results).unwrap_or_default();
    if config.json {
        if let Some(ref output_path) = config.output {
            if let Err(e) = fs::write(output_path, &json_output) {
                error!("Failed to write output file: {}", e);
                return ExitCode::FAILURE;
            }
        } else {
            println!("{}", json_output);
        }
    } else if let Some(ref output_path) = config.output {
        // Write JSON to file even in non-JSON mode
        if let Err(e) = fs::write(output_path, &json_output) {
            error!("Failed to write output file: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if failures > 0 || total_issues > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

//! Colored console output for scan reports.

use crate::types::ScanReport;
use colored::Colorize;
use std::path::Path;

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    verbose: bool,
    json_mode: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool, json_mode: bool, quiet: bool) -> Self {
        Self { verbose, json_mode, quiet }
    }

    /// Print scan start message.
    pub fn print_scan_start(&self, manifest_path: &Path) {
        if self.json_mode || self.quiet {
            return;
        }

        println!(
            "{} Scanning: {}",
            "[*]".bright_blue(),
            manifest_path.display().to_string().bright_white()
        );
    }

    /// Print scan progress (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.json_mode || !self.verbose {
            return;
        }

        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print the issue list for one manifest.
    pub fn print_report(&self, manifest_path: &Path, report: &ScanReport) {
        if self.json_mode {
            return;
        }

        if self.quiet {
            if report.is_clean() {
                return;
            }
            self.print_quiet_header(manifest_path);
        }

        if report.is_clean() {
            println!("    {}", report.issues[0].green());
            return;
        }

        for issue in &report.issues {
            println!("    {} {}", "!".red().bold(), issue.red());
        }
    }

    /// Print a parse or scan failure for one manifest.
    pub fn print_failure(&self, manifest_path: &Path, message: &str) {
        if self.json_mode {
            return;
        }

        if self.quiet {
            self.print_quiet_header(manifest_path);
        }
        println!("    {} {}", "x".yellow().bold(), message.yellow());
    }

    /// Print the end-of-run summary.
    pub fn print_summary(&self, manifests: usize, dependencies: usize, issues: usize, duration_secs: f64) {
        if self.json_mode || (self.quiet && issues == 0) {
            return;
        }

        println!();
        println!("{}", "=== Scan Summary ===".bright_cyan());
        println!("  Manifests:     {}", manifests);
        println!("  Dependencies:  {}", dependencies);
        println!("  Duration:      {:.2}s", duration_secs);

        if issues > 0 {
            println!("  {}", format!("ISSUES FOUND: {}", issues).red().bold());
        } else {
            println!("  {}", "No issues found across all manifests.".green());
        }

        println!();
    }

    // Scan-start lines are suppressed in quiet mode, so reprint one before
    // the first finding of a manifest.
    fn print_quiet_header(&self, manifest_path: &Path) {
        println!();
        println!(
            "{} {}",
            "[*]".bright_blue(),
            manifest_path.display().to_string().bright_white()
        );
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

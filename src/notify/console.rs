//! Colored console output.

use crate::notify::json::Report;
use crate::types::{Dependency, Status};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    verbose: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler. `quiet` suppresses everything
    /// except the result table and summary.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print scan start message.
    pub fn print_scan_start(&self, manifest: &str, count: usize) {
        if self.quiet {
            return;
        }

        println!(
            "{} Scanning {} dependencies from {}",
            "[*]".bright_blue(),
            count,
            manifest.bright_white()
        );
    }

    /// Whether info messages are printed.
    pub fn shows_info(&self) -> bool {
        !self.quiet
    }

    /// Whether progress details are printed (verbose mode only).
    pub fn shows_progress(&self) -> bool {
        !self.quiet && self.verbose
    }

    /// Print progress detail (verbose mode only).
    pub fn print_progress(&self, message: &str) {
        if !self.shows_progress() {
            return;
        }

        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        if !self.shows_info() {
            return;
        }

        println!("{} {}", "[*]".bright_blue(), message);
    }

    /// Print the dependency list.
    pub fn print_dependencies(&self, deps: &[Dependency]) {
        println!("{}", "Found dependencies".cyan());
        for dep in deps {
            println!("-  {}", dep);
        }
    }

    /// Print the run summary.
    pub fn print_summary(&self, report: &Report, duration_secs: f64) {
        let count = |status: Status| report.packages.iter().filter(|p| p.status == status).count();
        let vulnerable = report.vulnerable_count();

        println!();
        println!("{}", "=== Scan Summary ===".bright_cyan());
        println!("  Packages:    {}", report.packages.len());
        println!("  Duration:    {:.2}s", duration_secs);
        println!("  Suspicious:  {}", count(Status::Suspicious));

        if vulnerable > 0 {
            println!(
                "  {}",
                format!("POTENTIAL VULNERABILITIES FOUND: {}", vulnerable)
                    .red()
                    .bold()
            );
        } else {
            println!(
                "  {}",
                "No dependency confusion vulnerabilities found.".green()
            );
        }
        println!();
    }

    /// Create a progress bar.
    pub fn create_progress_bar(&self, total: u64, message: &str) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message(message.to_string());
        Some(pb)
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_output_creation() {
        let output = ConsoleOutput::new(true, false);
        assert!(output.verbose);
        assert!(!output.quiet);
    }

    #[test]
    fn test_quiet_has_no_progress_bar() {
        let output = ConsoleOutput::new(false, true);
        assert!(output.create_progress_bar(3, "Checking").is_none());
        assert!(ConsoleOutput::default().create_progress_bar(3, "Checking").is_some());
    }

    #[test]
    fn test_info_shown_without_verbose() {
        let output = ConsoleOutput::new(false, false);
        assert!(output.shows_info());
        assert!(!output.shows_progress());

        let verbose = ConsoleOutput::new(true, false);
        assert!(verbose.shows_info());
        assert!(verbose.shows_progress());

        let quiet = ConsoleOutput::new(true, true);
        assert!(!quiet.shows_info());
        assert!(!quiet.shows_progress());
    }
}

//! paksafe - dependency confusion scanner.
//!
//! CLI entry point.

use clap::Parser;
use paksafe::manifest::read_dependencies;
use paksafe::notify::{render_table, write_report, ConsoleOutput, OutputFormat, Report};
use paksafe::{Commands, Config, NpmConfig, Scanner};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("paksafe=debug,info")
    } else {
        EnvFilter::new("paksafe=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match config.command.clone() {
        Commands::Npm(npm_config) => {
            if let Err(code) = run_npm(npm_config, &config).await {
                return code;
            }
        }
    }

    ExitCode::SUCCESS
}

async fn run_npm(npm_config: NpmConfig, global_config: &Config) -> Result<(), ExitCode> {
    if let Err(e) = npm_config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ExitCode::FAILURE);
    }

    let deps = match read_dependencies(&npm_config.manifest, npm_config.include_dev) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to read dependencies: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let console = ConsoleOutput::new(global_config.verbose, npm_config.quiet);

    if deps.is_empty() {
        console.print_info("Haven't found any dependencies");
        return Ok(());
    }

    if !npm_config.should_scan() {
        console.print_dependencies(&deps);
        return Ok(());
    }

    let scanner = match Scanner::new(&npm_config, global_config.verbose) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create scanner: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    console.print_scan_start(&npm_config.manifest.display().to_string(), deps.len());
    let outcome = scanner.scan(&deps).await;
    let report = Report::from_results(&deps, &outcome.results);

    let format = npm_config.output_format();
    if format == OutputFormat::Table {
        println!();
        println!("{}", render_table(&report));
        console.print_summary(&report, outcome.duration_secs);
    }

    if let Some(path) = npm_config.report_path(format) {
        if let Err(e) = write_report(&report, &path) {
            error!("Failed to write output file: {}", e);
            return Err(ExitCode::FAILURE);
        }
        info!("Results saved to: {}", path.display());
    }

    if format == OutputFormat::Json && report.vulnerable_count() > 0 {
        eprintln!(
            "\n{} potential dependency confusion vulnerabilities found!",
            report.vulnerable_count()
        );
    }

    Ok(())
}

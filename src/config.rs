//! Command line configuration.

use crate::classify::{EngineConfig, NPM_PUBLIC_REGISTRY};
use crate::notify::OutputFormat;
use crate::types::{HttpConfig, PaksafeError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

/// Default JSON report path.
pub const DEFAULT_RESULT_PATH: &str = "./result.json";

/// Dependency confusion scanner for package manifests.
#[derive(Parser, Debug, Clone)]
#[command(name = "paksafe")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan npm dependencies for dependency confusion risks
    Npm(NpmConfig),
}

/// Configuration for the npm command.
#[derive(Parser, Debug, Clone)]
pub struct NpmConfig {
    /// Path to package.json
    #[arg(default_value = "package.json")]
    pub manifest: PathBuf,

    /// Only list dependencies without scanning
    #[arg(long)]
    pub only_list: bool,

    /// Scan dependencies (default when --only-list is not given)
    #[arg(long)]
    pub scan: bool,

    /// Output format: table or json
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Output file path for the JSON report (default: ./result.json)
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Private registry base URL (enables private registry checks)
    #[arg(long, env = "PAKSAFE_PRIVATE_REGISTRY")]
    pub private_registry: Option<String>,

    /// Private scope prefix, e.g. @myorg
    #[arg(long, env = "PAKSAFE_PRIVATE_SCOPE")]
    pub private_scope: Option<String>,

    /// Public registry base URL
    #[arg(long, default_value = NPM_PUBLIC_REGISTRY)]
    pub public_registry: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Number of dependencies checked concurrently
    #[arg(long, short = 'c', default_value = "16")]
    pub concurrency: usize,

    /// Custom User-Agent string
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Also read devDependencies
    #[arg(long)]
    pub include_dev: bool,

    /// Quiet mode: only print results
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("package.json"),
            only_list: false,
            scan: false,
            format: "table".to_string(),
            output_file: None,
            private_registry: None,
            private_scope: None,
            public_registry: NPM_PUBLIC_REGISTRY.to_string(),
            timeout: 10,
            concurrency: 16,
            user_agent: None,
            include_dev: false,
            quiet: false,
        }
    }
}

impl NpmConfig {
    /// Get HTTP configuration.
    pub fn http_config(&self) -> HttpConfig {
        let mut http = HttpConfig {
            timeout_secs: self.timeout,
            ..HttpConfig::default()
        };
        if let Some(ref ua) = self.user_agent {
            http.user_agent = ua.clone();
        }
        http
    }

    /// Get classification engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(
            self.private_registry.as_deref(),
            self.private_scope.as_deref(),
            &self.public_registry,
        )
    }

    /// Whether to scan (as opposed to only listing).
    pub fn should_scan(&self) -> bool {
        self.scan || !self.only_list
    }

    /// Parsed output format. Unknown names fall back to table.
    pub fn output_format(&self) -> OutputFormat {
        self.format.parse().unwrap_or_else(|e| {
            warn!("{}; falling back to table output", e);
            OutputFormat::Table
        })
    }

    /// Destination for the JSON report under an already parsed format.
    pub fn report_path(&self, format: OutputFormat) -> Option<PathBuf> {
        match format {
            OutputFormat::Json => Some(
                self.output_file
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULT_PATH)),
            ),
            OutputFormat::Table => self.output_file.clone(),
        }
    }

    /// Check values that clap cannot.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.public_registry)?;

        if let Some(private) = self.private_registry.as_deref().map(str::trim) {
            if !private.is_empty() {
                url::Url::parse(private)?;
            }
        }

        if self.concurrency == 0 {
            return Err(PaksafeError::ConfigError(
                "concurrency must be at least 1".to_string(),
            ));
        }

        if let Some(scope) = self.private_scope.as_deref().map(str::trim) {
            if !scope.is_empty() && !scope.starts_with('@') {
                warn!(
                    "Private scope '{}' does not start with '@'; matching packages will be reported as not_possible",
                    scope
                );
            }
            if !scope.is_empty() && self.engine_config().private_registry().is_none() {
                warn!("Private scope is ignored without --private-registry");
            }
        }

        Ok(())
    }
}

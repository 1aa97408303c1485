//! paksafe - dependency confusion scanner for npm manifests.
//!
//! This library flags dependencies that can be shadowed or hijacked through a
//! public registry by:
//! - Reading declared dependencies from `package.json`
//! - Checking whether each package exists in a private and a public registry
//! - Classifying the scope/presence combination into a risk status
//!
//! # Example
//!
//! ```no_run
//! use paksafe::config::NpmConfig;
//! use paksafe::manifest::read_dependencies;
//! use paksafe::scanner::Scanner;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = NpmConfig::default();
//!     let deps = read_dependencies(&config.manifest, false).unwrap();
//!     let scanner = Scanner::new(&config, false).unwrap();
//!     let outcome = scanner.scan(&deps).await;
//!     println!("Classified {} packages", outcome.results.len());
//! }
//! ```

pub mod classify;
pub mod config;
pub mod manifest;
pub mod notify;
pub mod registry;
pub mod scanner;
pub mod types;

pub use classify::{
    classify, classify_public_only, classify_scope, compare_versions, Classifier, EngineConfig,
    RegistryMode,
};
pub use config::{Commands, Config, NpmConfig};
pub use registry::{PresenceOracle, RegistryProbe};
pub use scanner::{ScanOutcome, Scanner};
pub use types::{
    ClassificationResult, Dependency, PaksafeError, PresenceResult, Result, ScopeAssessment,
    ScopeCategory, Status,
};

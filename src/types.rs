//! Core types and errors for the dependency confusion scanner.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during a run.
#[derive(Error, Debug)]
pub enum PaksafeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, PaksafeError>;

/// A dependency declared in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Dependency {
    /// Package name (e.g., "@company/pkg" or "lodash").
    pub name: String,
    /// Version constraint as written in the manifest.
    pub declared_version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, declared_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_version: declared_version.into(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.declared_version)
    }
}

/// Whether a package was found in one registry, and its `latest` tag.
///
/// A failed probe is reported exactly like an absent package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceResult {
    pub found: bool,
    /// Empty when not found, on probe failure, or when the tag is missing.
    pub latest_version: String,
}

impl PresenceResult {
    pub fn found(latest_version: impl Into<String>) -> Self {
        Self {
            found: true,
            latest_version: latest_version.into(),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

/// Scope facts derived from a package name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeAssessment {
    /// Name carries the `@` organization marker.
    pub is_org_scoped: bool,
    /// Name starts with the configured private scope prefix.
    pub is_private_scope: bool,
}

/// Which row group of the decision table a name falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeCategory {
    /// Plain package name without `@scope/`.
    Unscoped,
    /// Scoped under the configured private scope.
    OwnScope,
    /// Scoped under some other organization.
    OtherOrgScope,
}

impl ScopeAssessment {
    /// Map to a table category. `None` means the private scope prefix is
    /// inconsistent with the `@` marker (a configuration error).
    pub fn category(&self) -> Option<ScopeCategory> {
        match (self.is_org_scoped, self.is_private_scope) {
            (false, false) => Some(ScopeCategory::Unscoped),
            (true, true) => Some(ScopeCategory::OwnScope),
            (true, false) => Some(ScopeCategory::OtherOrgScope),
            (false, true) => None,
        }
    }
}

/// Risk status assigned to a dependency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Secure,
    Vulnerable,
    Suspicious,
    Available,
    NotFound,
    NotPossible,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Secure => "secure",
            Status::Vulnerable => "vulnerable",
            Status::Suspicious => "suspicious",
            Status::Available => "available",
            Status::NotFound => "not_found",
            Status::NotPossible => "not_possible",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for a single dependency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub status: Status,
    /// Human-readable justification.
    pub reason: String,
    pub is_vulnerable: bool,
    /// Latest version in the private registry, or the declared version when
    /// no private registry was queried.
    pub private_version: String,
    /// Latest version in the public registry.
    pub public_version: String,
}

/// Configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "paksafe/0.1".to_string(),
        }
    }
}

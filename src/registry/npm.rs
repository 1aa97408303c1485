//! npm-compatible registry probe.

use crate::registry::PresenceOracle;
use crate::types::{HttpConfig, PresenceResult, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Registry API response for package info.
#[derive(Debug, Deserialize)]
struct PackageInfo {
    #[serde(rename = "dist-tags")]
    dist_tags: Option<DistTags>,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: Option<String>,
}

/// HTTP probe shared by every lookup in a run.
pub struct RegistryProbe {
    client: Client,
    timeout: Duration,
}

impl RegistryProbe {
    /// Create a new probe with one pooled client.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(&config.user_agent)
            .http1_only()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Timeout applied to each request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform the request. Any failure yields an absent result.
    async fn fetch(&self, name: &str, registry_base_url: &str) -> PresenceResult {
        let url = package_url(registry_base_url, name);
        trace!("Probing registry: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error checking {} in registry {}: {}", name, registry_base_url, e);
                return PresenceResult::absent();
            }
        };

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                debug!("Package not found: {} ({})", name, registry_base_url);
                return PresenceResult::absent();
            }
            status => {
                warn!("Registry {} answered HTTP {} for {}", registry_base_url, status, name);
                return PresenceResult::absent();
            }
        }

        match response.json::<PackageInfo>().await {
            Ok(info) => {
                let latest = info.dist_tags.and_then(|dt| dt.latest).unwrap_or_default();
                debug!("Package exists: {} latest={:?} ({})", name, latest, registry_base_url);
                PresenceResult::found(latest)
            }
            Err(e) => {
                warn!("Failed to parse registry response for {}: {}", name, e);
                PresenceResult::absent()
            }
        }
    }
}

#[async_trait]
impl PresenceOracle for RegistryProbe {
    async fn probe(&self, name: &str, registry_base_url: &str) -> PresenceResult {
        if registry_base_url.is_empty() {
            return PresenceResult::absent();
        }

        // Outer bound in case the body stalls past the client timeout.
        let bound = self.timeout + Duration::from_secs(1);
        match tokio::time::timeout(bound, self.fetch(name, registry_base_url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Timed out checking {} in registry {}", name, registry_base_url);
                PresenceResult::absent()
            }
        }
    }
}

/// Build `<base>/<name>` with the trailing slash stripped from the base and
/// the name encoded as a single path segment.
pub fn package_url(registry_base_url: &str, name: &str) -> String {
    format!(
        "{}/{}",
        registry_base_url.trim_end_matches('/'),
        urlencoding::encode(name)
    )
}

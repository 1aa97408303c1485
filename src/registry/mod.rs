//! Registry presence lookups.
//!
//! Answers "does this package exist in that registry, and what is its
//! latest version?". Failures are reported as absence.

pub mod npm;

pub use npm::RegistryProbe;

use crate::types::PresenceResult;
use async_trait::async_trait;

/// Source of registry presence information.
#[async_trait]
pub trait PresenceOracle: Send + Sync {
    /// Look up `name` in the registry at `registry_base_url`.
    async fn probe(&self, name: &str, registry_base_url: &str) -> PresenceResult;
}

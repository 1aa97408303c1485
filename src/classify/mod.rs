//! Dependency confusion classification engine.
//!
//! Combines the scope of a package name with its presence in a private and a
//! public registry:
//! - `scope` decides whether a name is org-scoped and/or in the private scope
//! - `version` orders two version strings for the tie-break note
//! - `matrix` holds the decision table

pub mod matrix;
pub mod scope;
pub mod version;

pub use matrix::{lookup, Verdict, DECISION_TABLE};
pub use scope::classify_scope;
pub use version::compare_versions;

use crate::types::{ClassificationResult, Dependency, PresenceResult, ScopeAssessment, Status};

/// Default public npm registry.
pub const NPM_PUBLIC_REGISTRY: &str = "https://registry.npmjs.org";

/// Which registries the engine consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryMode {
    /// No private registry configured: only public presence matters.
    PublicOnly,
    /// Query both registries and apply the decision table.
    PrivateAndPublic { private_registry: String },
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: RegistryMode,
    /// Private scope prefix such as `@myorg`. Empty disables own-scope detection.
    pub private_scope: String,
    pub public_registry: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: RegistryMode::PublicOnly,
            private_scope: String::new(),
            public_registry: NPM_PUBLIC_REGISTRY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Build from optional CLI values; an empty private registry selects
    /// public-only mode.
    pub fn new(private_registry: Option<&str>, private_scope: Option<&str>, public_registry: &str) -> Self {
        let mode = match private_registry.map(str::trim) {
            Some(url) if !url.is_empty() => RegistryMode::PrivateAndPublic {
                private_registry: url.to_string(),
            },
            _ => RegistryMode::PublicOnly,
        };

        Self {
            mode,
            private_scope: private_scope.unwrap_or_default().trim().to_string(),
            public_registry: public_registry.to_string(),
        }
    }

    pub fn private_registry(&self) -> Option<&str> {
        match &self.mode {
            RegistryMode::PrivateAndPublic { private_registry } => Some(private_registry),
            RegistryMode::PublicOnly => None,
        }
    }
}

/// Classify a dependency given both registry results and its scope.
pub fn classify(
    dep: &Dependency,
    private_info: &PresenceResult,
    public_info: &PresenceResult,
    scope: ScopeAssessment,
) -> ClassificationResult {
    let verdict = match scope.category() {
        Some(category) => lookup(category, private_info.found, public_info.found)
            .unwrap_or(&matrix::SCOPE_CONFIG_ERROR),
        None => &matrix::SCOPE_CONFIG_ERROR,
    };

    let mut reason = verdict.reason.to_string();
    if verdict.version_note {
        let note = matrix::version_note(&public_info.latest_version, &private_info.latest_version);
        reason.push_str(&format!(" ({})", note));
    }

    tracing::trace!("{}: {} ({})", dep.name, verdict.status, reason);

    ClassificationResult {
        status: verdict.status,
        reason,
        is_vulnerable: verdict.vulnerable,
        private_version: private_info.latest_version.clone(),
        public_version: public_info.latest_version.clone(),
    }
}

/// Classify a dependency when no private registry is configured.
pub fn classify_public_only(dep: &Dependency, public_info: &PresenceResult) -> ClassificationResult {
    let (status, reason, is_vulnerable) = if public_info.found {
        (Status::Available, "found in public registry", false)
    } else {
        (Status::Vulnerable, "not found in public registry", true)
    };

    ClassificationResult {
        status,
        reason: reason.to_string(),
        is_vulnerable,
        private_version: dep.declared_version.clone(),
        public_version: public_info.latest_version.clone(),
    }
}

/// Result for a dependency whose evaluation could not complete.
pub fn unknown(dep: &Dependency, error: &str) -> ClassificationResult {
    ClassificationResult {
        status: Status::Unknown,
        reason: format!("Classification failed: {}", error),
        is_vulnerable: false,
        private_version: dep.declared_version.clone(),
        public_version: String::new(),
    }
}

/// Engine bound to one configuration.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: EngineConfig,
}

impl Classifier {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scope_of(&self, name: &str) -> ScopeAssessment {
        classify_scope(name, &self.config.private_scope)
    }

    /// Classify according to the configured mode. `private_info` is ignored
    /// in public-only mode.
    pub fn evaluate(
        &self,
        dep: &Dependency,
        private_info: &PresenceResult,
        public_info: &PresenceResult,
    ) -> ClassificationResult {
        match self.config.mode {
            RegistryMode::PublicOnly => classify_public_only(dep, public_info),
            RegistryMode::PrivateAndPublic { .. } => {
                classify(dep, private_info, public_info, self.scope_of(&dep.name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScopeCategory;

    fn presence(found: bool, version: &str) -> PresenceResult {
        PresenceResult {
            found,
            latest_version: version.to_string(),
        }
    }

    fn scope_for(category: ScopeCategory) -> ScopeAssessment {
        match category {
            ScopeCategory::Unscoped => ScopeAssessment {
                is_org_scoped: false,
                is_private_scope: false,
            },
            ScopeCategory::OwnScope => ScopeAssessment {
                is_org_scoped: true,
                is_private_scope: true,
            },
            ScopeCategory::OtherOrgScope => ScopeAssessment {
                is_org_scoped: true,
                is_private_scope: false,
            },
        }
    }

    fn private_engine(scope: &str) -> Classifier {
        Classifier::new(EngineConfig::new(Some("https://npm.internal.example"), Some(scope), NPM_PUBLIC_REGISTRY))
    }

    #[test]
    fn test_all_matrix_cells() {
        use ScopeCategory::*;
        let expected = [
            (Unscoped, true, true, Status::Suspicious, false),
            (Unscoped, true, false, Status::Vulnerable, true),
            (Unscoped, false, true, Status::Secure, false),
            (Unscoped, false, false, Status::NotFound, false),
            (OwnScope, true, true, Status::Secure, false),
            (OwnScope, true, false, Status::Secure, false),
            (OwnScope, false, true, Status::Vulnerable, true),
            (OwnScope, false, false, Status::NotFound, false),
            (OtherOrgScope, true, true, Status::Suspicious, false),
            (OtherOrgScope, true, false, Status::Suspicious, false),
            (OtherOrgScope, false, true, Status::Secure, false),
            (OtherOrgScope, false, false, Status::NotPossible, false),
        ];

        let dep = Dependency::new("pkg", "^1.0.0");
        for (category, private_found, public_found, status, vulnerable) in expected {
            let private_info = presence(private_found, if private_found { "1.0.0" } else { "" });
            let public_info = presence(public_found, if public_found { "1.0.0" } else { "" });
            let result = classify(&dep, &private_info, &public_info, scope_for(category));
            assert_eq!(result.status, status, "{:?} {} {}", category, private_found, public_found);
            assert_eq!(result.is_vulnerable, vulnerable, "{:?} {} {}", category, private_found, public_found);
        }
    }

    #[test]
    fn test_inconsistent_scope_is_not_possible() {
        let dep = Dependency::new("corp-utils", "1.0.0");
        let scope = ScopeAssessment { is_org_scoped: false, is_private_scope: true };
        for (p, q) in [(true, true), (true, false), (false, true), (false, false)] {
            let result = classify(&dep, &presence(p, ""), &presence(q, ""), scope);
            assert_eq!(result.status, Status::NotPossible);
            assert!(!result.is_vulnerable);
        }
    }

    #[test]
    fn test_idempotent() {
        let dep = Dependency::new("@babel/core", "^7.0.0");
        let private_info = presence(true, "7.1.0");
        let public_info = presence(true, "7.24.0");
        let scope = classify_scope(&dep.name, "@myorg");
        let first = classify(&dep, &private_info, &public_info, scope);
        let second = classify(&dep, &private_info, &public_info, scope);
        assert_eq!(first, second);
    }

    #[test]
    fn test_left_pad_public_only_available() {
        let engine = Classifier::new(EngineConfig::default());
        let dep = Dependency::new("left-pad", "^1.3.0");
        let result = engine.evaluate(&dep, &PresenceResult::absent(), &presence(true, "1.3.0"));
        assert_eq!(result.status, Status::Available);
        assert!(!result.is_vulnerable);
        assert_eq!(result.public_version, "1.3.0");
        assert_eq!(result.private_version, "^1.3.0");
    }

    #[test]
    fn test_own_scope_private_only_secure() {
        let engine = private_engine("@myorg");
        let dep = Dependency::new("@myorg/internal-lib", "^2.0.0");
        let result = engine.evaluate(&dep, &presence(true, "2.1.0"), &PresenceResult::absent());
        assert_eq!(result.status, Status::Secure);
        assert_eq!(result.private_version, "2.1.0");
        assert_eq!(result.public_version, "");
    }

    #[test]
    fn test_own_scope_public_only_vulnerable() {
        let engine = private_engine("@myorg");
        let dep = Dependency::new("@myorg/internal-lib", "^2.0.0");
        let result = engine.evaluate(&dep, &PresenceResult::absent(), &presence(true, "0.0.1"));
        assert_eq!(result.status, Status::Vulnerable);
        assert!(result.is_vulnerable);
        assert_eq!(result.public_version, "0.0.1");
    }

    #[test]
    fn test_unscoped_both_found_private_higher() {
        let engine = private_engine("@myorg");
        let dep = Dependency::new("leftpad-evil", "2.0.0");
        let result = engine.evaluate(&dep, &presence(true, "2.0.0"), &presence(true, "1.0.0"));
        assert_eq!(result.status, Status::Suspicious);
        assert!(!result.reason.contains("version bombing"));
        assert!(result.reason.contains("private version is higher"));
    }

    #[test]
    fn test_unscoped_both_found_public_higher() {
        let engine = private_engine("@myorg");
        let dep = Dependency::new("leftpad-evil", "2.0.0");
        let result = engine.evaluate(&dep, &presence(true, "2.0.0"), &presence(true, "99.0.0"));
        assert_eq!(result.status, Status::Suspicious);
        assert!(result.reason.contains("version bombing"));
    }

    #[test]
    fn test_external_scope_same_version_mentions_proxy() {
        let engine = private_engine("@myorg");
        let dep = Dependency::new("@babel/core", "^7.0.0");
        let result = engine.evaluate(&dep, &presence(true, "7.24.0"), &presence(true, "7.24.0"));
        assert_eq!(result.status, Status::Suspicious);
        assert!(result.reason.contains("proxy"));
    }

    #[test]
    fn test_public_only_not_found_vulnerable() {
        let engine = Classifier::new(EngineConfig::default());
        let dep = Dependency::new("internal-only-tool", "1.0.0");
        let result = engine.evaluate(&dep, &PresenceResult::absent(), &PresenceResult::absent());
        assert_eq!(result.status, Status::Vulnerable);
        assert!(result.is_vulnerable);
        assert_eq!(result.reason, "not found in public registry");
    }

    #[test]
    fn test_engine_config_mode_selection() {
        assert_eq!(EngineConfig::new(None, None, NPM_PUBLIC_REGISTRY).mode, RegistryMode::PublicOnly);
        assert_eq!(EngineConfig::new(Some("  "), None, NPM_PUBLIC_REGISTRY).mode, RegistryMode::PublicOnly);

        let config = EngineConfig::new(Some("https://npm.corp"), Some("@corp"), NPM_PUBLIC_REGISTRY);
        assert_eq!(config.private_registry(), Some("https://npm.corp"));
        assert_eq!(config.private_scope, "@corp");
    }

    #[test]
    fn test_unknown_result() {
        let dep = Dependency::new("x", "1.0.0");
        let result = unknown(&dep, "task panicked");
        assert_eq!(result.status, Status::Unknown);
        assert!(result.reason.contains("task panicked"));
    }
}

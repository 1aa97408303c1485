//! Scope detection for package names.

use crate::types::ScopeAssessment;

/// Organization scope marker (`@scope/name`).
pub const ORG_SCOPE_MARKER: char = '@';

/// Classify a package name against the configured private scope prefix.
///
/// Membership in the private scope is a plain textual prefix match.
pub fn classify_scope(name: &str, private_scope_prefix: &str) -> ScopeAssessment {
    ScopeAssessment {
        is_org_scoped: is_org_scoped(name),
        is_private_scope: belongs_to_private_scope(name, private_scope_prefix),
    }
}

/// Check if a package name is organization scoped.
pub fn is_org_scoped(name: &str) -> bool {
    name.starts_with(ORG_SCOPE_MARKER)
}

/// Check if a package name starts with the private scope prefix.
pub fn belongs_to_private_scope(name: &str, private_scope_prefix: &str) -> bool {
    !private_scope_prefix.is_empty() && name.starts_with(private_scope_prefix)
}

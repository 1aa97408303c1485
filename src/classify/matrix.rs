//! Decision table mapping scope and registry presence to a status.

use crate::classify::version::compare_versions;
use crate::types::{ScopeCategory, Status};
use std::cmp::Ordering;
use ScopeCategory::{OtherOrgScope, OwnScope, Unscoped};

/// Outcome stored in one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub status: Status,
    pub vulnerable: bool,
    pub reason: &'static str,
    /// Append a note comparing public and private versions.
    pub version_note: bool,
}

/// One row of the decision table.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub category: ScopeCategory,
    pub private_found: bool,
    pub public_found: bool,
    pub verdict: Verdict,
}

const fn cell(
    category: ScopeCategory,
    private_found: bool,
    public_found: bool,
    status: Status,
    vulnerable: bool,
    reason: &'static str,
    version_note: bool,
) -> Cell {
    Cell {
        category,
        private_found,
        public_found,
        verdict: Verdict {
            status,
            vulnerable,
            reason,
            version_note,
        },
    }
}

/// Every reachable `(scope, private found, public found)` combination.
#[rustfmt::skip]
pub static DECISION_TABLE: [Cell; 12] = [
    cell(Unscoped, true, true, Status::Suspicious, false,
        "Unscoped package exists in both registries", true),
    cell(Unscoped, true, false, Status::Vulnerable, true,
        "Unscoped package exists only in private registry (high risk for name squatting)", false),
    cell(Unscoped, false, true, Status::Secure, false,
        "Public package exists only in public registry (normal scenario)", false),
    cell(Unscoped, false, false, Status::NotFound, false,
        "Package not found in any registry", false),
    cell(OwnScope, true, true, Status::Secure, false,
        "Own-scoped package exists in both registries (likely intentional)", false),
    cell(OwnScope, true, false, Status::Secure, false,
        "Own-scoped package exists only in private registry (secure scenario)", false),
    cell(OwnScope, false, true, Status::Vulnerable, true,
        "Own-scoped package exists only in public registry (high risk dependency confusion)", false),
    cell(OwnScope, false, false, Status::NotFound, false,
        "Own-scoped package not found in any registry", false),
    cell(OtherOrgScope, true, true, Status::Suspicious, false,
        "External-scoped package exists in both registries", true),
    cell(OtherOrgScope, true, false, Status::Suspicious, false,
        "External-scoped package exists only in private registry (unusual scenario)", false),
    cell(OtherOrgScope, false, true, Status::Secure, false,
        "External-scoped public package (normal scenario)", false),
    cell(OtherOrgScope, false, false, Status::NotPossible, false,
        "External-scoped package not found anywhere", false),
];

/// Verdict for names that are unscoped yet match the private scope prefix.
pub static SCOPE_CONFIG_ERROR: Verdict = Verdict {
    status: Status::NotPossible,
    vulnerable: false,
    reason: "Package cannot be unscoped and belong to the private scope (check the private scope prefix)",
    version_note: false,
};

/// Find the cell for a combination. Always `Some` for the three categories.
pub fn lookup(category: ScopeCategory, private_found: bool, public_found: bool) -> Option<&'static Verdict> {
    DECISION_TABLE
        .iter()
        .find(|c| {
            c.category == category && c.private_found == private_found && c.public_found == public_found
        })
        .map(|c| &c.verdict)
}

/// Note appended when a package is present in both registries.
pub fn version_note(public_version: &str, private_version: &str) -> &'static str {
    match compare_versions(public_version, private_version) {
        Ordering::Greater => "public version is higher - possible version bombing",
        Ordering::Less => "private version is higher",
        Ordering::Equal => "same version in both registries - possibly served through a proxy cache",
    }
}

//! Version ordering used for the tie-break annotation.

use std::cmp::Ordering;

/// Compare two version strings.
///
/// An empty version sorts below any non-empty one. Non-empty versions are
/// compared as opaque strings, so `"10.0.0" < "9.0.0"`. The decision table
/// only uses this for an advisory note on the reason.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

//! JSON report.

use crate::types::{ClassificationResult, Dependency, PaksafeError, Result, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One flat row of the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageEntry {
    pub package: String,
    /// Declared version from the manifest.
    pub version: String,
    pub status: Status,
    pub reason: String,
    pub is_vulnerable: bool,
    pub private_version: String,
    pub public_version: String,
}

/// Top-level report document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub packages: Vec<PackageEntry>,
}

impl Report {
    /// Build a report with rows sorted by package name. Dependencies without a
    /// result are skipped.
    pub fn from_results(deps: &[Dependency], results: &HashMap<String, ClassificationResult>) -> Self {
        let mut packages: Vec<PackageEntry> = deps
            .iter()
            .filter_map(|dep| {
                let result = results.get(&dep.name)?;
                Some(PackageEntry {
                    package: dep.name.clone(),
                    version: dep.declared_version.clone(),
                    status: result.status,
                    reason: result.reason.clone(),
                    is_vulnerable: result.is_vulnerable,
                    private_version: result.private_version.clone(),
                    public_version: result.public_version.clone(),
                })
            })
            .collect();

        packages.sort_by(|a, b| a.package.cmp(&b.package));
        Self { packages }
    }

    pub fn vulnerable_count(&self) -> usize {
        self.packages.iter().filter(|p| p.is_vulnerable).count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the report as indented JSON.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json).map_err(|e| {
        PaksafeError::OutputError(format!("cannot save to {}: {}", path.display(), e))
    })
}

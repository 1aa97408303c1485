//! `package.json` dependency reader.

use crate::types::{Dependency, PaksafeError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Read the dependencies declared in a manifest file.
///
/// The `dependencies` object is required. With `include_dev`, entries from
/// `devDependencies` are merged in; `dependencies` wins on duplicate names.
pub fn read_dependencies(path: &Path, include_dev: bool) -> Result<Vec<Dependency>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PaksafeError::ManifestError(format!("error reading {}: {}", path.display(), e))
    })?;

    let deps = parse_dependencies(&content, include_dev)?;
    debug!("Read {} dependencies from {}", deps.len(), path.display());
    Ok(deps)
}

/// Parse dependencies from manifest text. Output is sorted by name.
pub fn parse_dependencies(content: &str, include_dev: bool) -> Result<Vec<Dependency>> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| PaksafeError::ManifestError(format!("error parsing manifest: {}", e)))?;

    let dependencies = document
        .get("dependencies")
        .and_then(Value::as_object)
        .ok_or_else(|| PaksafeError::ManifestError("no dependencies found in the file".to_string()))?;

    let mut by_name: BTreeMap<String, String> = BTreeMap::new();

    if include_dev {
        if let Some(dev) = document.get("devDependencies").and_then(Value::as_object) {
            collect(dev, &mut by_name);
        }
    }
    collect(dependencies, &mut by_name);

    Ok(by_name
        .into_iter()
        .map(|(name, version)| Dependency::new(name, version))
        .collect())
}

fn collect(map: &Map<String, Value>, into: &mut BTreeMap<String, String>) {
    for (name, version) in map {
        let version = match version {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        into.insert(name.clone(), version);
    }
}

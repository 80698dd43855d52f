//! `Cargo.lock` parser.

use crate::sbom_generation::domain::{
    Component, DependencyEdge, Ecosystem, ParsedLockfile, UNKNOWN_VERSION,
};
use crate::shared::Result;
use anyhow::Context;
use std::collections::{HashMap, HashSet};
use toml::{Table, Value};

/// Identity of the crate being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoRoot {
    pub name: String,
    pub version: Option<String>,
}

impl CargoRoot {
    /// Reads `[package]` from `Cargo.toml`, falling back to `fallback_name`
    /// for virtual workspaces, unreadable manifests, or no manifest at all.
    pub fn from_manifest(cargo_toml: Option<&str>, fallback_name: &str) -> Self {
        let package = cargo_toml.and_then(|content| match toml::from_str::<Table>(content) {
            Ok(table) => table.get("package").and_then(Value::as_table).cloned(),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparsable Cargo.toml");
                None
            }
        });

        let name = package
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .filter(|n| !n.trim().is_empty());

        match name {
            Some(name) => Self {
                name: name.to_string(),
                // `version.workspace = true` is a table, not a version
                version: package
                    .as_ref()
                    .and_then(|p| p.get("version"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            None => Self {
                name: fallback_name.to_string(),
                version: None,
            },
        }
    }

    fn component(&self) -> Option<Component> {
        let version = self.version.as_deref().unwrap_or(UNKNOWN_VERSION);
        match Component::new(Ecosystem::Cargo, &self.name, version) {
            Ok(component) => Some(component.as_application()),
            Err(e) => {
                tracing::debug!(name = %self.name, error = %e, "no root component for crate");
                None
            }
        }
    }
}

pub fn parse_cargo_lock(content: &str, root: &CargoRoot) -> Result<ParsedLockfile> {
    let lock: Table = toml::from_str(content).context("Cargo.lock is not valid TOML")?;
    let packages = lock
        .get("package")
        .or_else(|| lock.get("packages"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut parsed = ParsedLockfile::new(Ecosystem::Cargo);
    parsed.root = root.component();

    let mut seen: HashSet<String> = HashSet::new();
    let mut purl_by_name_version: HashMap<String, String> = HashMap::new();
    let mut purls_by_name: HashMap<String, Vec<String>> = HashMap::new();
    let mut pending_edges: Vec<(String, Vec<&str>)> = Vec::new();
    let mut root_purl: Option<String> = None;

    for entry in packages {
        let Some(entry) = entry.as_table() else {
            continue;
        };
        let name = entry.get("name").and_then(Value::as_str);
        let version = entry.get("version").and_then(Value::as_str);
        let (Some(name), Some(version)) = (name, version) else {
            tracing::debug!("skipping Cargo.lock entry without string name and version");
            continue;
        };

        let component = match Component::new(Ecosystem::Cargo, name, version) {
            Ok(component) => component,
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "skipping invalid Cargo.lock entry");
                continue;
            }
        };
        let component = match entry.get("checksum").and_then(Value::as_str) {
            Some(checksum) => component.with_hash("SHA-256", checksum),
            None => component,
        };

        let purl = component.purl().to_string();
        if !seen.insert(purl.clone()) {
            continue;
        }

        let is_root = name == root.name
            && root.version.as_deref().map_or(true, |v| v == version);
        if is_root && root_purl.is_none() {
            root_purl = Some(purl.clone());
        }

        purl_by_name_version.insert(format!("{} {}", name, version), purl.clone());
        purls_by_name
            .entry(name.to_string())
            .or_default()
            .push(purl.clone());

        let dependencies = entry
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        pending_edges.push((purl, dependencies));
        parsed.components.push(component);
    }

    for (from_ref, dependencies) in pending_edges {
        let mut edge = DependencyEdge::new(from_ref);
        for dependency in dependencies {
            match resolve_dependency(dependency, &purl_by_name_version, &purls_by_name) {
                Some(target) => edge.add_target(target.to_string()),
                None => tracing::debug!(
                    from = %edge.from_ref(),
                    dependency = %dependency,
                    "unresolved Cargo.lock dependency"
                ),
            }
        }

        if root_purl.as_deref() == Some(edge.from_ref()) {
            parsed.direct_dependencies = edge.to_refs().map(str::to_string).collect();
        }
        if !edge.is_empty() {
            parsed.edges.push(edge);
        }
    }

    Ok(parsed)
}

/// Resolves `"name"`, `"name version"` or `"name version (source)"`.
///
/// A bare name only resolves when the lock holds a single version of it.
fn resolve_dependency<'a>(
    dependency: &str,
    purl_by_name_version: &'a HashMap<String, String>,
    purls_by_name: &'a HashMap<String, Vec<String>>,
) -> Option<&'a str> {
    let mut parts = dependency.split_whitespace();
    let name = parts.next()?;
    match parts.next().filter(|p| !p.starts_with('(')) {
        Some(version) => purl_by_name_version
            .get(&format!("{} {}", name, version))
            .map(String::as_str),
        None => match purls_by_name.get(name).map(Vec::as_slice) {
            Some([only]) => Some(only.as_str()),
            _ => None,
        },
    }
}

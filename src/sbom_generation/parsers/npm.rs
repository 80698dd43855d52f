//! `package-lock.json` parser.
//!
//! Handles the lockfileVersion 2/3 `packages` map and falls back to the
//! legacy top-level `dependencies` map. Only the `packages` form carries
//! enough structure to build a dependency graph.

use crate::sbom_generation::domain::{Component, DependencyEdge, Ecosystem, ParsedLockfile};
use crate::shared::Result;
use anyhow::Context;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

const NODE_MODULES: &str = "node_modules/";

/// Fields of a package entry whose keys are resolved into edges.
const EDGE_FIELDS: &[&str] = &["dependencies", "optionalDependencies"];

/// Fields of the root entry that list the project's own dependencies.
const ROOT_FIELDS: &[&str] = &["dependencies", "devDependencies", "optionalDependencies"];

pub fn parse_package_lock(content: &str) -> Result<ParsedLockfile> {
    let lock: Value =
        serde_json::from_str(content).context("package-lock.json is not valid JSON")?;
    let Some(lock) = lock.as_object() else {
        anyhow::bail!("package-lock.json must contain a JSON object");
    };

    match lock.get("packages").and_then(Value::as_object) {
        Some(packages) => Ok(parse_packages_form(packages)),
        None => Ok(parse_legacy_form(lock.get("dependencies"))),
    }
}

/// Name of the installed package at `key`, keeping npm scopes.
///
/// Only keys under the top-level `node_modules/` qualify;
/// `node_modules/a/node_modules/@s/b` yields `@s/b`.
pub fn package_name_from_path(key: &str) -> Option<&str> {
    if !key.starts_with(NODE_MODULES) {
        return None;
    }
    let start = key.rfind(NODE_MODULES)? + NODE_MODULES.len();
    let name = &key[start..];
    (!name.is_empty()).then_some(name)
}

fn parse_packages_form(packages: &Map<String, Value>) -> ParsedLockfile {
    let mut parsed = ParsedLockfile::new(Ecosystem::Npm);
    let mut seen: HashSet<String> = HashSet::new();
    let mut first_purl_by_name: HashMap<String, String> = HashMap::new();
    let mut purl_by_key: HashMap<&str, String> = HashMap::new();
    let mut pending_edges: Vec<(String, Vec<&str>)> = Vec::new();
    let mut root_names: Vec<&str> = Vec::new();

    for (key, entry) in packages {
        let Some(entry) = entry.as_object() else {
            tracing::debug!(key = %key, "skipping non-object package entry");
            continue;
        };

        if key.is_empty() {
            root_names = dependency_names(entry, ROOT_FIELDS);
            continue;
        }

        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .or_else(|| package_name_from_path(key));
        let version = non_empty_str(entry, "version");

        let (Some(name), Some(version)) = (name, version) else {
            tracing::debug!(key = %key, "skipping package entry without name or version");
            continue;
        };

        let component = match Component::new(Ecosystem::Npm, name, version) {
            Ok(component) => component,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "skipping invalid package entry");
                continue;
            }
        };
        let component = match non_empty_str(entry, "resolved") {
            Some(resolved) => component.with_external_reference("distribution", resolved),
            None => component,
        };

        let purl = component.purl().to_string();
        if !seen.insert(purl.clone()) {
            continue;
        }
        first_purl_by_name
            .entry(component.name().to_string())
            .or_insert_with(|| purl.clone());
        purl_by_key.insert(key.as_str(), purl.clone());
        pending_edges.push((purl, dependency_names(entry, EDGE_FIELDS)));
        parsed.components.push(component);
    }

    // Version-blind: a dependency name maps to the first package seen with it.
    for (from_ref, names) in pending_edges {
        let mut edge = DependencyEdge::new(from_ref);
        for name in names {
            match first_purl_by_name.get(name) {
                Some(target) => edge.add_target(target.clone()),
                None => tracing::debug!(
                    from = %edge.from_ref(),
                    dependency = %name,
                    "dependency not present in lock file"
                ),
            }
        }
        if !edge.is_empty() {
            parsed.edges.push(edge);
        }
    }

    for name in root_names {
        let hoisted = format!("{}{}", NODE_MODULES, name);
        let resolved = purl_by_key
            .get(hoisted.as_str())
            .or_else(|| first_purl_by_name.get(name));
        if let Some(purl) = resolved {
            if !parsed.direct_dependencies.contains(purl) {
                parsed.direct_dependencies.push(purl.clone());
            }
        }
    }

    parsed
}

/// lockfileVersion 1: top-level entries only, no graph.
fn parse_legacy_form(dependencies: Option<&Value>) -> ParsedLockfile {
    let mut parsed = ParsedLockfile::new(Ecosystem::Npm);
    let Some(dependencies) = dependencies.and_then(Value::as_object) else {
        return parsed;
    };

    let mut seen: HashSet<String> = HashSet::new();
    for (name, entry) in dependencies {
        let Some(version) = entry.as_object().and_then(|e| non_empty_str(e, "version")) else {
            tracing::debug!(name = %name, "skipping legacy entry without version");
            continue;
        };
        match Component::new(Ecosystem::Npm, name, version) {
            Ok(component) => {
                if seen.insert(component.purl().to_string()) {
                    parsed.components.push(component);
                }
            }
            Err(e) => tracing::debug!(name = %name, error = %e, "skipping invalid legacy entry"),
        }
    }
    parsed
}

fn non_empty_str<'a>(entry: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn dependency_names<'a>(entry: &'a Map<String, Value>, fields: &[&str]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for field in fields {
        if let Some(map) = entry.get(*field).and_then(Value::as_object) {
            for name in map.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
    }
    names
}

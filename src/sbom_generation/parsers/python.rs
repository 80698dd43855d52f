//! Python sources: `requirements.lock`, `uv.lock`, `poetry.lock`,
//! `requirements.txt` and bare `pyproject.toml` declarations.
//!
//! The project itself is always the first component. Edges are resolved
//! by PEP 503 normalized name, ignoring versions.

use super::specifier::{normalize_name, parse_requirement_line, parse_specifier, Specifier};
use crate::sbom_generation::domain::{
    Component, DependencyEdge, Ecosystem, ParsedLockfile, UNKNOWN_VERSION,
};
use crate::shared::Result;
use anyhow::Context;
use std::collections::HashMap;
use toml::{Table, Value};

const DEFAULT_PROJECT_NAME: &str = "python-project";

/// Identity and declared dependencies from `pyproject.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonProject {
    pub name: String,
    pub version: String,
    pub declared: Vec<Specifier>,
}

impl Default for PythonProject {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_NAME.to_string(),
            version: UNKNOWN_VERSION.to_string(),
            declared: Vec::new(),
        }
    }
}

impl PythonProject {
    /// Reads `[project]`, falling back to `[tool.poetry]`.
    pub fn from_pyproject(content: &str) -> Result<Self> {
        let pyproject: Table =
            toml::from_str(content).context("pyproject.toml is not valid TOML")?;

        let project = pyproject.get("project").and_then(Value::as_table);
        let poetry = pyproject
            .get("tool")
            .and_then(|t| t.get("poetry"))
            .and_then(Value::as_table);

        let field = |key: &str| {
            project
                .and_then(|p| p.get(key))
                .and_then(Value::as_str)
                .or_else(|| poetry.and_then(|p| p.get(key)).and_then(Value::as_str))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        let name = field("name").unwrap_or(DEFAULT_PROJECT_NAME).to_string();
        let version = field("version").unwrap_or(UNKNOWN_VERSION).to_string();

        let pep621: Vec<Specifier> = project
            .and_then(|p| p.get("dependencies"))
            .and_then(Value::as_array)
            .map(|deps| {
                deps.iter()
                    .filter_map(Value::as_str)
                    .filter_map(parse_specifier)
                    .collect()
            })
            .unwrap_or_default();

        let declared = if pep621.is_empty() {
            poetry
                .and_then(|p| p.get("dependencies"))
                .and_then(Value::as_table)
                .map(poetry_dependencies)
                .unwrap_or_default()
        } else {
            pep621
        };

        Ok(Self {
            name,
            version,
            declared,
        })
    }

    fn root_component(&self) -> Option<Component> {
        match Component::new(Ecosystem::PyPi, &self.name, &self.version) {
            Ok(component) => Some(component.as_application()),
            Err(e) => {
                tracing::debug!(name = %self.name, error = %e, "no root component for project");
                None
            }
        }
    }

    fn is_self(&self, name: &str) -> bool {
        normalize_name(name) == normalize_name(&self.name)
    }

    fn declared_names(&self) -> Vec<String> {
        self.declared.iter().map(|s| s.name.clone()).collect()
    }
}

/// `[tool.poetry.dependencies]`: keys are names, values are constraints.
fn poetry_dependencies(table: &Table) -> Vec<Specifier> {
    table
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("python"))
        .map(|(name, constraint)| {
            let constraint = match constraint {
                Value::String(s) => Some(s.as_str()),
                Value::Table(t) => t.get("version").and_then(Value::as_str),
                _ => None,
            };
            Specifier::new(name, constraint.and_then(poetry_exact_version))
        })
        .collect()
}

/// `"==1.2.3"` and a bare `"1.2.3"` are exact pins in Poetry.
fn poetry_exact_version(constraint: &str) -> Option<&str> {
    let constraint = constraint.trim();
    let version = constraint.strip_prefix("==").unwrap_or(constraint).trim();
    let is_plain = version.starts_with(|c: char| c.is_ascii_digit())
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '!'));
    is_plain.then_some(version)
}

/// One locked package and the names it depends on.
struct LockedPackage {
    component: Component,
    dependencies: Vec<String>,
}

pub fn parse_requirements(content: &str, project: &PythonProject) -> ParsedLockfile {
    let packages: Vec<LockedPackage> = content
        .lines()
        .filter_map(parse_requirement_line)
        .filter_map(|spec| locked_package(&spec.name, spec.version.as_deref(), Vec::new()))
        .collect();

    let direct = if project.declared.is_empty() {
        packages
            .iter()
            .map(|p| p.component.name().to_string())
            .collect()
    } else {
        project.declared_names()
    };
    build(project, packages, direct)
}

pub fn parse_uv_lock(content: &str, project: &PythonProject) -> Result<ParsedLockfile> {
    let lock: Table = toml::from_str(content).context("uv.lock is not valid TOML")?;
    let mut direct = project.declared_names();
    let mut packages = Vec::new();

    for entry in lock_entries(&lock) {
        let Some((name, version)) = name_and_version(entry) else {
            continue;
        };
        // uv: dependencies = [{ name = "idna" }, ...]
        let dependencies: Vec<String> = entry
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| {
                deps.iter()
                    .filter_map(|d| d.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if project.is_self(name) {
            direct = dependencies;
            continue;
        }
        packages.extend(locked_package(name, Some(version), dependencies));
    }

    Ok(build(project, packages, direct))
}

pub fn parse_poetry_lock(content: &str, project: &PythonProject) -> Result<ParsedLockfile> {
    let lock: Table = toml::from_str(content).context("poetry.lock is not valid TOML")?;
    let mut packages = Vec::new();

    for entry in lock_entries(&lock) {
        let Some((name, version)) = name_and_version(entry) else {
            continue;
        };
        if project.is_self(name) {
            continue;
        }
        // poetry: [package.dependencies] name = "constraint"
        let dependencies: Vec<String> = entry
            .get("dependencies")
            .and_then(Value::as_table)
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default();
        packages.extend(locked_package(name, Some(version), dependencies));
    }

    Ok(build(project, packages, project.declared_names()))
}

/// No lock file at all: the declarations are the whole inventory.
pub fn parse_declarations(project: &PythonProject) -> ParsedLockfile {
    let packages: Vec<LockedPackage> = project
        .declared
        .iter()
        .filter_map(|spec| locked_package(&spec.name, spec.version.as_deref(), Vec::new()))
        .collect();
    build(project, packages, project.declared_names())
}

fn lock_entries(lock: &Table) -> impl Iterator<Item = &Table> {
    lock.get("package")
        .or_else(|| lock.get("packages"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_table)
}

fn name_and_version(entry: &Table) -> Option<(&str, &str)> {
    let name = entry.get("name").and_then(Value::as_str);
    let version = entry.get("version").and_then(Value::as_str);
    if name.is_none() || version.is_none() {
        tracing::debug!(?name, "skipping lock entry without string name and version");
    }
    Some((name?, version?))
}

fn locked_package(
    name: &str,
    version: Option<&str>,
    dependencies: Vec<String>,
) -> Option<LockedPackage> {
    let version = version.unwrap_or(UNKNOWN_VERSION);
    match Component::new(Ecosystem::PyPi, name, version) {
        Ok(component) => Some(LockedPackage {
            component,
            dependencies,
        }),
        Err(e) => {
            tracing::debug!(name = %name, error = %e, "skipping invalid Python package");
            None
        }
    }
}

fn build(
    project: &PythonProject,
    packages: Vec<LockedPackage>,
    direct_names: Vec<String>,
) -> ParsedLockfile {
    let mut parsed = ParsedLockfile::new(Ecosystem::PyPi);
    let root_ref = project.root_component().map(|root| {
        let root_ref = root.purl().to_string();
        parsed.root = Some(root.clone());
        parsed.components.push(root);
        root_ref
    });

    let mut first_purl_by_name: HashMap<String, String> = HashMap::new();
    let mut pending_edges: Vec<(String, Vec<String>)> = Vec::new();
    for package in packages {
        if project.is_self(package.component.name()) {
            continue;
        }
        let purl = package.component.purl().to_string();
        first_purl_by_name
            .entry(normalize_name(package.component.name()))
            .or_insert_with(|| purl.clone());
        pending_edges.push((purl, package.dependencies));
        parsed.components.push(package.component);
    }

    let resolve = |name: &str| first_purl_by_name.get(&normalize_name(name)).cloned();

    let direct = DependencyEdge::with_targets(
        root_ref.unwrap_or_default(),
        direct_names.iter().filter_map(|name| resolve(name.as_str())),
    );
    parsed.direct_dependencies = direct.to_refs().map(str::to_string).collect();
    if !direct.is_empty() && parsed.root.is_some() {
        parsed.edges.push(direct);
    }

    for (from_ref, dependencies) in pending_edges {
        let mut edge = DependencyEdge::new(from_ref);
        for dependency in &dependencies {
            match resolve(dependency.as_str()) {
                Some(target) => edge.add_target(target),
                None => tracing::debug!(
                    from = %edge.from_ref(),
                    dependency = %dependency,
                    "dependency not present in lock file"
                ),
            }
        }
        if !edge.is_empty() {
            parsed.edges.push(edge);
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = r#"
[project]
name = "demo-app"
version = "0.3.0"
dependencies = [
    "requests>=2.0",
    "django==1.11.29",
    "flask>=2.0; python_version >= '3.8'",
]
"#;

    fn project() -> PythonProject {
        PythonProject::from_pyproject(PYPROJECT).unwrap()
    }

    fn purls(parsed: &ParsedLockfile) -> Vec<String> {
        parsed
            .components
            .iter()
            .map(|c| c.purl().to_string())
            .collect()
    }

    #[test]
    fn test_project_identity() {
        let project = project();
        assert_eq!(project.name, "demo-app");
        assert_eq!(project.version, "0.3.0");
        assert_eq!(
            project.declared,
            vec![
                Specifier::new("requests", None),
                Specifier::new("django", Some("1.11.29")),
                Specifier::new("flask", None),
            ]
        );
    }

    #[test]
    fn test_project_identity_defaults() {
        let project = PythonProject::from_pyproject("[build-system]\nrequires = []\n").unwrap();
        assert_eq!(project.name, "python-project");
        assert_eq!(project.version, "unknown");
        assert!(project.declared.is_empty());
    }

    #[test]
    fn test_poetry_identity_and_dependencies() {
        let pyproject = r#"
[tool.poetry]
name = "poetry-app"
version = "1.2.0"

[tool.poetry.dependencies]
python = "^3.10"
requests = "^2.31"
pendulum = "3.0.0"
click = { version = "==8.1.7", optional = true }
"#;
        let project = PythonProject::from_pyproject(pyproject).unwrap();
        assert_eq!(project.name, "poetry-app");
        assert_eq!(project.version, "1.2.0");
        let mut declared = project.declared.clone();
        declared.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            declared,
            vec![
                Specifier::new("click", Some("8.1.7")),
                Specifier::new("pendulum", Some("3.0.0")),
                Specifier::new("requests", None),
            ]
        );
    }

    #[test]
    fn test_malformed_pyproject() {
        assert!(PythonProject::from_pyproject("[project\nname=").is_err());
    }

    #[test]
    fn test_declarations_source() {
        let parsed = parse_declarations(&project());
        assert_eq!(
            purls(&parsed),
            vec![
                "pkg:pypi/demo-app@0.3.0",
                "pkg:pypi/requests@unknown",
                "pkg:pypi/django@1.11.29",
                "pkg:pypi/flask@unknown",
            ]
        );
        assert_eq!(parsed.root.as_ref().unwrap().name(), "demo-app");
        assert_eq!(parsed.direct_dependencies.len(), 3);
        assert_eq!(parsed.edges.len(), 1);
        assert_eq!(parsed.edges[0].from_ref(), "pkg:pypi/demo-app@0.3.0");
    }

    #[test]
    fn test_uv_lock() {
        let lock = r#"
version = 1
requires-python = ">=3.8"

[[package]]
name = "demo-app"
version = "0.3.0"
source = { editable = "." }
dependencies = [{ name = "requests" }]

[[package]]
name = "requests"
version = "2.31.0"
source = { registry = "https://pypi.org/simple" }
dependencies = [
    { name = "idna" },
    { name = "urllib3" },
]

[[package]]
name = "idna"
version = "3.6"

[[package]]
name = "urllib3"
version = "2.1.0"
"#;
        let parsed = parse_uv_lock(lock, &project()).unwrap();
        assert_eq!(
            purls(&parsed),
            vec![
                "pkg:pypi/demo-app@0.3.0",
                "pkg:pypi/requests@2.31.0",
                "pkg:pypi/idna@3.6",
                "pkg:pypi/urllib3@2.1.0",
            ]
        );
        assert_eq!(parsed.direct_dependencies, vec!["pkg:pypi/requests@2.31.0"]);
        assert_eq!(parsed.edges.len(), 2);
        assert_eq!(
            parsed.edges[1].to_refs().collect::<Vec<_>>(),
            vec!["pkg:pypi/idna@3.6", "pkg:pypi/urllib3@2.1.0"]
        );
    }

    #[test]
    fn test_poetry_lock_resolves_normalized_names() {
        let lock = r#"
[[package]]
name = "Django"
version = "4.2.7"

[package.dependencies]
asgiref = ">=3.6.0,<4"
sqlparse = ">=0.3.1"

[[package]]
name = "asgiref"
version = "3.7.2"

[[package]]
name = "sqlparse"
version = "0.4.4"

[[package]]
name = "no-version"
"#;
        let project = PythonProject {
            declared: vec![Specifier::new("django", None)],
            ..PythonProject::default()
        };
        let parsed = parse_poetry_lock(lock, &project).unwrap();
        assert_eq!(parsed.components.len(), 4);
        assert_eq!(parsed.direct_dependencies, vec!["pkg:pypi/Django@4.2.7"]);
        let django = parsed
            .edges
            .iter()
            .find(|e| e.from_ref() == "pkg:pypi/Django@4.2.7")
            .unwrap();
        assert_eq!(django.target_count(), 2);
    }

    #[test]
    fn test_requirements_without_declarations() {
        let requirements = "\
# generated
requests==2.20.0
flask>=2.0
-r other.txt

django==1.11.29 ; python_version < '3'
";
        let parsed = parse_requirements(requirements, &PythonProject::default());
        assert_eq!(
            purls(&parsed),
            vec![
                "pkg:pypi/python-project@unknown",
                "pkg:pypi/requests@2.20.0",
                "pkg:pypi/flask@unknown",
                "pkg:pypi/django@1.11.29",
            ]
        );
        assert_eq!(parsed.direct_dependencies.len(), 3);
    }

    #[test]
    fn test_requirements_skip_project_itself() {
        let requirements = "demo-app==0.3.0\nrequests==2.31.0\n";
        let parsed = parse_requirements(requirements, &project());
        assert_eq!(
            purls(&parsed),
            vec!["pkg:pypi/demo-app@0.3.0", "pkg:pypi/requests@2.31.0"]
        );
        assert_eq!(parsed.direct_dependencies, vec!["pkg:pypi/requests@2.31.0"]);
    }

    #[test]
    fn test_malformed_locks() {
        assert!(parse_uv_lock("[[package]\n", &project()).is_err());
        assert!(parse_poetry_lock("= broken", &project()).is_err());
    }
}

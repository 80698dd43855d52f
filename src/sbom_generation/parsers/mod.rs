//! Lock file parsers. Pure functions over file contents: nothing here
//! touches the filesystem.

pub mod cargo;
pub mod npm;
pub mod python;
pub mod specifier;

pub use cargo::CargoRoot;
pub use python::PythonProject;
pub use specifier::{parse_specifier, Specifier};

use crate::sbom_generation::domain::{Ecosystem, ParsedLockfile};
use crate::shared::Result;
use std::fmt;

/// A lock or manifest file the parsers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockSource {
    PackageLock,
    CargoLock,
    RequirementsLock,
    UvLock,
    PoetryLock,
    RequirementsTxt,
    PyprojectDeclarations,
}

impl LockSource {
    pub fn file_name(self) -> &'static str {
        match self {
            LockSource::PackageLock => "package-lock.json",
            LockSource::CargoLock => "Cargo.lock",
            LockSource::RequirementsLock => "requirements.lock",
            LockSource::UvLock => "uv.lock",
            LockSource::PoetryLock => "poetry.lock",
            LockSource::RequirementsTxt => "requirements.txt",
            LockSource::PyprojectDeclarations => "pyproject.toml",
        }
    }

    pub fn ecosystem(self) -> Ecosystem {
        match self {
            LockSource::PackageLock => Ecosystem::Npm,
            LockSource::CargoLock => Ecosystem::Cargo,
            LockSource::RequirementsLock
            | LockSource::UvLock
            | LockSource::PoetryLock
            | LockSource::RequirementsTxt
            | LockSource::PyprojectDeclarations => Ecosystem::PyPi,
        }
    }

    /// Sources for an ecosystem, most authoritative first.
    pub fn candidates(ecosystem: Ecosystem) -> &'static [LockSource] {
        match ecosystem {
            Ecosystem::Npm => &[LockSource::PackageLock],
            Ecosystem::Cargo => &[LockSource::CargoLock],
            Ecosystem::PyPi => &[
                LockSource::RequirementsLock,
                LockSource::UvLock,
                LockSource::PoetryLock,
                LockSource::RequirementsTxt,
                LockSource::PyprojectDeclarations,
            ],
        }
    }

    /// Manifest read alongside the lock file for the project's identity.
    pub fn companion_manifest(self) -> Option<&'static str> {
        match self.ecosystem() {
            Ecosystem::Cargo => Some("Cargo.toml"),
            Ecosystem::PyPi => Some("pyproject.toml"),
            Ecosystem::Npm => None,
        }
    }
}

impl fmt::Display for LockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Everything a parser may look at.
#[derive(Debug, Clone, Copy)]
pub struct LockInput<'a> {
    pub source: LockSource,
    pub content: &'a str,
    /// Contents of [`LockSource::companion_manifest`] when it exists
    pub manifest: Option<&'a str>,
    /// Project name to fall back on when no manifest names it
    pub fallback_name: &'a str,
}

/// Dispatches to the parser for `input.source`.
pub fn parse_lock(input: LockInput<'_>) -> Result<ParsedLockfile> {
    match input.source {
        LockSource::PackageLock => npm::parse_package_lock(input.content),
        LockSource::CargoLock => {
            let root = CargoRoot::from_manifest(input.manifest, input.fallback_name);
            cargo::parse_cargo_lock(input.content, &root)
        }
        LockSource::PyprojectDeclarations => {
            let project = PythonProject::from_pyproject(input.content)?;
            Ok(python::parse_declarations(&project))
        }
        python_source => {
            let project = match input.manifest {
                Some(pyproject) => PythonProject::from_pyproject(pyproject)?,
                None => PythonProject::default(),
            };
            match python_source {
                LockSource::UvLock => python::parse_uv_lock(input.content, &project),
                LockSource::PoetryLock => python::parse_poetry_lock(input.content, &project),
                _ => Ok(python::parse_requirements(input.content, &project)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_candidates_in_preference_order() {
        let names: Vec<_> = LockSource::candidates(Ecosystem::PyPi)
            .iter()
            .map(|s| s.file_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "requirements.lock",
                "uv.lock",
                "poetry.lock",
                "requirements.txt",
                "pyproject.toml"
            ]
        );
    }

    #[test]
    fn test_candidates_belong_to_their_ecosystem() {
        for ecosystem in Ecosystem::PRIORITY {
            for source in LockSource::candidates(ecosystem) {
                assert_eq!(source.ecosystem(), ecosystem);
            }
        }
    }

    #[test]
    fn test_parse_lock_dispatches_cargo_with_manifest() {
        let parsed = parse_lock(LockInput {
            source: LockSource::CargoLock,
            content: "[[package]]\nname = \"app\"\nversion = \"1.0.0\"\n",
            manifest: Some("[package]\nname = \"app\"\nversion = \"1.0.0\"\n"),
            fallback_name: "checkout",
        })
        .unwrap();
        assert_eq!(parsed.ecosystem, Ecosystem::Cargo);
        assert_eq!(parsed.root.unwrap().name(), "app");
    }

    #[test]
    fn test_parse_lock_requirements_uses_pyproject_identity() {
        let parsed = parse_lock(LockInput {
            source: LockSource::RequirementsTxt,
            content: "requests==2.31.0\n",
            manifest: Some("[project]\nname = \"svc\"\nversion = \"1.0\"\n"),
            fallback_name: "checkout",
        })
        .unwrap();
        assert_eq!(parsed.components[0].purl().as_str(), "pkg:pypi/svc@1.0");
        assert_eq!(parsed.components.len(), 2);
    }
}

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Package namespace a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Cargo,
    PyPi,
}

impl Ecosystem {
    /// Scan priority when several parseable ecosystems are detected.
    pub const PRIORITY: [Ecosystem; 3] = [Ecosystem::Cargo, Ecosystem::PyPi, Ecosystem::Npm];

    /// purl type segment (`pkg:<type>/...`)
    pub fn purl_type(self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Cargo => "cargo",
            Ecosystem::PyPi => "pypi",
        }
    }

    /// Directory under the results root that holds this ecosystem's scans.
    pub fn partition(self) -> &'static str {
        match self {
            Ecosystem::Npm => "javascript",
            Ecosystem::Cargo => "rust",
            Ecosystem::PyPi => "python",
        }
    }

    /// Detection evidence type that maps onto this ecosystem.
    pub fn project_type(self) -> ProjectType {
        match self {
            Ecosystem::Npm => ProjectType::JavaScript,
            Ecosystem::Cargo => ProjectType::Rust,
            Ecosystem::PyPi => ProjectType::Python,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.purl_type())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" | "javascript" | "js" => Ok(Ecosystem::Npm),
            "cargo" | "rust" => Ok(Ecosystem::Cargo),
            "pypi" | "python" | "pip" => Ok(Ecosystem::PyPi),
            _ => Err(format!(
                "Invalid ecosystem: {}. Please specify 'npm', 'cargo' or 'pypi'",
                s
            )),
        }
    }
}

/// Project kind inferred from marker files. Only some kinds are parseable.
///
/// Variants are declared alphabetically so the derived `Ord` sorts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Go,
    Java,
    JavaScript,
    Python,
    Rust,
    Unknown,
}

impl ProjectType {
    pub const DETECTABLE: [ProjectType; 5] = [
        ProjectType::Go,
        ProjectType::Java,
        ProjectType::JavaScript,
        ProjectType::Python,
        ProjectType::Rust,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Go => "go",
            ProjectType::Java => "java",
            ProjectType::JavaScript => "javascript",
            ProjectType::Python => "python",
            ProjectType::Rust => "rust",
            ProjectType::Unknown => "unknown",
        }
    }

    /// File names whose presence is evidence for this project type.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            ProjectType::Go => &["go.mod", "go.sum"],
            ProjectType::Java => &[
                "pom.xml",
                "build.gradle",
                "build.gradle.kts",
                "settings.gradle",
                "settings.gradle.kts",
                "gradlew",
            ],
            ProjectType::JavaScript => &[
                "package.json",
                "package-lock.json",
                "yarn.lock",
                "pnpm-lock.yaml",
                "bun.lockb",
            ],
            ProjectType::Python => &[
                "pyproject.toml",
                "requirements.txt",
                "requirements.lock",
                "Pipfile",
                "setup.py",
                "setup.cfg",
                "poetry.lock",
                "uv.lock",
            ],
            ProjectType::Rust => &["Cargo.toml", "Cargo.lock"],
            ProjectType::Unknown => &[],
        }
    }

    /// Ecosystem whose lock files we can parse, if any.
    pub fn ecosystem(self) -> Option<Ecosystem> {
        match self {
            ProjectType::JavaScript => Some(Ecosystem::Npm),
            ProjectType::Rust => Some(Ecosystem::Cargo),
            ProjectType::Python => Some(Ecosystem::PyPi),
            ProjectType::Go | ProjectType::Java | ProjectType::Unknown => None,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use super::{Ecosystem, Purl};
use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 512;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 256;

/// Placeholder version for components whose version cannot be resolved.
pub const UNKNOWN_VERSION: &str = "unknown";

/// NewType wrapper for package name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if name.chars().any(char::is_control) {
            anyhow::bail!("Package name contains control characters");
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for package version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: &str) -> Result<Self> {
        let version = version.trim();
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if version.chars().any(|c| c.is_control() || c.is_whitespace()) {
            anyhow::bail!("Package version contains whitespace or control characters");
        }

        Ok(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// CycloneDX component type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Application,
    Library,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Application => "application",
            ComponentKind::Library => "library",
        }
    }
}

/// Content digest recorded by a lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHash {
    pub algorithm: String,
    pub content: String,
}

/// Link to where the package was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub kind: String,
    pub url: String,
}

/// One resolved package. Immutable once a parser has built it.
///
/// The purl doubles as the bom-ref, so it must be unique per document.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    ecosystem: Ecosystem,
    kind: ComponentKind,
    name: PackageName,
    version: Version,
    purl: Purl,
    hashes: Vec<ComponentHash>,
    external_references: Vec<ExternalReference>,
}

impl Component {
    pub fn new(ecosystem: Ecosystem, name: &str, version: &str) -> Result<Self> {
        let name = PackageName::new(name)?;
        let version = Version::new(version)?;
        Ok(Self::from_parts(ecosystem, name, version))
    }

    pub fn from_parts(ecosystem: Ecosystem, name: PackageName, version: Version) -> Self {
        let purl = Purl::new(ecosystem, name.as_str(), version.as_str());
        Self {
            ecosystem,
            kind: ComponentKind::Library,
            name,
            version,
            purl,
            hashes: Vec::new(),
            external_references: Vec::new(),
        }
    }

    pub fn as_application(mut self) -> Self {
        self.kind = ComponentKind::Application;
        self
    }

    pub fn with_hash(mut self, algorithm: &str, content: &str) -> Self {
        self.hashes.push(ComponentHash {
            algorithm: algorithm.to_string(),
            content: content.to_string(),
        });
        self
    }

    pub fn with_external_reference(mut self, kind: &str, url: &str) -> Self {
        self.external_references.push(ExternalReference {
            kind: kind.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn purl(&self) -> &Purl {
        &self.purl
    }

    pub fn bom_ref(&self) -> &str {
        self.purl.as_str()
    }

    pub fn hashes(&self) -> &[ComponentHash] {
        &self.hashes
    }

    pub fn external_references(&self) -> &[ExternalReference] {
        &self.external_references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_new_valid() {
        let name = PackageName::new("@types/node").unwrap();
        assert_eq!(name.as_str(), "@types/node");
    }

    #[test]
    fn test_package_name_trims_and_rejects_empty() {
        assert_eq!(PackageName::new("  flask ").unwrap().as_str(), "flask");
        assert!(PackageName::new("").is_err());
        assert!(PackageName::new("   ").is_err());
    }

    #[test]
    fn test_package_name_too_long() {
        let long = "a".repeat(MAX_PACKAGE_NAME_LENGTH + 1);
        assert!(PackageName::new(&long).is_err());
    }

    #[test]
    fn test_version_rejects_whitespace() {
        assert!(Version::new("1.0 beta").is_err());
        assert!(Version::new("").is_err());
        assert_eq!(Version::new("1.0.0-rc.1+build").unwrap().as_str(), "1.0.0-rc.1+build");
    }

    #[test]
    fn test_component_new_builds_purl() {
        let component = Component::new(Ecosystem::Npm, "left-pad", "1.3.0").unwrap();
        assert_eq!(component.name(), "left-pad");
        assert_eq!(component.version(), "1.3.0");
        assert_eq!(component.purl().as_str(), "pkg:npm/left-pad@1.3.0");
        assert_eq!(component.bom_ref(), "pkg:npm/left-pad@1.3.0");
        assert_eq!(component.kind(), ComponentKind::Library);
    }

    #[test]
    fn test_component_missing_fields() {
        assert!(Component::new(Ecosystem::Cargo, "", "1.0.0").is_err());
        assert!(Component::new(Ecosystem::Cargo, "serde", "").is_err());
    }

    #[test]
    fn test_component_builders() {
        let component = Component::new(Ecosystem::Cargo, "serde", "1.0.0")
            .unwrap()
            .with_hash("SHA-256", "abc123")
            .with_external_reference("distribution", "https://example.com/serde.crate")
            .as_application();
        assert_eq!(component.kind(), ComponentKind::Application);
        assert_eq!(component.hashes()[0].algorithm, "SHA-256");
        assert_eq!(component.external_references()[0].kind, "distribution");
    }
}

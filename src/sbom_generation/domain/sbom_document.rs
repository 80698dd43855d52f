use super::{Component, DependencyEdge, SbomMetadata};

pub const BOM_FORMAT: &str = "CycloneDX";
pub const SPEC_VERSION: &str = "1.4";
pub const BOM_VERSION: u32 = 1;

/// Canonical SBOM produced by one scan.
///
/// Built once by the assembler: components are unique by purl and every
/// edge references components that exist in the document.
#[derive(Debug, Clone)]
pub struct SbomDocument {
    metadata: SbomMetadata,
    root_component: Option<Component>,
    components: Vec<Component>,
    dependencies: Vec<DependencyEdge>,
}

impl SbomDocument {
    pub(crate) fn new(
        metadata: SbomMetadata,
        root_component: Option<Component>,
        components: Vec<Component>,
        dependencies: Vec<DependencyEdge>,
    ) -> Self {
        Self {
            metadata,
            root_component,
            components,
            dependencies,
        }
    }

    pub fn format_id(&self) -> &'static str {
        BOM_FORMAT
    }

    pub fn spec_version(&self) -> &'static str {
        SPEC_VERSION
    }

    pub fn version(&self) -> u32 {
        BOM_VERSION
    }

    pub fn metadata(&self) -> &SbomMetadata {
        &self.metadata
    }

    pub fn root_component(&self) -> Option<&Component> {
        self.root_component.as_ref()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    pub fn find_component(&self, purl: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.purl().as_str() == purl)
    }
}

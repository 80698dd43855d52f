use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{Component as DomainComponent, SbomDocument, SbomMetadata};
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Bom<'a> {
    #[serde(rename = "bomFormat")]
    bom_format: &'a str,
    #[serde(rename = "specVersion")]
    spec_version: &'a str,
    version: u32,
    metadata: Metadata<'a>,
    components: Vec<Component<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<Vec<Dependency<'a>>>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    timestamp: &'a str,
    tools: Vec<Tool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<MetadataComponent<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    vendor: &'a str,
    name: &'a str,
    version: &'a str,
}

/// The subject of the SBOM. Carries no bom-ref so it cannot collide with
/// an entry in `components`.
#[derive(Debug, Serialize)]
struct MetadataComponent<'a> {
    #[serde(rename = "type")]
    component_type: &'a str,
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct Component<'a> {
    #[serde(rename = "type")]
    component_type: &'a str,
    #[serde(rename = "bom-ref")]
    bom_ref: &'a str,
    name: &'a str,
    version: &'a str,
    purl: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hashes: Vec<Hash<'a>>,
    #[serde(rename = "externalReferences", skip_serializing_if = "Vec::is_empty")]
    external_references: Vec<ExternalReference<'a>>,
}

#[derive(Debug, Serialize)]
struct Hash<'a> {
    alg: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ExternalReference<'a> {
    #[serde(rename = "type")]
    reference_type: &'a str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct Dependency<'a> {
    #[serde(rename = "ref")]
    bom_ref: &'a str,
    #[serde(rename = "dependsOn")]
    depends_on: Vec<&'a str>,
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.4 JSON format
///
/// This adapter implements the SbomFormatter port for CycloneDX format.
/// Field order is fixed by the struct layout, so equal documents always
/// produce identical bytes.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, document: &SbomDocument) -> Result<String> {
        let dependencies: Vec<Dependency> = document
            .dependencies()
            .iter()
            .map(|edge| Dependency {
                bom_ref: edge.from_ref(),
                depends_on: edge.to_refs().collect(),
            })
            .collect();

        let bom = Bom {
            bom_format: document.format_id(),
            spec_version: document.spec_version(),
            version: document.version(),
            metadata: self.build_metadata(document.metadata(), document.root_component()),
            components: document
                .components()
                .iter()
                .map(|c| self.build_component(c))
                .collect(),
            dependencies: (!dependencies.is_empty()).then_some(dependencies),
        };

        let mut json = serde_json::to_string_pretty(&bom)?;
        json.push('\n');
        Ok(json)
    }
}

impl CycloneDxFormatter {
    fn build_metadata<'a>(
        &self,
        metadata: &'a SbomMetadata,
        root: Option<&'a DomainComponent>,
    ) -> Metadata<'a> {
        Metadata {
            timestamp: metadata.timestamp(),
            tools: vec![Tool {
                vendor: metadata.tool_vendor(),
                name: metadata.tool_name(),
                version: metadata.tool_version(),
            }],
            component: root.map(|c| MetadataComponent {
                component_type: c.kind().as_str(),
                name: c.name(),
                version: c.version(),
            }),
        }
    }

    fn build_component<'a>(&self, component: &'a DomainComponent) -> Component<'a> {
        Component {
            component_type: component.kind().as_str(),
            bom_ref: component.bom_ref(),
            name: component.name(),
            version: component.version(),
            purl: component.purl().as_str(),
            hashes: component
                .hashes()
                .iter()
                .map(|h| Hash {
                    alg: &h.algorithm,
                    content: &h.content,
                })
                .collect(),
            external_references: component
                .external_references()
                .iter()
                .map(|r| ExternalReference {
                    reference_type: &r.kind,
                    url: &r.url,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{DependencyEdge, Ecosystem, ParsedLockfile};
    use crate::sbom_generation::services::SbomAssembler;

    fn metadata() -> SbomMetadata {
        SbomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "unified-sbom".to_string(),
            "unified-sbom".to_string(),
            "1.0.0".to_string(),
        )
    }

    fn create_test_document() -> SbomDocument {
        let mut parsed = ParsedLockfile::new(Ecosystem::Cargo);
        parsed.root = Some(
            DomainComponent::new(Ecosystem::Cargo, "app", "0.1.0")
                .unwrap()
                .as_application(),
        );
        parsed.components = vec![
            DomainComponent::new(Ecosystem::Cargo, "serde", "1.0.200")
                .unwrap()
                .with_hash("SHA-256", "abc123"),
            DomainComponent::new(Ecosystem::Cargo, "itoa", "1.0.11").unwrap(),
        ];
        parsed.edges = vec![DependencyEdge::with_targets(
            "pkg:cargo/serde@1.0.200",
            ["pkg:cargo/itoa@1.0.11"],
        )];
        SbomAssembler::assemble(parsed, metadata())
    }

    #[test]
    fn test_format_basic() {
        let json = CycloneDxFormatter::new()
            .format(&create_test_document())
            .unwrap();

        assert!(json.contains("\"bomFormat\": \"CycloneDX\""));
        assert!(json.contains("\"specVersion\": \"1.4\""));
        assert!(json.contains("\"bom-ref\": \"pkg:cargo/serde@1.0.200\""));
        assert!(json.contains("\"alg\": \"SHA-256\""));
        assert!(!json.contains("serialNumber"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_format_field_order_and_structure() {
        let json = CycloneDxFormatter::new()
            .format(&create_test_document())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec![
                "bomFormat",
                "specVersion",
                "version",
                "metadata",
                "components",
                "dependencies"
            ]
        );
        assert_eq!(value["metadata"]["component"]["type"], "application");
        assert_eq!(value["metadata"]["component"]["name"], "app");
        assert!(value["metadata"]["component"].get("bom-ref").is_none());
        assert_eq!(value["metadata"]["tools"][0]["vendor"], "unified-sbom");
        assert_eq!(value["components"][0]["type"], "library");
        assert!(value["components"][1].get("hashes").is_none());
        assert_eq!(
            value["dependencies"][0]["dependsOn"],
            serde_json::json!(["pkg:cargo/itoa@1.0.11"])
        );
    }

    #[test]
    fn test_format_without_dependencies() {
        let mut parsed = ParsedLockfile::new(Ecosystem::Npm);
        parsed.components = vec![DomainComponent::new(Ecosystem::Npm, "left-pad", "1.3.0")
            .unwrap()
            .with_external_reference(
                "distribution",
                "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz",
            )];
        let document = SbomAssembler::assemble(parsed, metadata());

        let json = CycloneDxFormatter::new().format(&document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("dependencies").is_none());
        assert!(value["metadata"].get("component").is_none());
        assert_eq!(
            value["components"][0]["externalReferences"][0]["type"],
            "distribution"
        );
    }

    #[test]
    fn test_format_is_deterministic() {
        let formatter = CycloneDxFormatter::new();
        assert_eq!(
            formatter.format(&create_test_document()).unwrap(),
            formatter.format(&create_test_document()).unwrap()
        );
    }
}

use crate::sbom_generation::domain::{
    Component, DependencyEdge, ParsedLockfile, SbomDocument, SbomMetadata,
};
use indexmap::{IndexMap, IndexSet};

/// SbomAssembler service turning parser output into a canonical document
///
/// - components are deduplicated by purl, the first occurrence wins
/// - edges sharing a source are merged in first-seen order
/// - targets that are not components are dropped
/// - edges whose source is not a component, or that end up with no
///   targets, are omitted
pub struct SbomAssembler;

impl SbomAssembler {
    pub fn assemble(parsed: ParsedLockfile, metadata: SbomMetadata) -> SbomDocument {
        let components = Self::dedup_components(parsed.components);
        let retained: IndexSet<&str> = components.iter().map(Component::bom_ref).collect();

        let mut merged: IndexMap<String, DependencyEdge> = IndexMap::new();
        for edge in parsed.edges {
            if !retained.contains(edge.from_ref()) {
                tracing::debug!(from = %edge.from_ref(), "dropping edge from unknown component");
                continue;
            }
            merged
                .entry(edge.from_ref().to_string())
                .or_insert_with(|| DependencyEdge::new(edge.from_ref()))
                .extend(edge.to_refs());
        }

        let dependencies = merged
            .into_values()
            .filter_map(|mut edge| {
                edge.retain_targets(|target| retained.contains(target.as_str()));
                (!edge.is_empty()).then_some(edge)
            })
            .collect();

        SbomDocument::new(metadata, parsed.root, components, dependencies)
    }

    fn dedup_components(components: Vec<Component>) -> Vec<Component> {
        let mut by_purl: IndexMap<String, Component> = IndexMap::new();
        for component in components {
            let purl = component.purl().to_string();
            if by_purl.contains_key(&purl) {
                tracing::debug!(purl = %purl, "dropping duplicate component");
                continue;
            }
            by_purl.insert(purl, component);
        }
        by_purl.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::Ecosystem;

    fn metadata() -> SbomMetadata {
        SbomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "vendor".to_string(),
            "tool".to_string(),
            "1.0.0".to_string(),
        )
    }

    fn component(name: &str, version: &str) -> Component {
        Component::new(Ecosystem::Npm, name, version).unwrap()
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut parsed = ParsedLockfile::new(Ecosystem::Npm);
        parsed.components = vec![
            component("a", "1.0.0").with_external_reference("distribution", "first"),
            component("b", "1.0.0"),
            component("a", "1.0.0").with_external_reference("distribution", "second"),
        ];

        let document = SbomAssembler::assemble(parsed, metadata());
        assert_eq!(document.components().len(), 2);
        assert_eq!(
            document.components()[0].external_references()[0].url,
            "first"
        );
        assert_eq!(document.components()[1].name(), "b");
    }

    #[test]
    fn test_merges_edges_and_drops_unresolved() {
        let mut parsed = ParsedLockfile::new(Ecosystem::Npm);
        parsed.components = vec![component("a", "1.0.0"), component("b", "1.0.0"), component("c", "1.0.0")];
        parsed.edges = vec![
            DependencyEdge::with_targets("pkg:npm/a@1.0.0", ["pkg:npm/b@1.0.0", "pkg:npm/zzz@9"]),
            DependencyEdge::with_targets("pkg:npm/ghost@1.0.0", ["pkg:npm/a@1.0.0"]),
            DependencyEdge::with_targets("pkg:npm/b@1.0.0", ["pkg:npm/missing@1"]),
            DependencyEdge::with_targets("pkg:npm/a@1.0.0", ["pkg:npm/c@1.0.0", "pkg:npm/b@1.0.0"]),
        ];

        let document = SbomAssembler::assemble(parsed, metadata());
        let dependencies = document.dependencies();
        assert_eq!(dependencies.len(), 1);
        assert_eq!(dependencies[0].from_ref(), "pkg:npm/a@1.0.0");
        assert_eq!(
            dependencies[0].to_refs().collect::<Vec<_>>(),
            vec!["pkg:npm/b@1.0.0", "pkg:npm/c@1.0.0"]
        );
    }

    #[test]
    fn test_root_component_is_carried() {
        let mut parsed = ParsedLockfile::new(Ecosystem::Cargo);
        parsed.root = Some(
            Component::new(Ecosystem::Cargo, "app", "unknown")
                .unwrap()
                .as_application(),
        );

        let document = SbomAssembler::assemble(parsed, metadata());
        assert_eq!(document.root_component().unwrap().name(), "app");
        assert!(document.components().is_empty());
        assert_eq!(document.metadata().timestamp(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let build = || {
            let mut parsed = ParsedLockfile::new(Ecosystem::Npm);
            parsed.components = vec![component("x", "1"), component("y", "2")];
            parsed.edges = vec![DependencyEdge::with_targets("pkg:npm/x@1", ["pkg:npm/y@2"])];
            SbomAssembler::assemble(parsed, metadata())
        };
        let first = build();
        let second = build();
        assert_eq!(first.components(), second.components());
        assert_eq!(first.dependencies(), second.dependencies());
    }
}

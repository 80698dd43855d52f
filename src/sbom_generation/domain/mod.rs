pub mod component;
pub mod dependency_edge;
pub mod detection;
pub mod ecosystem;
pub mod extraction;
pub mod parsed_lockfile;
pub mod purl;
pub mod sbom_document;
pub mod sbom_metadata;
pub mod vulnerability_report;

pub use component::{
    Component, ComponentHash, ComponentKind, ExternalReference, PackageName, Version,
    UNKNOWN_VERSION,
};
pub use dependency_edge::DependencyEdge;
pub use detection::{DetectionResult, Evidence};
pub use ecosystem::{Ecosystem, ProjectType};
pub use extraction::ExtractionResult;
pub use parsed_lockfile::ParsedLockfile;
pub use purl::Purl;
pub use sbom_document::SbomDocument;
pub use sbom_metadata::SbomMetadata;
pub use vulnerability_report::VulnerabilityReport;

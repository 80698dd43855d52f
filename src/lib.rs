//! unified-sbom - manifest-to-SBOM extraction engine
//!
//! This library turns a project directory or `.zip` archive into a
//! CycloneDX SBOM. It detects the ecosystem from marker files, parses the
//! npm, Cargo or Python lock file, and writes a deduplicated component list
//! with its dependency graph.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic, domain models and lock parsers
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use unified_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = ScanProjectUseCase::new(
//!     ZipArchiveExtractor::new(),
//!     MarkerDetector::new(),
//!     FileSystemReader::new(),
//!     FileSystemWriter::new(),
//!     StderrProgressReporter::new(),
//!     Box::new(SystemClock),
//!     Box::new(UuidGenerator),
//! );
//!
//! let request = ScanRequest::new(PathBuf::from("project.zip"), PathBuf::from("results"));
//! let response = use_case.execute(request)?;
//! println!("{}", response.sbom_path.display());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::ZipArchiveExtractor;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::detection::MarkerDetector;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::CycloneDxFormatter;
    pub use crate::adapters::outbound::system::{SystemClock, UuidGenerator};
    pub use crate::application::dto::{DetectRequest, ScanDetails, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::{DetectProjectUseCase, ScanProjectUseCase};
    pub use crate::ports::outbound::{
        ArchiveExtractor, ArtifactWriter, Clock, IdGenerator, LockfileReader, OutputPresenter,
        ProgressReporter, ProjectDetector, SbomFormatter,
    };
    pub use crate::sbom_generation::domain::{
        Component, DependencyEdge, DetectionResult, Ecosystem, ExtractionResult, ParsedLockfile,
        ProjectType, Purl, SbomDocument, SbomMetadata, VulnerabilityReport,
    };
    pub use crate::sbom_generation::parsers::{parse_lock, LockInput, LockSource};
    pub use crate::sbom_generation::services::{SbomAssembler, SbomGenerator};
    pub use crate::shared::error::{ErrorKind, ExitCode, SbomError};
    pub use crate::shared::Result;
}

use crate::application::dto::ScanDetails;
use crate::sbom_generation::domain::{SbomDocument, VulnerabilityReport};
use crate::shared::Result;
use std::path::{Path, PathBuf};

pub const SBOM_FILE: &str = "sbom.json";
pub const VULN_REPORT_FILE: &str = "vuln_report.json";
pub const SCAN_DETAILS_FILE: &str = "scan_details.json";

/// ArtifactWriter port for persisting scan results
///
/// Each artifact is written separately so a failure producing one of the
/// auxiliary reports never costs the SBOM itself. Every method creates
/// `output_dir` when needed and returns the path written.
pub trait ArtifactWriter {
    /// Writes `sbom.json`
    ///
    /// # Errors
    /// Returns `FileWriteError` if the file cannot be written
    fn write_sbom(&self, output_dir: &Path, document: &SbomDocument) -> Result<PathBuf>;

    /// Writes `vuln_report.json`
    ///
    /// # Errors
    /// Returns `FileWriteError` if the file cannot be written
    fn write_vulnerability_report(
        &self,
        output_dir: &Path,
        report: &VulnerabilityReport,
    ) -> Result<PathBuf>;

    /// Writes `scan_details.json`
    ///
    /// # Errors
    /// Returns `FileWriteError` if the file cannot be written
    fn write_scan_details(&self, output_dir: &Path, details: &ScanDetails) -> Result<PathBuf>;
}

use crate::sbom_generation::domain::Ecosystem;
use std::path::PathBuf;

/// ScanResponse - Response DTO from the scan use case
///
/// Paths point at the written artifacts. `vuln_report_path` is `None`
/// when the vulnerability stub could not be written; the SBOM is still there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResponse {
    pub ecosystem: Ecosystem,
    pub project_root: PathBuf,
    pub lock_files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub sbom_path: PathBuf,
    pub vuln_report_path: Option<PathBuf>,
    pub details_path: PathBuf,
    pub component_count: usize,
    pub direct_dependency_count: usize,
    /// Extraction directory left on disk when `keep_workdir` was requested
    pub kept_work_dir: Option<PathBuf>,
}

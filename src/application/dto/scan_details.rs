use crate::sbom_generation::domain::{Ecosystem, ProjectType};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Contents of `scan_details.json`: what was scanned and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanDetails {
    pub input_path: PathBuf,
    pub project_root: PathBuf,
    pub ecosystem: Ecosystem,
    pub detected_types: BTreeSet<ProjectType>,
    pub lock_files: Vec<PathBuf>,
    /// Number of direct dependencies retained in the SBOM
    pub direct_dependencies: usize,
    /// Package identifiers behind `direct_dependencies`
    pub direct_dependency_refs: Vec<String>,
    pub components: usize,
    pub dependency_edges: usize,
}

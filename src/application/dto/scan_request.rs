use crate::sbom_generation::domain::Ecosystem;
use std::path::PathBuf;

/// ScanRequest - Request DTO for the scan use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Project directory or `.zip` archive to scan
    pub input_path: PathBuf,
    /// Root under which `<partition>/<slug>/<timestamp>/` is created
    pub results_dir: PathBuf,
    /// Where archives are unpacked (system temp directory when `None`)
    pub work_base: Option<PathBuf>,
    /// Skips detection-based selection when set
    pub ecosystem: Option<Ecosystem>,
    /// Leaves the extracted archive on disk after the scan
    pub keep_workdir: bool,
}

impl ScanRequest {
    pub fn new(input_path: PathBuf, results_dir: PathBuf) -> Self {
        Self {
            input_path,
            results_dir,
            work_base: None,
            ecosystem: None,
            keep_workdir: false,
        }
    }

    pub fn with_work_base(mut self, work_base: Option<PathBuf>) -> Self {
        self.work_base = work_base;
        self
    }

    pub fn with_ecosystem(mut self, ecosystem: Option<Ecosystem>) -> Self {
        self.ecosystem = ecosystem;
        self
    }

    pub fn with_keep_workdir(mut self, keep_workdir: bool) -> Self {
        self.keep_workdir = keep_workdir;
        self
    }
}

/// DetectRequest - Request DTO for the detect use case
#[derive(Debug, Clone)]
pub struct DetectRequest {
    pub input_path: PathBuf,
    pub work_base: Option<PathBuf>,
    pub keep_workdir: bool,
}

impl DetectRequest {
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path,
            work_base: None,
            keep_workdir: false,
        }
    }
}

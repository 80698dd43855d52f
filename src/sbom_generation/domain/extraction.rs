use std::path::PathBuf;

/// Where an archive was unpacked and which directory holds the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub work_dir: PathBuf,
    /// The single wrapper directory when the archive has one, else `work_dir`.
    pub extracted_root: PathBuf,
    pub entries_written: usize,
    pub entries_skipped: usize,
}

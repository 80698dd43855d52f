use super::directory_walker::{breadth_first_directories, MAX_SEARCH_DEPTH};
use crate::ports::outbound::LockfileReader;
use crate::shared::error::SbomError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for locating and reading lock files
///
/// This adapter implements the LockfileReader port. Symbolic links are never
/// reported as lock files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Validate file is a regular file
    /// - Check file size limits
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        let file_size = validate_regular_file(path, file_type)?;
        validate_file_size(file_size, path, MAX_FILE_SIZE)?;

        fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_type, e))
    }
}

impl LockfileReader for FileSystemReader {
    fn locate(&self, directory: &Path, file_name: &str) -> Option<PathBuf> {
        let candidate = directory.join(file_name);
        is_regular_file(&candidate).then_some(candidate)
    }

    fn find_nested(&self, project_root: &Path, file_name: &str) -> Option<PathBuf> {
        breadth_first_directories(project_root, MAX_SEARCH_DEPTH)
            .into_iter()
            .filter(|(_, depth)| *depth > 0)
            .map(|(directory, _)| directory.join(file_name))
            .find(|candidate| is_regular_file(candidate))
    }

    fn read_lockfile(&self, path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lock file".to_string());

        if fs::symlink_metadata(path).is_err() {
            return Err(SbomError::LockfileNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "{} does not exist. Please check that the project contains it",
                    file_name
                ),
            }
            .into());
        }

        // Read lockfile content with security checks
        self.safe_read_file(path, &file_name).map_err(|e| {
            SbomError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

fn is_regular_file(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.is_file())
        .unwrap_or(false)
}

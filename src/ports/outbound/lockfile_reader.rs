use crate::shared::Result;
use std::path::{Path, PathBuf};

/// LockfileReader port for finding and reading lock and manifest files
pub trait LockfileReader {
    /// Returns `directory/file_name` when it is a regular file
    fn locate(&self, directory: &Path, file_name: &str) -> Option<PathBuf>;

    /// Finds `file_name` in the shallowest subdirectory of `project_root`
    /// that has it. The root itself is not checked.
    fn find_nested(&self, project_root: &Path, file_name: &str) -> Option<PathBuf>;

    /// Reads the file at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file is a symbolic link or exceeds the size limit
    /// - The file cannot be read as UTF-8
    fn read_lockfile(&self, path: &Path) -> Result<String>;
}

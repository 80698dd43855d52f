use std::collections::HashMap;
use std::path::{Path, PathBuf};
use unified_sbom::prelude::*;

/// Mock LockfileReader for testing
///
/// Serves file contents from memory. `find_nested` returns the
/// shallowest stored path below the root, ties broken by path order.
#[derive(Default)]
pub struct MockLockfileReader {
    pub files: HashMap<PathBuf, String>,
    pub should_fail: bool,
}

impl MockLockfileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl LockfileReader for MockLockfileReader {
    fn locate(&self, directory: &Path, file_name: &str) -> Option<PathBuf> {
        let candidate = directory.join(file_name);
        self.files.contains_key(&candidate).then_some(candidate)
    }

    fn find_nested(&self, project_root: &Path, file_name: &str) -> Option<PathBuf> {
        self.files
            .keys()
            .filter(|path| path.file_name().is_some_and(|name| name == file_name))
            .filter(|path| path.parent().is_some_and(|dir| dir != project_root))
            .filter(|path| path.starts_with(project_root))
            .min_by_key(|path| (path.components().count(), (*path).clone()))
            .cloned()
    }

    fn read_lockfile(&self, path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock lockfile read failure");
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock file not found: {}", path.display()))
    }
}

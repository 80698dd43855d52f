use crate::shared::naming::is_noise_directory;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How far below the search root detection and lock file lookup descend.
pub const MAX_SEARCH_DEPTH: usize = 4;

/// Lists `root` and its subdirectories in breadth-first order.
///
/// Children are visited in file-name order, noise directories are not
/// entered and symlinked directories are not followed, so the order is the
/// same on every run. Each path comes with its depth below `root`.
pub fn breadth_first_directories(root: &Path, max_depth: usize) -> Vec<(PathBuf, usize)> {
    let mut directories: Vec<(PathBuf, usize)> = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .map(is_noise_directory)
                    .unwrap_or(false)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| (entry.path().to_path_buf(), entry.depth()))
        .collect();

    // Pre-order with sorted children, stably grouped by depth, is exactly
    // breadth-first order.
    directories.sort_by_key(|(_, depth)| *depth);
    directories
}

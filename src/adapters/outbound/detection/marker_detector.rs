use crate::adapters::outbound::filesystem::{breadth_first_directories, MAX_SEARCH_DEPTH};
use crate::ports::outbound::ProjectDetector;
use crate::sbom_generation::domain::DetectionResult;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// MarkerDetector adapter inferring project types from well-known file names
///
/// The search root wins when it holds any marker. Otherwise the
/// subdirectory with the most marker hits wins, ties going to the one
/// visited first in breadth-first order (so the shallower one).
pub struct MarkerDetector {
    max_depth: usize,
}

impl MarkerDetector {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_SEARCH_DEPTH,
        }
    }

    fn detect_in(directory: &Path) -> Option<DetectionResult> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %directory.display(), error = %e, "cannot list directory");
                return None;
            }
        };

        let names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();

        DetectionResult::from_file_names(
            directory.to_path_buf(),
            names.iter().map(String::as_str),
        )
    }
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDetector for MarkerDetector {
    fn detect(&self, root: &Path) -> Result<DetectionResult> {
        if !root.exists() {
            return Err(SbomError::InputNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }
        if !root.is_dir() {
            return Err(SbomError::InvalidInput {
                path: root.to_path_buf(),
                reason: "Detection requires a directory".to_string(),
            }
            .into());
        }

        if let Some(found) = Self::detect_in(root) {
            tracing::debug!(root = %root.display(), types = ?found.detected_types, "markers at top level");
            return Ok(found);
        }

        let mut best: Option<DetectionResult> = None;
        for (directory, depth) in breadth_first_directories(root, self.max_depth) {
            if depth == 0 {
                continue;
            }
            let Some(candidate) = Self::detect_in(&directory) else {
                continue;
            };
            let better = best
                .as_ref()
                .map_or(true, |current| candidate.score() > current.score());
            if better {
                best = Some(candidate);
            }
        }

        match best {
            Some(found) => {
                tracing::debug!(root = %found.project_root.display(), score = found.score(), "markers found below search root");
                Ok(found)
            }
            None => Ok(DetectionResult::unknown(root.to_path_buf())),
        }
    }
}

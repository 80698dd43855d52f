use crate::sbom_generation::domain::DetectionResult;
use crate::shared::Result;
use std::path::Path;

/// ProjectDetector port for inferring ecosystems from marker files
pub trait ProjectDetector {
    /// Finds the directory under `root` with the strongest marker evidence
    ///
    /// Returns an `unknown` result rather than an error when nothing matches.
    ///
    /// # Errors
    /// Returns an error if `root` is missing or not a directory
    fn detect(&self, root: &Path) -> Result<DetectionResult>;
}

use crate::ports::outbound::ProgressReporter;
use crate::sbom_generation::domain::ExtractionResult;
use crate::shared::Result;
use std::path::Path;

/// ArchiveExtractor port for unpacking project archives
///
/// Implementations validate every entry before writing anything, so a
/// rejected archive leaves no files behind.
pub trait ArchiveExtractor {
    /// Unpacks `archive` into `work_dir`
    ///
    /// # Errors
    /// - `InputNotFound` if the archive does not exist
    /// - `InvalidInput` if it cannot be read as an archive
    /// - `SecurityViolation` if an entry would land outside `work_dir`
    ///   or the archive exceeds the unpacked size limit
    fn extract(
        &self,
        archive: &Path,
        work_dir: &Path,
        progress: &dyn ProgressReporter,
    ) -> Result<ExtractionResult>;
}

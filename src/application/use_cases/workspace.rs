use crate::ports::outbound::{ArchiveExtractor, IdGenerator, ProgressReporter};
use crate::shared::error::SbomError;
use crate::shared::naming::{compact_timestamp, input_base_name, slugify};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};

/// Project tree ready for detection.
///
/// For archive input this owns the extraction directory, which is removed
/// when the value is dropped unless it was created with `keep_workdir`.
pub(crate) struct PreparedInput {
    pub root: PathBuf,
    work_dir: Option<TempDir>,
}

impl PreparedInput {
    /// Releases the working directory, returning its path when it stays on disk.
    pub fn release(self, keep_workdir: bool) -> Option<PathBuf> {
        let work_dir = self.work_dir?;
        if keep_workdir {
            Some(work_dir.keep())
        } else {
            let path = work_dir.path().to_path_buf();
            if let Err(e) = work_dir.close() {
                tracing::debug!(path = %path.display(), error = %e, "failed to remove working directory");
            }
            None
        }
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Validates the input path and unpacks archives into a fresh working
/// directory named `<slug>_<YYYYmmdd_HHMMSS>_<id>` under `work_base`.
pub(crate) fn prepare_input<E: ArchiveExtractor + ?Sized>(
    input: &Path,
    work_base: Option<&Path>,
    keep_workdir: bool,
    started_at: DateTime<Utc>,
    ids: &dyn IdGenerator,
    extractor: &E,
    progress: &dyn ProgressReporter,
) -> Result<PreparedInput> {
    let metadata = fs::metadata(input).map_err(|_| SbomError::InputNotFound {
        path: input.to_path_buf(),
    })?;

    if metadata.is_dir() {
        return Ok(PreparedInput {
            root: input.to_path_buf(),
            work_dir: None,
        });
    }
    if !is_zip(input) {
        return Err(SbomError::InvalidInput {
            path: input.to_path_buf(),
            reason: "Expected a directory or a .zip archive".to_string(),
        }
        .into());
    }

    let work_base = work_base
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&work_base).map_err(|e| SbomError::FileWriteError {
        path: work_base.clone(),
        details: format!("Failed to create work base: {}", e),
    })?;

    let prefix = format!(
        "{}_{}_{}",
        slugify(&input_base_name(input)),
        compact_timestamp(started_at),
        ids.next_id()
    );
    let work_dir = Builder::new()
        .prefix(&prefix)
        .rand_bytes(0)
        .disable_cleanup(keep_workdir)
        .tempdir_in(&work_base)
        .map_err(|e| SbomError::FileWriteError {
            path: work_base.join(&prefix),
            details: format!("Failed to create working directory: {}", e),
        })?;

    progress.report(&format!("📦 Extracting archive: {}", input.display()));
    let extraction = extractor.extract(input, work_dir.path(), progress)?;
    progress.report(&format!(
        "✅ Extracted {} entr{} ({} skipped)",
        extraction.entries_written,
        if extraction.entries_written == 1 { "y" } else { "ies" },
        extraction.entries_skipped
    ));

    Ok(PreparedInput {
        root: extraction.extracted_root,
        work_dir: Some(work_dir),
    })
}

use crate::ports::outbound::{ArchiveExtractor, ProgressReporter};
use crate::sbom_generation::domain::ExtractionResult;
use crate::shared::error::SbomError;
use crate::shared::naming::{is_noise_directory, is_noise_file};
use crate::shared::security::{resolve_entry_path, MAX_ARCHIVE_UNPACKED_SIZE};
use crate::shared::Result;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const TRAVERSAL_HINT: &str =
    "The archive contains entries that would be written outside the extraction directory. Repackage it with relative paths only";
const SIZE_HINT: &str = "Split the project or remove large build artifacts before archiving it";

/// An entry that passed validation and will be written in the commit phase.
struct PlannedEntry {
    index: usize,
    relative: PathBuf,
    is_dir: bool,
    unix_mode: Option<u32>,
}

/// ZipArchiveExtractor adapter for `.zip` project uploads
///
/// Extraction happens in two phases:
/// 1. every entry name is resolved and checked, and the declared sizes are
///    summed, without touching the filesystem
/// 2. only then is the working directory populated
///
/// Entries under version-control, dependency-cache or OS metadata
/// directories are skipped.
pub struct ZipArchiveExtractor {
    max_unpacked_size: u64,
}

impl ZipArchiveExtractor {
    pub fn new() -> Self {
        Self {
            max_unpacked_size: MAX_ARCHIVE_UNPACKED_SIZE,
        }
    }

    /// Overrides the bound on the total uncompressed size
    pub fn with_max_unpacked_size(mut self, max_unpacked_size: u64) -> Self {
        self.max_unpacked_size = max_unpacked_size;
        self
    }

    fn open(archive: &Path) -> Result<ZipArchive<File>> {
        if !archive.exists() {
            return Err(SbomError::InputNotFound {
                path: archive.to_path_buf(),
            }
            .into());
        }

        let file = File::open(archive).map_err(|e| SbomError::InvalidInput {
            path: archive.to_path_buf(),
            reason: format!("Failed to open archive: {}", e),
        })?;

        ZipArchive::new(file).map_err(|e| {
            SbomError::InvalidInput {
                path: archive.to_path_buf(),
                reason: format!("Not a readable zip archive: {}", e),
            }
            .into()
        })
    }

    /// Validate phase. Returns the entries to write and the number skipped.
    fn plan(
        &self,
        archive_path: &Path,
        zip: &mut ZipArchive<File>,
    ) -> Result<(Vec<PlannedEntry>, usize)> {
        let mut planned = Vec::with_capacity(zip.len());
        let mut skipped = 0;
        let mut declared_total: u64 = 0;

        for index in 0..zip.len() {
            let entry = zip.by_index(index).map_err(|e| SbomError::InvalidInput {
                path: archive_path.to_path_buf(),
                reason: format!("Failed to read entry #{}: {}", index, e),
            })?;
            let raw_name = entry.name().to_string();

            let relative = resolve_entry_path(&raw_name).map_err(|reason| {
                SbomError::SecurityViolation {
                    path: PathBuf::from(&raw_name),
                    reason,
                    hint: TRAVERSAL_HINT.to_string(),
                }
            })?;

            declared_total = declared_total.saturating_add(entry.size());
            if declared_total > self.max_unpacked_size {
                return Err(SbomError::SecurityViolation {
                    path: archive_path.to_path_buf(),
                    reason: format!(
                        "Archive expands to more than {} bytes",
                        self.max_unpacked_size
                    ),
                    hint: SIZE_HINT.to_string(),
                }
                .into());
            }

            if relative.as_os_str().is_empty() {
                continue;
            }
            if is_noise_path(&relative, entry.is_dir()) {
                tracing::debug!(entry = %raw_name, "skipping noise entry");
                skipped += 1;
                continue;
            }

            planned.push(PlannedEntry {
                index,
                relative,
                is_dir: entry.is_dir(),
                unix_mode: entry.unix_mode(),
            });
        }

        Ok((planned, skipped))
    }

    /// Commit phase.
    fn write_entries(
        &self,
        archive_path: &Path,
        zip: &mut ZipArchive<File>,
        planned: &[PlannedEntry],
        work_dir: &Path,
        progress: &dyn ProgressReporter,
    ) -> Result<usize> {
        fs::create_dir_all(work_dir).map_err(|e| SbomError::FileWriteError {
            path: work_dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut written_bytes: u64 = 0;
        for (position, item) in planned.iter().enumerate() {
            let output_path = work_dir.join(&item.relative);
            let label = item.relative.to_string_lossy();
            progress.report_progress(position + 1, planned.len(), Some(&*label));

            if item.is_dir {
                create_dir(&output_path)?;
                continue;
            }
            if let Some(parent) = output_path.parent() {
                create_dir(parent)?;
            }

            let entry = zip
                .by_index(item.index)
                .map_err(|e| SbomError::InvalidInput {
                    path: archive_path.to_path_buf(),
                    reason: format!("Failed to read entry {}: {}", item.relative.display(), e),
                })?;

            let budget = self.max_unpacked_size.saturating_sub(written_bytes);
            let mut limited = entry.take(budget.saturating_add(1));
            let mut output = File::create(&output_path).map_err(|e| SbomError::FileWriteError {
                path: output_path.clone(),
                details: e.to_string(),
            })?;
            let copied = io::copy(&mut limited, &mut output).map_err(|e| {
                SbomError::InvalidInput {
                    path: archive_path.to_path_buf(),
                    reason: format!("Failed to extract {}: {}", item.relative.display(), e),
                }
            })?;

            // Declared sizes can lie; the bound also holds for actual bytes.
            written_bytes = written_bytes.saturating_add(copied);
            if written_bytes > self.max_unpacked_size {
                return Err(SbomError::SecurityViolation {
                    path: archive_path.to_path_buf(),
                    reason: format!(
                        "Archive expands to more than {} bytes",
                        self.max_unpacked_size
                    ),
                    hint: SIZE_HINT.to_string(),
                }
                .into());
            }

            if let Some(mode) = item.unix_mode {
                restore_permissions(&output_path, mode);
            }
        }

        Ok(planned.len())
    }
}

impl Default for ZipArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveExtractor for ZipArchiveExtractor {
    fn extract(
        &self,
        archive: &Path,
        work_dir: &Path,
        progress: &dyn ProgressReporter,
    ) -> Result<ExtractionResult> {
        let mut zip = Self::open(archive)?;
        let (planned, entries_skipped) = self.plan(archive, &mut zip)?;
        tracing::debug!(
            archive = %archive.display(),
            entries = planned.len(),
            skipped = entries_skipped,
            "archive validated"
        );

        let entries_written = self.write_entries(archive, &mut zip, &planned, work_dir, progress)?;
        let extracted_root = single_wrapper_root(work_dir)?;

        Ok(ExtractionResult {
            work_dir: work_dir.to_path_buf(),
            extracted_root,
            entries_written,
            entries_skipped,
        })
    }
}

fn is_noise_path(relative: &Path, is_dir: bool) -> bool {
    let names: Vec<&str> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    let Some((last, parents)) = names.split_last() else {
        return false;
    };
    if parents.iter().any(|name| is_noise_directory(name)) {
        return true;
    }
    if is_dir {
        is_noise_directory(last)
    } else {
        is_noise_file(last)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        SbomError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

#[cfg(unix)]
fn restore_permissions(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    // Owner read/write stays set so the parsers can still open the file.
    let permissions = fs::Permissions::from_mode((mode & 0o777) | 0o600);
    if let Err(e) = fs::set_permissions(path, permissions) {
        tracing::debug!(path = %path.display(), error = %e, "could not restore permissions");
    }
}

#[cfg(not(unix))]
fn restore_permissions(_path: &Path, _mode: u32) {}

/// Returns the lone top-level directory when the archive wraps the project
/// in one (`.DS_Store` ignored), otherwise `work_dir`.
fn single_wrapper_root(work_dir: &Path) -> Result<PathBuf> {
    let read_dir = fs::read_dir(work_dir).map_err(|e| SbomError::FileReadError {
        path: work_dir.to_path_buf(),
        details: e.to_string(),
    })?;

    let mut children = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| SbomError::FileReadError {
            path: work_dir.to_path_buf(),
            details: e.to_string(),
        })?;
        if entry.file_name() == ".DS_Store" {
            continue;
        }
        children.push(entry.path());
    }

    match children.as_slice() {
        [only] if fs::symlink_metadata(only).map(|m| m.is_dir()).unwrap_or(false) => {
            Ok(only.clone())
        }
        _ => Ok(work_dir.to_path_buf()),
    }
}

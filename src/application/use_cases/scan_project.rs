use super::workspace::prepare_input;
use crate::application::dto::{ScanDetails, ScanRequest, ScanResponse};
use crate::ports::outbound::{
    ArchiveExtractor, ArtifactWriter, Clock, IdGenerator, LockfileReader, ProgressReporter,
    ProjectDetector,
};
use crate::sbom_generation::domain::{
    DetectionResult, Ecosystem, ParsedLockfile, SbomDocument, VulnerabilityReport,
};
use crate::sbom_generation::parsers::{parse_lock, LockInput, LockSource};
use crate::sbom_generation::services::{SbomAssembler, SbomGenerator, TOOL_NAME};
use crate::shared::error::SbomError;
use crate::shared::naming::{compact_timestamp, input_base_name, slugify};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Lock file chosen for a scan plus the manifest read next to it.
struct LockSelection {
    source: LockSource,
    lock_path: PathBuf,
    content: String,
    manifest: Option<(PathBuf, String)>,
}

/// ScanProjectUseCase - Core use case for SBOM generation
///
/// Runs the whole pipeline for one input: unpack (for archives), detect,
/// pick an ecosystem, locate and parse its lock file, assemble the SBOM and
/// write the artifacts.
///
/// # Type Parameters
/// * `E` - ArchiveExtractor implementation
/// * `D` - ProjectDetector implementation
/// * `R` - LockfileReader implementation
/// * `W` - ArtifactWriter implementation
/// * `P` - ProgressReporter implementation
pub struct ScanProjectUseCase<E, D, R, W, P> {
    archive_extractor: E,
    project_detector: D,
    lockfile_reader: R,
    artifact_writer: W,
    progress_reporter: P,
    clock: Box<dyn Clock>,
    id_generator: Box<dyn IdGenerator>,
}

impl<E, D, R, W, P> ScanProjectUseCase<E, D, R, W, P>
where
    E: ArchiveExtractor,
    D: ProjectDetector,
    R: LockfileReader,
    W: ArtifactWriter,
    P: ProgressReporter,
{
    /// Creates a new ScanProjectUseCase with injected dependencies
    pub fn new(
        archive_extractor: E,
        project_detector: D,
        lockfile_reader: R,
        artifact_writer: W,
        progress_reporter: P,
        clock: Box<dyn Clock>,
        id_generator: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            archive_extractor,
            project_detector,
            lockfile_reader,
            artifact_writer,
            progress_reporter,
            clock,
            id_generator,
        }
    }

    /// Executes the scan
    ///
    /// # Errors
    /// - `InputNotFound` / `InvalidInput` for a bad input path
    /// - `SecurityViolation` when the archive is rejected
    /// - `LockfileNotFound` when no supported ecosystem or lock file exists
    /// - `ManifestParseError` when the lock file is malformed
    /// - `FileWriteError` when the SBOM cannot be written
    pub fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        let started_at = self.clock.now();
        let prepared = prepare_input(
            &request.input_path,
            request.work_base.as_deref(),
            request.keep_workdir,
            started_at,
            self.id_generator.as_ref(),
            &self.archive_extractor,
            &self.progress_reporter,
        )?;

        // The working directory is released on every path out of here.
        let outcome = self.scan_prepared(&request, &prepared.root, started_at);
        let kept_work_dir = prepared.release(request.keep_workdir);

        let mut response = outcome?;
        response.kept_work_dir = kept_work_dir;
        Ok(response)
    }

    fn scan_prepared(
        &self,
        request: &ScanRequest,
        root: &Path,
        started_at: DateTime<Utc>,
    ) -> Result<ScanResponse> {
        self.progress_reporter
            .report(&format!("🔍 Detecting project type in: {}", root.display()));
        let detection = self.project_detector.detect(root)?;
        let ecosystem = self.select_ecosystem(request.ecosystem, &detection)?;
        self.progress_reporter.report(&format!(
            "✅ Ecosystem: {} (project root: {})",
            ecosystem,
            detection.project_root.display()
        ));

        let selection = self.select_lock_source(ecosystem, &detection.project_root)?;
        let fallback_name = input_base_name(&request.input_path);
        let parsed = self.parse_selection(&selection, &fallback_name)?;

        let metadata = SbomGenerator::generate_default_metadata(started_at);
        let document = SbomAssembler::assemble(parsed.lockfile, metadata);
        self.progress_reporter.report(&format!(
            "✅ Assembled {} component(s) and {} dependency edge(s)",
            document.components().len(),
            document.dependencies().len()
        ));

        let output_dir = request
            .results_dir
            .join(ecosystem.partition())
            .join(slugify(&fallback_name))
            .join(compact_timestamp(started_at));

        let sbom_path = self.artifact_writer.write_sbom(&output_dir, &document)?;
        let vuln_report_path = self.write_vulnerability_stub(&output_dir, &document);

        let direct_dependencies = retained_direct_dependencies(&parsed.direct, &document);
        let mut lock_files = vec![selection.lock_path.clone()];
        if let Some((manifest_path, _)) = &selection.manifest {
            lock_files.push(manifest_path.clone());
        }

        let details = ScanDetails {
            input_path: request.input_path.clone(),
            project_root: detection.project_root.clone(),
            ecosystem,
            detected_types: detection.detected_types.clone(),
            lock_files: lock_files.clone(),
            direct_dependencies: direct_dependencies.len(),
            direct_dependency_refs: direct_dependencies.clone(),
            components: document.components().len(),
            dependency_edges: document.dependencies().len(),
        };
        let details_path = self
            .artifact_writer
            .write_scan_details(&output_dir, &details)?;

        self.progress_reporter
            .report_completion(&format!("✅ SBOM written to: {}", sbom_path.display()));

        Ok(ScanResponse {
            ecosystem,
            project_root: detection.project_root,
            lock_files,
            output_dir,
            sbom_path,
            vuln_report_path,
            details_path,
            component_count: document.components().len(),
            direct_dependency_count: direct_dependencies.len(),
            kept_work_dir: None,
        })
    }

    /// The caller's override wins; otherwise the highest-priority detected
    /// ecosystem (rust, then python, then javascript).
    fn select_ecosystem(
        &self,
        requested: Option<Ecosystem>,
        detection: &DetectionResult,
    ) -> Result<Ecosystem> {
        if let Some(ecosystem) = requested {
            return Ok(ecosystem);
        }

        Ecosystem::PRIORITY
            .into_iter()
            .find(|ecosystem| detection.contains(ecosystem.project_type()))
            .ok_or_else(|| {
                let detected: Vec<&str> = detection
                    .detected_types
                    .iter()
                    .map(|t| t.as_str())
                    .collect();
                SbomError::LockfileNotFound {
                    path: detection.project_root.clone(),
                    suggestion: format!(
                        "No npm, Cargo or Python project was found (detected: {}). Use --ecosystem to pick one explicitly",
                        detected.join(", ")
                    ),
                }
                .into()
            })
    }

    /// Picks the most authoritative lock source present for the ecosystem
    /// and reads it together with its companion manifest.
    ///
    /// Every candidate is tried at the project root before any subdirectory
    /// is searched, so a root `poetry.lock` beats a nested `uv.lock`.
    fn select_lock_source(&self, ecosystem: Ecosystem, project_root: &Path) -> Result<LockSelection> {
        let candidates = LockSource::candidates(ecosystem);
        let at_root = candidates.iter().find_map(|source| {
            self.lockfile_reader
                .locate(project_root, source.file_name())
                .map(|path| (*source, path))
        });
        let found = at_root.or_else(|| {
            candidates.iter().find_map(|source| {
                self.lockfile_reader
                    .find_nested(project_root, source.file_name())
                    .map(|path| (*source, path))
            })
        });

        let Some((source, lock_path)) = found else {
            let names: Vec<&str> = candidates.iter().map(|s| s.file_name()).collect();
            return Err(SbomError::LockfileNotFound {
                path: project_root.to_path_buf(),
                suggestion: format!(
                    "None of {} exists under the project directory",
                    names.join(", ")
                ),
            }
            .into());
        };

        self.progress_reporter
            .report(&format!("📖 Loading {} from: {}", source, lock_path.display()));
        let content = self.lockfile_reader.read_lockfile(&lock_path)?;
        let manifest = self.read_companion_manifest(source, &lock_path);

        Ok(LockSelection {
            source,
            lock_path,
            content,
            manifest,
        })
    }

    /// Reads the manifest sitting next to the lock file, if any. A missing or
    /// malformed manifest only costs the project's name and version.
    fn read_companion_manifest(&self, source: LockSource, lock_path: &Path) -> Option<(PathBuf, String)> {
        let manifest_name = source.companion_manifest()?;
        if source.file_name() == manifest_name {
            return None;
        }
        let lock_dir = lock_path.parent()?;
        let manifest_path = self.lockfile_reader.locate(lock_dir, manifest_name)?;

        let content = match self.lockfile_reader.read_lockfile(&manifest_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %manifest_path.display(), error = %e, "companion manifest unreadable");
                return None;
            }
        };
        if let Err(e) = toml::from_str::<toml::Table>(&content) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Ignoring malformed {}: {}",
                manifest_path.display(),
                e.to_string().trim_end()
            ));
            return None;
        }
        Some((manifest_path, content))
    }

    fn parse_selection(&self, selection: &LockSelection, fallback_name: &str) -> Result<ParsedScan> {
        let input = LockInput {
            source: selection.source,
            content: &selection.content,
            manifest: selection.manifest.as_ref().map(|(_, content)| content.as_str()),
            fallback_name,
        };

        let lockfile: ParsedLockfile = parse_lock(input).map_err(|e| SbomError::ManifestParseError {
            path: selection.lock_path.clone(),
            details: format!("{:#}", e),
        })?;
        self.progress_reporter.report(&format!(
            "✅ Detected {} package(s)",
            lockfile.components.len()
        ));

        let direct = lockfile.direct_dependencies.clone();
        Ok(ParsedScan { lockfile, direct })
    }

    /// The stub is an enrichment; failing to write it never fails the scan.
    fn write_vulnerability_stub(&self, output_dir: &Path, document: &SbomDocument) -> Option<PathBuf> {
        let report = VulnerabilityReport::stub(
            document.metadata().timestamp(),
            TOOL_NAME,
            document.components().len(),
        );
        match self
            .artifact_writer
            .write_vulnerability_report(output_dir, &report)
        {
            Ok(path) => Some(path),
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Vulnerability report was not written: {}",
                    e
                ));
                None
            }
        }
    }
}

struct ParsedScan {
    lockfile: ParsedLockfile,
    direct: Vec<String>,
}

/// Direct dependencies that survived assembly, deduplicated in order.
fn retained_direct_dependencies(direct: &[String], document: &SbomDocument) -> Vec<String> {
    let mut retained: Vec<String> = Vec::new();
    for purl in direct {
        if document.find_component(purl).is_some() && !retained.contains(purl) {
            retained.push(purl.clone());
        }
    }
    retained
}

use crate::adapters::outbound::formatters::CycloneDxFormatter;
use crate::application::dto::ScanDetails;
use crate::ports::outbound::{
    ArtifactWriter, OutputPresenter, SbomFormatter, SBOM_FILE, SCAN_DETAILS_FILE,
    VULN_REPORT_FILE,
};
use crate::sbom_generation::domain::{SbomDocument, VulnerabilityReport};
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing scan artifacts
///
/// This adapter implements the ArtifactWriter port. The SBOM goes through
/// the configured formatter (CycloneDX by default); the reports are plain
/// pretty-printed JSON.
pub struct FileSystemWriter {
    formatter: Box<dyn SbomFormatter>,
}

impl FileSystemWriter {
    pub fn new() -> Self {
        Self::with_formatter(Box::new(CycloneDxFormatter::new()))
    }

    pub fn with_formatter(formatter: Box<dyn SbomFormatter>) -> Self {
        Self { formatter }
    }

    fn ensure_directory(&self, output_dir: &Path) -> Result<()> {
        fs::create_dir_all(output_dir).map_err(|e| {
            SbomError::FileWriteError {
                path: output_dir.to_path_buf(),
                details: format!("Failed to create output directory: {}", e),
            }
            .into()
        })
    }

    /// Security validation before writing:
    /// - Reject if output path exists and is a symlink
    fn validate_output_security(&self, output_path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(output_path) {
            if metadata.is_symlink() {
                return Err(SbomError::FileWriteError {
                    path: output_path.to_path_buf(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn write_file(&self, output_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
        self.ensure_directory(output_dir)?;
        let output_path = output_dir.join(file_name);
        self.validate_output_security(&output_path)?;

        fs::write(&output_path, content).map_err(|e| SbomError::FileWriteError {
            path: output_path.clone(),
            details: e.to_string(),
        })?;
        tracing::debug!(path = %output_path.display(), bytes = content.len(), "artifact written");
        Ok(output_path)
    }

    fn write_json<T: Serialize>(
        &self,
        output_dir: &Path,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let mut json = serde_json::to_string_pretty(value).map_err(|e| {
            SbomError::FileWriteError {
                path: output_dir.join(file_name),
                details: format!("Failed to serialize: {}", e),
            }
        })?;
        json.push('\n');
        self.write_file(output_dir, file_name, &json)
    }
}

impl Default for FileSystemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactWriter for FileSystemWriter {
    fn write_sbom(&self, output_dir: &Path, document: &SbomDocument) -> Result<PathBuf> {
        let content = self.formatter.format(document)?;
        self.write_file(output_dir, SBOM_FILE, &content)
    }

    fn write_vulnerability_report(
        &self,
        output_dir: &Path,
        report: &VulnerabilityReport,
    ) -> Result<PathBuf> {
        self.write_json(output_dir, VULN_REPORT_FILE, report)
    }

    fn write_scan_details(&self, output_dir: &Path, details: &ScanDetails) -> Result<PathBuf> {
        self.write_json(output_dir, SCAN_DETAILS_FILE, details)
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

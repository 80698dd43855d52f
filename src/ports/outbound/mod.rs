/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with the filesystem, the console and the system clock.
pub mod archive_extractor;
pub mod artifact_writer;
pub mod clock;
pub mod formatter;
pub mod lockfile_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_detector;

pub use archive_extractor::ArchiveExtractor;
pub use artifact_writer::{ArtifactWriter, SBOM_FILE, SCAN_DETAILS_FILE, VULN_REPORT_FILE};
pub use clock::{Clock, IdGenerator};
pub use formatter::SbomFormatter;
pub use lockfile_reader::LockfileReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_detector::ProjectDetector;

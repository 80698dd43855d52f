use super::workspace::prepare_input;
use crate::application::dto::DetectRequest;
use crate::ports::outbound::{
    ArchiveExtractor, Clock, IdGenerator, ProgressReporter, ProjectDetector,
};
use crate::sbom_generation::domain::DetectionResult;
use crate::shared::Result;

/// DetectProjectUseCase - Reports which ecosystems a project uses
///
/// Archives are unpacked into a scoped working directory that is removed
/// before `execute` returns (unless `keep_workdir` is set). Nothing is parsed.
pub struct DetectProjectUseCase<E, D, P> {
    archive_extractor: E,
    project_detector: D,
    progress_reporter: P,
    clock: Box<dyn Clock>,
    id_generator: Box<dyn IdGenerator>,
}

impl<E, D, P> DetectProjectUseCase<E, D, P>
where
    E: ArchiveExtractor,
    D: ProjectDetector,
    P: ProgressReporter,
{
    pub fn new(
        archive_extractor: E,
        project_detector: D,
        progress_reporter: P,
        clock: Box<dyn Clock>,
        id_generator: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            archive_extractor,
            project_detector,
            progress_reporter,
            clock,
            id_generator,
        }
    }

    pub fn execute(&self, request: DetectRequest) -> Result<DetectionResult> {
        let prepared = prepare_input(
            &request.input_path,
            request.work_base.as_deref(),
            request.keep_workdir,
            self.clock.now(),
            self.id_generator.as_ref(),
            &self.archive_extractor,
            &self.progress_reporter,
        )?;

        let result = self.project_detector.detect(&prepared.root);
        if let Some(kept) = prepared.release(request.keep_workdir) {
            self.progress_reporter
                .report(&format!("📁 Working directory kept at: {}", kept.display()));
        }
        result
    }
}

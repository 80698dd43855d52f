/// Use cases module containing application business logic orchestration
mod detect_project;
mod scan_project;
mod workspace;

pub use detect_project::DetectProjectUseCase;
pub use scan_project::ScanProjectUseCase;

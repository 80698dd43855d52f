/// Result alias used by every port and use case.
///
/// Domain failures are raised as [`crate::shared::error::SbomError`] and travel
/// inside `anyhow::Error`, so callers can still downcast to pick an exit code.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

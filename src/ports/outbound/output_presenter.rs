use crate::shared::Result;

/// OutputPresenter port for presenting command output
///
/// Keeps stdout reserved for machine-readable output such as the
/// detection result or the path of the written SBOM.
pub trait OutputPresenter {
    /// Presents `content` to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}

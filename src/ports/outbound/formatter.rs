use crate::sbom_generation::domain::SbomDocument;
use crate::shared::Result;

/// SbomFormatter port for serializing an SBOM document
pub trait SbomFormatter {
    /// Formats the document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &SbomDocument) -> Result<String>;
}

use crate::sbom_generation::domain::SbomMetadata;
use chrono::{DateTime, SecondsFormat, Utc};

pub const TOOL_VENDOR: &str = "unified-sbom";
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// SbomGenerator service for generating SBOM metadata
///
/// The generation time is passed in, so the same instant always yields
/// the same metadata.
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates SBOM metadata for the given instant
    ///
    /// The timestamp is RFC 3339 in UTC with whole seconds
    /// (`2024-01-01T00:00:00Z`).
    pub fn generate_metadata(
        generated_at: DateTime<Utc>,
        tool_vendor: &str,
        tool_name: &str,
        tool_version: &str,
    ) -> SbomMetadata {
        SbomMetadata::new(
            Self::format_timestamp(generated_at),
            tool_vendor.to_string(),
            tool_name.to_string(),
            tool_version.to_string(),
        )
    }

    /// Generates SBOM metadata identifying this tool
    ///
    /// This uses the compile-time version from Cargo.toml
    pub fn generate_default_metadata(generated_at: DateTime<Utc>) -> SbomMetadata {
        Self::generate_metadata(generated_at, TOOL_VENDOR, TOOL_NAME, TOOL_VERSION)
    }

    pub fn format_timestamp(at: DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

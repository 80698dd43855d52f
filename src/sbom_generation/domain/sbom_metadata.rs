/// SbomMetadata value object representing SBOM metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomMetadata {
    timestamp: String,
    tool_vendor: String,
    tool_name: String,
    tool_version: String,
}

impl SbomMetadata {
    pub fn new(
        timestamp: String,
        tool_vendor: String,
        tool_name: String,
        tool_version: String,
    ) -> Self {
        Self {
            timestamp,
            tool_vendor,
            tool_name,
            tool_version,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_vendor(&self) -> &str {
        &self.tool_vendor
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sbom_metadata_new() {
        let metadata = SbomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "acme".to_string(),
            "unified-sbom".to_string(),
            "0.1.0".to_string(),
        );

        assert_eq!(metadata.timestamp(), "2024-01-01T00:00:00Z");
        assert_eq!(metadata.tool_vendor(), "acme");
        assert_eq!(metadata.tool_name(), "unified-sbom");
        assert_eq!(metadata.tool_version(), "0.1.0");
    }
}

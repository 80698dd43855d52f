use serde::Serialize;

const STUB_NOTE: &str =
    "Vulnerability lookup is not performed by this tool. Feed sbom.json to a vulnerability scanner.";

/// Placeholder report written next to every SBOM.
///
/// Always empty: findings come from an external scanner that consumes the SBOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityReport {
    pub generated_at: String,
    pub tool: String,
    pub note: String,
    pub total_packages: usize,
    pub vulnerabilities_found: usize,
    pub vulnerabilities: Vec<serde_json::Value>,
}

impl VulnerabilityReport {
    pub fn stub(generated_at: &str, tool: &str, total_packages: usize) -> Self {
        Self {
            generated_at: generated_at.to_string(),
            tool: tool.to_string(),
            note: STUB_NOTE.to_string(),
            total_packages,
            vulnerabilities_found: 0,
            vulnerabilities: Vec::new(),
        }
    }
}

use super::ProjectType;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Marker files found for each detected project type.
pub type Evidence = BTreeMap<ProjectType, Vec<String>>;

/// Outcome of ecosystem detection. Advisory only: nothing has been parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub project_root: PathBuf,
    pub detected_types: BTreeSet<ProjectType>,
    pub evidence: Evidence,
}

impl DetectionResult {
    /// Builds a result from the file names present in one directory.
    ///
    /// Returns `None` when none of the names is a known marker.
    pub fn from_file_names<'a, I>(project_root: PathBuf, file_names: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let evidence = collect_evidence(file_names);
        if evidence.is_empty() {
            return None;
        }
        Some(Self {
            project_root,
            detected_types: evidence.keys().copied().collect(),
            evidence,
        })
    }

    /// Result used when no marker exists anywhere under the search root.
    pub fn unknown(project_root: PathBuf) -> Self {
        Self {
            project_root,
            detected_types: BTreeSet::from([ProjectType::Unknown]),
            evidence: Evidence::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.evidence.is_empty()
    }

    /// Total number of marker hits, used to rank candidate directories.
    pub fn score(&self) -> usize {
        self.evidence.values().map(Vec::len).sum()
    }

    pub fn contains(&self, project_type: ProjectType) -> bool {
        self.detected_types.contains(&project_type)
    }
}

/// Groups marker hits by project type. Marker lists are sorted.
pub fn collect_evidence<'a, I>(file_names: I) -> Evidence
where
    I: IntoIterator<Item = &'a str>,
{
    let mut evidence = Evidence::new();
    for name in file_names {
        for project_type in ProjectType::DETECTABLE {
            if project_type.markers().contains(&name) {
                evidence
                    .entry(project_type)
                    .or_default()
                    .push(name.to_string());
            }
        }
    }
    for markers in evidence.values_mut() {
        markers.sort();
        markers.dedup();
    }
    evidence
}

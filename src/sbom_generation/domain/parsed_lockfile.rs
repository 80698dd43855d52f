use super::{Component, DependencyEdge, Ecosystem};

/// What a lock parser hands to the assembler.
///
/// Components may still contain duplicates and edges may still reference
/// purls that are not components; the assembler cleans both up.
#[derive(Debug, Clone)]
pub struct ParsedLockfile {
    pub ecosystem: Ecosystem,
    /// Project's own identity, reported as the document's metadata component.
    pub root: Option<Component>,
    pub components: Vec<Component>,
    pub edges: Vec<DependencyEdge>,
    /// purls of the dependencies the project declares itself
    pub direct_dependencies: Vec<String>,
}

impl ParsedLockfile {
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            root: None,
            components: Vec::new(),
            edges: Vec::new(),
            direct_dependencies: Vec::new(),
        }
    }
}

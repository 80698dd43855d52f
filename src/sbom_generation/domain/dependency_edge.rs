use indexmap::IndexSet;

/// Directed "depends on" relation keyed by bom-ref.
///
/// Targets keep insertion order and never repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    from_ref: String,
    to_refs: IndexSet<String>,
}

impl DependencyEdge {
    pub fn new(from_ref: impl Into<String>) -> Self {
        Self {
            from_ref: from_ref.into(),
            to_refs: IndexSet::new(),
        }
    }

    pub fn with_targets<I, S>(from_ref: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut edge = Self::new(from_ref);
        edge.extend(targets);
        edge
    }

    pub fn add_target(&mut self, to_ref: impl Into<String>) {
        self.to_refs.insert(to_ref.into());
    }

    pub fn extend<I, S>(&mut self, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for target in targets {
            self.add_target(target);
        }
    }

    pub fn retain_targets<F>(&mut self, keep: F)
    where
        F: FnMut(&String) -> bool,
    {
        self.to_refs.retain(keep);
    }

    pub fn from_ref(&self) -> &str {
        &self.from_ref
    }

    pub fn to_refs(&self) -> impl Iterator<Item = &str> {
        self.to_refs.iter().map(String::as_str)
    }

    pub fn target_count(&self) -> usize {
        self.to_refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_refs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_deduplicated_in_order() {
        let edge = DependencyEdge::with_targets("a", ["c", "b", "c"]);
        assert_eq!(edge.to_refs().collect::<Vec<_>>(), vec!["c", "b"]);
        assert_eq!(edge.target_count(), 2);
    }

    #[test]
    fn test_retain_targets() {
        let mut edge = DependencyEdge::with_targets("a", ["b", "c"]);
        edge.retain_targets(|t| t != "b");
        assert_eq!(edge.to_refs().collect::<Vec<_>>(), vec!["c"]);
        edge.retain_targets(|_| false);
        assert!(edge.is_empty());
    }
}

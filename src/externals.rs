//! Bookkeeping for referenced types that lie outside the extracted model.

use indexmap::IndexSet;

/// Records references to external types.
pub trait ExternalTypeRegistry {
    /// Note a reference to a type that is not part of the extracted model.
    fn report(&mut self, name: &str);

    /// Fix the final order of recorded types. Called once, after all
    /// resolution completes.
    fn finalize_ordering(&mut self);

    /// Recorded type names.
    fn entries(&self) -> Vec<String>;
}

/// Default registry: distinct names in first-seen order until finalized,
/// sorted afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExternalTypeHierarchy {
    names: IndexSet<String>,
    finalized: bool,
}

impl ExternalTypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ExternalTypeRegistry for ExternalTypeHierarchy {
    fn report(&mut self, name: &str) {
        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
    }

    fn finalize_ordering(&mut self) {
        self.names.sort();
        self.finalized = true;
    }

    fn entries(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_deduplicates() {
        let mut externals = ExternalTypeHierarchy::new();
        externals.report("lib.Widget");
        externals.report("lib.Widget");
        assert_eq!(externals.len(), 1);
    }

    #[test]
    fn finalize_sorts_entries() {
        let mut externals = ExternalTypeHierarchy::new();
        externals.report("z.Zeta");
        externals.report("a.Alpha");
        assert_eq!(externals.entries(), vec!["z.Zeta", "a.Alpha"]);

        externals.finalize_ordering();
        assert!(externals.is_finalized());
        assert_eq!(externals.entries(), vec!["a.Alpha", "z.Zeta"]);
    }
}

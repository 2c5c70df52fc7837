//! The redirect ledger.
//!
//! Records which categories' reference meaning changed during a run, and
//! what they now point at. `source == target` marks a slug change; a
//! different target marks content moved or hidden in favour of another
//! category. Categories without an entry are left alone by the remapper.

use recat_core::CategoryId;

/// Run-scoped map from source category to target category.
///
/// Recording a source again keeps its original position and replaces its
/// target (last write wins). Iteration follows first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectLedger {
    entries: Vec<(CategoryId, CategoryId)>,
}

impl RedirectLedger {
    /// An empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `source` at `target`, superseding any earlier target
    pub fn record(&mut self, source: CategoryId, target: CategoryId) {
        match self.entries.iter_mut().find(|(s, _)| *s == source) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((source, target)),
        }
    }

    /// Current target of `source`
    pub fn target(&self, source: CategoryId) -> Option<CategoryId> {
        self.entries
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, t)| *t)
    }

    /// Number of redirected categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was redirected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (source, target) pairs in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, CategoryId)> + '_ {
        self.entries.iter().copied()
    }
}

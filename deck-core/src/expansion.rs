//! Ephemeral expanded/collapsed state for lists.
//!
//! Keyed by list identifier and never persisted; a reload collapses
//! everything again.

use deck_types::ListId;
use std::collections::HashSet;

/// The set of lists currently showing their tasks.
#[derive(Debug, Clone, Default)]
pub struct ExpansionSet {
    expanded: HashSet<ListId>,
}

impl ExpansionSet {
    /// Create an empty set (everything collapsed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns the new expanded state.
    pub fn toggle(&mut self, id: ListId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Whether `id` is currently expanded.
    pub fn is_expanded(&self, id: ListId) -> bool {
        self.expanded.contains(&id)
    }

    /// Drop state for a deleted list.
    pub fn forget(&mut self, id: ListId) {
        self.expanded.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut set = ExpansionSet::new();
        let id = ListId::new();

        assert!(!set.is_expanded(id));
        assert!(set.toggle(id));
        assert!(set.is_expanded(id));
        assert!(!set.toggle(id));
        assert!(!set.is_expanded(id));
    }

    #[test]
    fn paired_toggles_are_idempotent() {
        let mut set = ExpansionSet::new();
        let id = ListId::new();

        for _ in 0..3 {
            set.toggle(id);
            set.toggle(id);
        }
        assert!(!set.is_expanded(id));
    }

    #[test]
    fn forget_collapses_deleted_list() {
        let mut set = ExpansionSet::new();
        let id = ListId::new();

        set.toggle(id);
        set.forget(id);
        assert!(!set.is_expanded(id));
    }

    #[test]
    fn lists_are_tracked_independently() {
        let mut set = ExpansionSet::new();
        let (a, b) = (ListId::new(), ListId::new());

        set.toggle(a);
        assert!(set.is_expanded(a));
        assert!(!set.is_expanded(b));
    }
}

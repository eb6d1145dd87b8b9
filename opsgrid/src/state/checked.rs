//! Checked-item state.
//!
//! Checks are keyed by row id so they stay stable while rows are paged,
//! filtered or reordered.

use std::collections::HashMap;

/// ID-based checked state.
///
/// `all_checked` is derived from whatever ids are currently visible; it is
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct CheckedMap {
    checked: HashMap<String, bool>,
}

impl CheckedMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with initially checked ids.
    pub fn with_checked<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            checked: ids.into_iter().map(|id| (id.into(), true)).collect(),
        }
    }

    /// Check if an ID is checked.
    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.get(id).copied().unwrap_or(false)
    }

    /// Set the checked value of one ID.
    pub fn set(&mut self, id: &str, checked: bool) {
        self.checked.insert(id.to_string(), checked);
    }

    /// Flip one ID. Returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = !self.is_checked(id);
        self.checked.insert(id.to_string(), next);
        next
    }

    /// Set every ID in `visible_ids` to `next`.
    ///
    /// IDs outside `visible_ids` are left alone. Returns the IDs whose value
    /// actually changed.
    pub fn toggle_all<S: AsRef<str>>(&mut self, visible_ids: &[S], next: bool) -> Vec<String> {
        let mut changed = Vec::new();
        for id in visible_ids {
            let id = id.as_ref();
            if self.is_checked(id) != next {
                changed.push(id.to_string());
            }
            self.checked.insert(id.to_string(), next);
        }
        changed
    }

    /// Whether every visible ID is checked.
    ///
    /// An empty view is never "all checked".
    pub fn all_checked<S: AsRef<str>>(&self, visible_ids: &[S]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.is_checked(id.as_ref()))
    }

    /// Whether some, but not all, visible IDs are checked.
    pub fn some_checked<S: AsRef<str>>(&self, visible_ids: &[S]) -> bool {
        let count = visible_ids
            .iter()
            .filter(|id| self.is_checked(id.as_ref()))
            .count();
        count > 0 && count < visible_ids.len()
    }

    /// All checked IDs (sorted for deterministic ordering).
    pub fn checked_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .checked
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of checked IDs.
    pub fn len(&self) -> usize {
        self.checked.values().filter(|checked| **checked).count()
    }

    /// Check if nothing is checked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uncheck everything. Returns the IDs that were checked.
    pub fn clear(&mut self) -> Vec<String> {
        let removed = self.checked_ids();
        self.checked.clear();
        removed
    }
}

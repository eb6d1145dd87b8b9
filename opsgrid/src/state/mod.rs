//! Selection, sort and expand state.
//!
//! Each grid owns one [`GridState`]. It is seeded once from initial values
//! and afterwards changed only by the grid's own handlers. None of these
//! operations touch the row dataset.

use crate::row::Row;

mod checked;
mod expand;
mod sort;

pub use checked::CheckedMap;
pub use expand::{ExpandMap, effective_expand};
pub use sort::{SortConfig, SortDirection};

/// Checked, expand and sort state of one grid.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    /// Checked rows.
    pub checked: CheckedMap,
    /// Expanded rows.
    pub expand: ExpandMap,
    /// Active sort.
    pub sort: SortConfig,
}

impl GridState {
    /// Create empty state: nothing checked, everything open, no sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row's checked value. Returns the new value.
    pub fn toggle_check(&mut self, id: &str) -> bool {
        let checked = self.checked.toggle(id);
        log::debug!("[state] check '{}' -> {}", id, checked);
        checked
    }

    /// Set every visible row to `next`, leaving other rows alone.
    ///
    /// Returns the IDs whose value changed.
    pub fn toggle_all<S: AsRef<str>>(&mut self, visible_ids: &[S], next: bool) -> Vec<String> {
        let changed = self.checked.toggle_all(visible_ids, next);
        log::debug!(
            "[state] toggle all ({} visible) -> {}, {} changed",
            visible_ids.len(),
            next,
            changed.len()
        );
        changed
    }

    /// Advance the sort for `key`. Returns the resulting config.
    pub fn toggle_sort(&mut self, key: &str) -> SortConfig {
        self.sort.toggle(key);
        log::debug!("[state] sort {:?}", self.sort);
        self.sort.clone()
    }

    /// Flip one row's expand value. Returns the new value.
    pub fn toggle_expand(&mut self, id: &str) -> bool {
        let expanded = self.expand.toggle(id);
        log::debug!("[state] expand '{}' -> {}", id, expanded);
        expanded
    }

    /// Expand every row with children.
    pub fn expand_all(&mut self, rows: &[Row]) {
        self.expand.set_all(rows, true);
        log::debug!("[state] expand all");
    }

    /// Collapse every row with children.
    pub fn collapse_all(&mut self, rows: &[Row]) {
        self.expand.set_all(rows, false);
        log::debug!("[state] collapse all");
    }

    /// Uncheck everything. Returns the IDs that were checked.
    pub fn clear_checked(&mut self) -> Vec<String> {
        let cleared = self.checked.clear();
        log::debug!("[state] cleared {} checked rows", cleared.len());
        cleared
    }

    /// Checked row IDs, sorted.
    pub fn checked_ids(&self) -> Vec<String> {
        self.checked.checked_ids()
    }

    /// Whether every visible row is checked.
    pub fn all_checked<S: AsRef<str>>(&self, visible_ids: &[S]) -> bool {
        self.checked.all_checked(visible_ids)
    }

    /// Effective expand value of a row.
    pub fn is_expanded(&self, id: &str) -> bool {
        effective_expand(&self.expand, id)
    }
}

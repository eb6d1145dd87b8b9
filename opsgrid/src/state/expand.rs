//! Expand state for hierarchical rows.

use std::collections::HashMap;

use crate::row::Row;

/// Whether a row counts as expanded.
///
/// Rows that were never toggled are open: a missing key means expanded.
/// [`ExpandMap::get`] still reports the raw stored value.
pub fn effective_expand(map: &ExpandMap, id: &str) -> bool {
    map.get(id).unwrap_or(true)
}

/// Per-row-id expand state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandMap {
    entries: HashMap<String, bool>,
}

impl ExpandMap {
    /// Create an empty map (everything open).
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with explicit values.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        }
    }

    /// Explicitly stored value, `None` if the row was never toggled.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// Store an explicit value.
    pub fn set(&mut self, id: &str, expanded: bool) {
        self.entries.insert(id.to_string(), expanded);
    }

    /// Flip relative to the effective value. Returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = !effective_expand(self, id);
        self.set(id, next);
        next
    }

    /// Forget the explicit value for a row.
    pub fn reset(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Set every row that has children to `expanded`.
    pub fn set_all(&mut self, rows: &[Row], expanded: bool) {
        let mut stack: Vec<&Row> = rows.iter().collect();
        while let Some(row) = stack.pop() {
            if row.has_children() {
                self.entries.insert(row.id.clone(), expanded);
                stack.extend(row.children());
            }
        }
    }

    /// Number of explicitly stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no row was ever toggled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

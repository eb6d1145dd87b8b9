//! Column reordering and pin-set management.

use serde::{Deserialize, Serialize};

use crate::column::Column;

use super::drag::DropPosition;

/// Move `source` next to `target`.
///
/// The source is removed and reinserted immediately before or after the
/// target. Returns `None` for an invalid drop (unknown ids, source equal to
/// target) and when the order would not change.
pub fn move_item<T, F>(
    items: &[T],
    key: F,
    source: &str,
    target: &str,
    position: DropPosition,
) -> Option<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if source == target {
        return None;
    }
    let from = items.iter().position(|item| key(item) == source)?;
    if !items.iter().any(|item| key(item) == target) {
        return None;
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    let to = reordered.iter().position(|item| key(item) == target)?;
    let at = match position {
        DropPosition::Before => to,
        DropPosition::After => to + 1,
    };
    reordered.insert(at, moved);

    let unchanged = reordered
        .iter()
        .zip(items)
        .all(|(a, b)| key(a) == key(b));
    (!unchanged).then_some(reordered)
}

/// Move column `source` next to `target` in the column definitions.
///
/// Group columns are kept; both columns must sit in the same sibling list
/// (top level or the same group). Returns the new definitions, or `None`
/// for invalid or no-op drops.
pub fn reorder_columns(
    columns: &[Column],
    source: &str,
    target: &str,
    position: DropPosition,
) -> Option<Vec<Column>> {
    let path = group_path(columns, source)?;
    if group_path(columns, target)? != path {
        log::debug!(
            "[reorder] columns '{}' and '{}' are in different groups; drop ignored",
            source,
            target
        );
        return None;
    }

    let mut reordered = columns.to_vec();
    let mut group: &mut Vec<Column> = &mut reordered;
    for &index in &path {
        group = &mut group.get_mut(index)?.children;
    }
    *group = move_item(group, |c| c.id.as_str(), source, target, position)?;
    Some(reordered)
}

/// Index path to the group holding column `id` (empty for top level).
fn group_path(columns: &[Column], id: &str) -> Option<Vec<usize>> {
    let mut stack: Vec<(Vec<usize>, &[Column])> = vec![(Vec::new(), columns)];
    while let Some((path, group)) = stack.pop() {
        if group.iter().any(|c| c.id == id) {
            return Some(path);
        }
        for (index, column) in group.iter().enumerate() {
            if column.is_group() {
                let mut child_path = path.clone();
                child_path.push(index);
                stack.push((child_path, &column.children));
            }
        }
    }
    None
}

/// Pinned column ids.
///
/// Independent of column order. Turning pinning on applies the caller's
/// default pin set; turning it off clears the set entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSet {
    pinned: Vec<String>,
    defaults: Vec<String>,
}

impl PinSet {
    /// Create an empty pin set with the given defaults.
    pub fn new(defaults: Vec<String>) -> Self {
        Self {
            pinned: Vec::new(),
            defaults,
        }
    }

    /// Pinned ids, in the order they were pinned.
    pub fn pinned(&self) -> &[String] {
        &self.pinned
    }

    /// The default pin set.
    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// Whether any column is pinned.
    pub fn has_pinned(&self) -> bool {
        !self.pinned.is_empty()
    }

    /// Whether `id` is pinned.
    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|p| p == id)
    }

    /// Turn pinning on (default set) or off (cleared). Returns `has_pinned`.
    pub fn set_pinning(&mut self, on: bool) -> bool {
        if on {
            self.pinned = self.defaults.clone();
        } else {
            self.pinned.clear();
        }
        self.has_pinned()
    }

    /// Flip between the default set and nothing. Returns `has_pinned`.
    pub fn toggle_pinning(&mut self) -> bool {
        let on = !self.has_pinned();
        self.set_pinning(on)
    }

    /// Pin or unpin one column. Returns whether it is now pinned.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(index) = self.pinned.iter().position(|p| p == id) {
            self.pinned.remove(index);
            false
        } else {
            self.pinned.push(id.to_string());
            true
        }
    }

    /// Drop pins for columns that no longer exist.
    pub fn retain_known<S: AsRef<str>>(&mut self, known: &[S]) {
        self.pinned
            .retain(|id| known.iter().any(|k| k.as_ref() == id.as_str()));
    }
}

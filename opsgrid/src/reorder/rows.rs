//! Row reordering and persistence hand-off.

use async_trait::async_trait;

use crate::error::{GridError, PersistError, Result};
use crate::row::Row;

use super::columns::move_item;
use super::drag::DropPosition;

/// Persists a new row order.
///
/// Supplied by the caller; typically a REST call. The grid never retries.
#[async_trait]
pub trait RowOrderPersister: Send + Sync {
    /// Store `rows` as the new order.
    async fn persist(&self, rows: &[Row]) -> std::result::Result<(), PersistError>;
}

/// Move `source` next to `target` within their sibling group.
///
/// Works at any depth, but both rows must share a parent; dropping a row
/// into another group is rejected. Returns `None` for invalid or no-op
/// drops.
pub fn reorder_rows(
    rows: &[Row],
    source: &str,
    target: &str,
    position: DropPosition,
) -> Option<Vec<Row>> {
    let path = sibling_path(rows, source)?;
    if sibling_path(rows, target)? != path {
        log::debug!(
            "[reorder] '{}' and '{}' have different parents; drop ignored",
            source,
            target
        );
        return None;
    }

    let mut reordered = rows.to_vec();
    let mut group: &mut Vec<Row> = &mut reordered;
    for &index in &path {
        group = group.get_mut(index)?.children.as_mut()?;
    }
    *group = move_item(group, |row| row.id.as_str(), source, target, position)?;
    Some(reordered)
}

/// Index path to the parent of `id` (empty for top-level rows).
fn sibling_path(rows: &[Row], id: &str) -> Option<Vec<usize>> {
    let mut stack: Vec<(Vec<usize>, &[Row])> = vec![(Vec::new(), rows)];
    while let Some((path, group)) = stack.pop() {
        if group.iter().any(|row| row.id == id) {
            return Some(path);
        }
        for (index, row) in group.iter().enumerate() {
            if row.has_children() {
                let mut child_path = path.clone();
                child_path.push(index);
                stack.push((child_path, row.children()));
            }
        }
    }
    None
}

/// An optimistic row reorder awaiting persistence.
///
/// The grid shows `next` right away. If persisting fails, the caller gets
/// `previous` back inside [`GridError::Persist`] and must restore it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowReorder {
    /// Order before the drag.
    pub previous: Vec<Row>,
    /// Order after the drop.
    pub next: Vec<Row>,
}

impl RowReorder {
    /// Hand the new order to `persister`.
    ///
    /// Resolves to the new order on success.
    pub async fn persist<P>(self, persister: &P) -> Result<Vec<Row>>
    where
        P: RowOrderPersister + ?Sized,
    {
        match persister.persist(&self.next).await {
            Ok(()) => Ok(self.next),
            Err(e) => {
                log::warn!("[reorder] persisting row order failed: {}", e);
                Err(GridError::Persist {
                    message: e.to_string(),
                    restore: self.previous,
                })
            }
        }
    }
}

//! Hierarchy flattening.
//!
//! Turns a row tree into the ordered list of visible rows. The walk is a
//! depth-first pre-order traversal driven by an explicit work stack, so tree
//! depth is bounded by memory rather than the call stack.

use crate::row::{FlatRow, Row};
use crate::state::{ExpandMap, SortConfig, effective_expand};

/// Flatten a row tree into its visible rows.
///
/// A row's subtree is emitted right after it when the row is effectively
/// expanded and has children; otherwise the subtree is skipped. Pure: the
/// same `(rows, expand)` always yields the same sequence.
pub fn flatten<'a>(rows: &'a [Row], expand: &ExpandMap) -> Vec<FlatRow<'a>> {
    flatten_sorted(rows, expand, None)
}

/// Flatten a row tree, sorting every sibling group first.
///
/// Sorting never moves a row out of its parent: children stay directly
/// under their parent, ordered among themselves.
pub fn flatten_sorted<'a>(
    rows: &'a [Row],
    expand: &ExpandMap,
    sort: Option<&SortConfig>,
) -> Vec<FlatRow<'a>> {
    let sort = sort.filter(|s| s.is_active());
    let mut out = Vec::with_capacity(rows.len());
    let mut stack: Vec<(&'a Row, usize)> = Vec::with_capacity(rows.len());
    push_siblings(&mut stack, rows, 0, sort);

    while let Some((row, depth)) = stack.pop() {
        let has_children = row.has_children();
        let is_expanded = has_children && effective_expand(expand, &row.id);
        out.push(FlatRow {
            row,
            display_level: depth,
            original_index: out.len(),
            has_children,
            is_expanded,
        });
        if is_expanded {
            push_siblings(&mut stack, row.children(), depth + 1, sort);
        }
    }

    out
}

/// Flatten non-hierarchical data.
///
/// A pass-through: every row is emitted at level 0 and `children` is never
/// looked at.
pub fn flatten_flat<'a>(rows: &'a [Row], sort: Option<&SortConfig>) -> Vec<FlatRow<'a>> {
    let mut ordered: Vec<&'a Row> = rows.iter().collect();
    if let Some(sort) = sort.filter(|s| s.is_active()) {
        ordered.sort_by(|a, b| sort.compare(a, b));
    }
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, row)| FlatRow {
            row,
            display_level: 0,
            original_index: i,
            has_children: false,
            is_expanded: false,
        })
        .collect()
}

/// Push siblings so they pop in display order.
fn push_siblings<'a>(
    stack: &mut Vec<(&'a Row, usize)>,
    siblings: &'a [Row],
    depth: usize,
    sort: Option<&SortConfig>,
) {
    match sort {
        Some(sort) => {
            let mut ordered: Vec<&'a Row> = siblings.iter().collect();
            ordered.sort_by(|a, b| sort.compare(a, b));
            stack.extend(ordered.into_iter().rev().map(|row| (row, depth)));
        }
        None => stack.extend(siblings.iter().rev().map(|row| (row, depth))),
    }
}

/// IDs of flattened rows, in order.
pub fn visible_ids<'a>(flat: &[FlatRow<'a>]) -> Vec<&'a str> {
    flat.iter().map(|f| f.row.id.as_str()).collect()
}

/// Find a row anywhere in the tree, including collapsed subtrees.
pub fn find<'a>(rows: &'a [Row], id: &str) -> Option<&'a Row> {
    let mut stack: Vec<&'a Row> = rows.iter().collect();
    while let Some(row) = stack.pop() {
        if row.id == id {
            return Some(row);
        }
        stack.extend(row.children());
    }
    None
}

/// Total number of rows in the tree, collapsed or not.
pub fn count(rows: &[Row]) -> usize {
    let mut total = 0;
    let mut stack: Vec<&Row> = rows.iter().collect();
    while let Some(row) = stack.pop() {
        total += 1;
        stack.extend(row.children());
    }
    total
}

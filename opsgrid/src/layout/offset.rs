//! Pinned-column offsets.

use std::collections::HashMap;

use crate::column::RenderColumn;

use super::measure::{FallbackWidths, MeasurementProvider, effective_width};

/// Sticky geometry of a pinned column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedOffset {
    /// Left offset: the summed widths of the pinned columns before it.
    pub left: f32,
    /// Whether this is the right-most pinned column (draws the boundary edge).
    pub is_last_pinned: bool,
}

/// Pinned columns in render order.
///
/// The selection column is pinned in front whenever at least one data
/// column is pinned, so pinned data columns never slide under it.
pub fn pinned_order<'a, S: AsRef<str>>(render: &[RenderColumn<'a>], pinned: &[S]) -> Vec<&'a str> {
    let is_pinned = |id: &str| pinned.iter().any(|p| p.as_ref() == id);
    let data: Vec<&'a str> = render
        .iter()
        .filter(|c| !c.is_checkbox() && is_pinned(c.id()))
        .map(|c| c.id())
        .collect();
    if data.is_empty() {
        return data;
    }

    let mut order = Vec::with_capacity(data.len() + 1);
    if let Some(checkbox) = render.iter().find(|c| c.is_checkbox()) {
        order.push(checkbox.id());
    }
    order.extend(data);
    order
}

/// Offset of one pinned column.
///
/// Returns `None` when `column_id` is not in `pinned_order`.
pub fn compute_offset<S: AsRef<str>>(
    column_id: &str,
    pinned_order: &[S],
    measured: &dyn MeasurementProvider,
    fallback: &FallbackWidths,
) -> Option<PinnedOffset> {
    let position = pinned_order.iter().position(|id| id.as_ref() == column_id)?;
    let left = pinned_order[..position]
        .iter()
        .map(|id| effective_width(id.as_ref(), measured, fallback))
        .sum();
    Some(PinnedOffset {
        left,
        is_last_pinned: position + 1 == pinned_order.len(),
    })
}

/// Offsets of every pinned column, computed in one pass.
pub fn compute_offsets<S: AsRef<str>>(
    pinned_order: &[S],
    measured: &dyn MeasurementProvider,
    fallback: &FallbackWidths,
) -> HashMap<String, PinnedOffset> {
    let mut offsets = HashMap::with_capacity(pinned_order.len());
    let mut left = 0.0;
    for (i, id) in pinned_order.iter().enumerate() {
        let id = id.as_ref();
        offsets.insert(
            id.to_string(),
            PinnedOffset {
                left,
                is_last_pinned: i + 1 == pinned_order.len(),
            },
        );
        left += effective_width(id, measured, fallback);
    }
    offsets
}

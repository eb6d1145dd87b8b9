//! Virtualized render windows.
//!
//! Only cells inside the scrolled viewport are rendered. [`VirtualGrid`]
//! covers fixed-size cells wrapped into as many columns as fit the
//! container; [`RowWindow`] covers the grid body's fixed-height rows.

use std::ops::Range;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce::Debouncer;

/// Measured container size, post-layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the container has been laid out with a usable size.
    ///
    /// Hidden and not-yet-laid-out containers report zero (or NaN).
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Scroll position of the container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

impl ScrollOffset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size cells laid out in a wrapping grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualGrid {
    /// Width of one cell.
    pub cell_width: f32,
    /// Height of one cell.
    pub cell_height: f32,
    /// Number of items to lay out.
    pub item_count: usize,
    /// Extra rows/columns rendered on each side of the viewport.
    pub overscan: usize,
}

/// Visible part of a [`VirtualGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualRange {
    /// Columns the container fits.
    pub column_count: usize,
    /// Rows needed for every item.
    pub row_count: usize,
    /// Row indices to render.
    pub rows: Range<usize>,
    /// Column indices to render.
    pub columns: Range<usize>,
    item_count: usize,
}

impl VirtualRange {
    /// Item indices inside the window, row by row.
    ///
    /// The last row may be partially filled; indices past the item count are
    /// skipped.
    pub fn item_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.clone().flat_map(move |row| {
            self.columns
                .clone()
                .map(move |column| row * self.column_count + column)
                .filter(move |index| *index < self.item_count)
        })
    }

    /// Grid position `(row, column)` of an item.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        (index / self.column_count, index % self.column_count)
    }
}

impl VirtualGrid {
    /// Create a grid of `item_count` cells sized `cell_width` x `cell_height`.
    pub fn new(cell_width: f32, cell_height: f32, item_count: usize) -> Self {
        Self {
            cell_width,
            cell_height,
            item_count,
            overscan: 0,
        }
    }

    /// Set the overscan.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Visible window for a container and scroll position.
    ///
    /// Returns `None` when the container is not laid out (width or height
    /// ≤ 0), so nothing is instantiated for hidden containers.
    pub fn window(&self, container: ContainerSize, scroll: ScrollOffset) -> Option<VirtualRange> {
        if !container.is_laid_out() {
            return None;
        }
        if !(self.cell_width > 0.0 && self.cell_height > 0.0) {
            log::warn!(
                "[virtual] invalid cell size {}x{}",
                self.cell_width,
                self.cell_height
            );
            return None;
        }

        let column_count = ((container.width / self.cell_width).floor() as usize).max(1);
        let row_count = self.item_count.div_ceil(column_count);

        let rows = axis_range(
            scroll.y,
            container.height,
            self.cell_height,
            row_count,
            self.overscan,
        );
        // A row never holds more columns than there are items.
        let columns = axis_range(
            scroll.x,
            container.width,
            self.cell_width,
            column_count.min(self.item_count),
            self.overscan,
        );

        Some(VirtualRange {
            column_count,
            row_count,
            rows,
            columns,
            item_count: self.item_count,
        })
    }

    /// Full content size for a container: `(width, height)`.
    pub fn content_size(&self, container: ContainerSize) -> Option<(f32, f32)> {
        let range = self.window(container, ScrollOffset::default())?;
        Some((
            range.column_count as f32 * self.cell_width,
            range.row_count as f32 * self.cell_height,
        ))
    }
}

/// Indices along one axis overlapping `[offset, offset + extent)`.
fn axis_range(offset: f32, extent: f32, cell: f32, count: usize, overscan: usize) -> Range<usize> {
    let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
    let first = (offset / cell).floor() as usize;
    let last = ((offset + extent) / cell).ceil() as usize;
    let start = first.saturating_sub(overscan).min(count);
    let end = last.saturating_add(overscan).min(count);
    start..end.max(start)
}

/// Vertical virtualization of fixed-height grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowWindow {
    /// Height of every row.
    pub row_height: f32,
    /// Height of the scrolling viewport.
    pub viewport_height: f32,
    /// Extra rows rendered beyond the viewport.
    #[serde(default = "default_overscan")]
    pub overscan: usize,
}

fn default_overscan() -> usize {
    1
}

impl RowWindow {
    /// Create a row window.
    pub fn new(row_height: f32, viewport_height: f32) -> Self {
        Self {
            row_height,
            viewport_height,
            overscan: default_overscan(),
        }
    }

    /// Set the overscan.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Row indices to render for `row_count` rows scrolled by `scroll_offset`.
    pub fn visible_range(&self, row_count: usize, scroll_offset: f32) -> Range<usize> {
        if row_count == 0 || self.viewport_height <= 0.0 || self.row_height <= 0.0 {
            return 0..0;
        }
        let scroll_offset = scroll_offset.clamp(0.0, self.max_scroll(row_count));
        axis_range(
            scroll_offset,
            self.viewport_height,
            self.row_height,
            row_count,
            self.overscan,
        )
    }

    /// Total content height.
    pub fn total_height(&self, row_count: usize) -> f32 {
        row_count as f32 * self.row_height
    }

    /// Largest useful scroll offset.
    pub fn max_scroll(&self, row_count: usize) -> f32 {
        (self.total_height(row_count) - self.viewport_height).max(0.0)
    }

    /// Rows that fit in the viewport.
    pub fn viewport_row_count(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.viewport_height / self.row_height).floor() as usize
    }
}

/// Debounced container size.
///
/// Resize notifications arrive in bursts; only the last size within the
/// debounce delay is kept.
#[derive(Debug)]
pub struct ResizeTracker {
    size: Arc<RwLock<Option<ContainerSize>>>,
    debouncer: Debouncer,
}

impl ResizeTracker {
    /// Create a tracker with the given debounce delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            size: Arc::new(RwLock::new(None)),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Report a new container size; applied after the debounce delay.
    pub fn observe(&mut self, size: ContainerSize) -> u64 {
        let slot = Arc::clone(&self.size);
        self.debouncer.trigger(move |generation| {
            if let Ok(mut guard) = slot.write() {
                log::trace!(
                    "[virtual] container {}x{} (generation {})",
                    size.width,
                    size.height,
                    generation
                );
                *guard = Some(size);
            }
        })
    }

    /// Apply a size immediately (first layout).
    pub fn set_now(&mut self, size: ContainerSize) {
        self.debouncer.cancel();
        if let Ok(mut guard) = self.size.write() {
            *guard = Some(size);
        }
    }

    /// Last applied size, `None` before the first measurement.
    pub fn size(&self) -> Option<ContainerSize> {
        self.size.read().ok().and_then(|g| *g)
    }

    /// Whether a resize is waiting for the debounce delay.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Window of `grid` for the last applied size.
    pub fn window(&self, grid: &VirtualGrid, scroll: ScrollOffset) -> Option<VirtualRange> {
        grid.window(self.size()?, scroll)
    }
}

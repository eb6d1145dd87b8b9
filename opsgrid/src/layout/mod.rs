//! Layout offset tracking for pinned columns.
//!
//! Pinned columns stick to the left edge while the grid scrolls
//! horizontally. Each one sits at the summed width of the pinned columns
//! before it, and those widths come from the host layout after paint. The
//! pieces:
//!
//! - [`MeasurementProvider`] - injected source of rendered widths
//! - [`WidthRegistry`] - provider fed by header cells reporting their width
//! - [`FallbackWidths`] - widths used until a measurement lands
//! - [`compute_offset`] / [`compute_offsets`] - pure offset math
//! - [`MeasureScheduler`] - settle-delayed, last-wins re-measurement

mod measure;
mod offset;
mod scheduler;

pub use measure::{FallbackWidths, MeasurementProvider, WidthRegistry, effective_width};
pub use offset::{PinnedOffset, compute_offset, compute_offsets, pinned_order};
pub use scheduler::MeasureScheduler;

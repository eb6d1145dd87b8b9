//! Drag-reorder for columns and rows.
//!
//! Both use the same reinsertion rule ([`move_item`]): remove the dragged
//! item and put it back directly before or after the drop target. Pinning is
//! kept apart from ordering in [`PinSet`]. Row persistence is the caller's
//! job through [`RowOrderPersister`].

mod columns;
mod drag;
mod rows;

pub use columns::{PinSet, move_item, reorder_columns};
pub use drag::{DragController, DragHandleProps, DragState, DropPosition, DropTarget};
pub use rows::{RowOrderPersister, RowReorder, reorder_rows};

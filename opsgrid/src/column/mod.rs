//! Column model - declared columns, group splicing and render order.
//!
//! Pages declare columns as a tree: group columns hold children and are
//! never drawn themselves. [`resolve`] turns that tree into the flat list
//! the grid draws, and [`render_order`] adds the synthetic selection column
//! in front when rows are checkable.
//!
//! # Example
//!
//! ```
//! use opsgrid::column::{self, Column, ColumnType, RenderColumn};
//!
//! let columns = vec![
//!     Column::new("name", "Name", ColumnType::Text),
//!     Column::group("limits", "Limits", vec![
//!         Column::new("limits.min", "Min", ColumnType::Currency),
//!         Column::new("limits.max", "Max", ColumnType::Currency),
//!     ]),
//! ];
//!
//! let flat = column::resolve(&columns);
//! let order = column::render_order(&flat, true);
//! assert!(matches!(order[0], RenderColumn::Checkbox));
//! assert_eq!(order[2].id(), "limits.min");
//! ```

mod item;
mod resolve;

pub use item::{Alignment, Column, ColumnType, DEFAULT_COLUMN_WIDTH};
pub use resolve::{CHECKBOX_COLUMN_ID, RenderColumn, find, render_order, resolve};

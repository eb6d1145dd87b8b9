//! Data-grid engine.
//!
//! Turns an arbitrary column schema plus a flat or tree-shaped row dataset
//! into a paginated, sortable, column-pinned, drag-reorderable and
//! optionally virtualized table. Selection, hierarchy, pagination, pinning
//! and drag-reorder are toggled independently through [`GridConfig`].

pub mod column;
pub mod config;
pub mod debounce;
pub mod error;
pub mod grid;
pub mod hierarchy;
pub mod layout;
pub mod pagination;
pub mod reorder;
pub mod state;
pub mod value;
pub mod virtual_window;

mod row;

pub use column::{Alignment, Column, ColumnType};
pub use config::GridConfig;
pub use error::{GridError, PersistError, Result};
pub use grid::{Grid, GridEvent, GridInput, RenderFrame};
pub use pagination::{Pagination, PaginationMode};
pub use row::{Dataset, DatasetWarning, FlatRow, Row};
pub use state::{GridState, SortConfig, SortDirection};

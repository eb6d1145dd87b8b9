//! Render pipeline: the [`Grid`] handle.
//!
//! A page keeps its data and hands `{columns, rows}` to [`Grid::render`] on
//! every render. The grid resolves the columns, flattens and pages the rows,
//! computes pinned geometry and decorates each row with its checked, expand
//! and drag state. Interactions go through the handler methods (or
//! [`Grid::dispatch`]) and come back as [`GridEvent`]s.

mod events;
mod render;
mod state;

pub use events::{GridEvent, GridInput};
pub use render::{
    BodyWindow, CellContent, CheckState, HeaderCell, RenderCell, RenderFrame, RenderRow,
};
pub use state::{Grid, GridId, GridListener};

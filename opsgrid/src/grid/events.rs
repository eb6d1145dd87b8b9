//! Events and input handling for the Grid.

use crate::column::{CHECKBOX_COLUMN_ID, Column};
use crate::layout::effective_width;
use crate::pagination::Pagination;
use crate::reorder::{DropPosition, RowReorder, reorder_columns, reorder_rows};
use crate::row::Row;
use crate::state::SortConfig;

use super::state::Grid;

/// Something the page should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A row's checkbox changed.
    Check { id: String, checked: bool },
    /// The header checkbox set every visible row.
    ToggleAll { checked: bool },
    /// A row was clicked.
    RowClick { id: String },
    /// A row was expanded or collapsed.
    ToggleExpand { id: String, expanded: bool },
    /// The sort changed.
    Sort(SortConfig),
    /// Columns were reordered. Carries the new column definitions.
    ColumnOrderChange(Vec<Column>),
    /// Pinning was switched or a column was (un)pinned.
    ColumnPinToggle { has_pinned: bool },
    /// Rows were reordered. The page should persist `next` and restore
    /// `previous` if that fails.
    RowOrderChange(RowReorder),
    /// A clickable cell was clicked.
    CellClick { column_id: String, row_id: String },
    /// The page changed.
    PageChange(Pagination),
    /// Header widths were re-measured.
    LayoutMeasured { generation: u64 },
}

/// Pointer and keyboard input understood by [`Grid::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridInput {
    /// Header cell click (`x` from the header's left edge).
    HeaderClick { x: f32 },
    /// Header checkbox clicked.
    HeaderCheckbox,
    /// Row checkbox clicked.
    RowCheckbox { id: String },
    /// Row body clicked.
    RowClick { id: String },
    /// Cell clicked.
    CellClick { column_id: String, row_id: String },
    /// Expand toggle clicked.
    ExpandToggle { id: String },
    /// Pointer pressed on a header cell's drag handle.
    ColumnDragStart { x: f32 },
    /// Pointer moved over the header while dragging a column.
    ColumnDragMove { x: f32 },
    /// Pointer released over the header.
    ColumnDrop,
    /// Pointer pressed on a row's drag handle.
    RowDragStart { id: String },
    /// Pointer moved over a row while dragging. `offset` is the pointer's
    /// distance from the row's top edge.
    RowDragOver { id: String, offset: f32, height: f32 },
    /// Pointer released over the body.
    RowDrop,
    /// Escape, or the pointer left the document.
    DragCancel,
    /// Pin toggle in the toolbar.
    PinToggle,
    /// Pin toggle on one column's header.
    ColumnPin { column_id: String },
    /// Pager navigation.
    NextPage,
    PrevPage,
    GoToPage(usize),
    /// Body scrolled.
    Scroll { offset: f32 },
}

impl Grid {
    /// Handle one input.
    ///
    /// `columns` and `rows` are the definitions of the current render; row
    /// drops reorder them. Returns the events produced, in order.
    pub fn dispatch(&self, input: GridInput, columns: &[Column], rows: &[Row]) -> Vec<GridEvent> {
        log::trace!("[grid] {} input {:?}", self.id(), input);
        let event = match input {
            GridInput::HeaderClick { x } => self.on_header_click(x),
            GridInput::HeaderCheckbox => {
                let next = !self.all_checked();
                self.toggle_all(next)
            }
            GridInput::RowCheckbox { id } => self.toggle_check(&id),
            GridInput::RowClick { id } => Some(self.row_click(&id)),
            GridInput::CellClick { column_id, row_id } => self.cell_click(&column_id, &row_id),
            GridInput::ExpandToggle { id } => self.toggle_expand(&id),
            GridInput::ColumnDragStart { x } => {
                if let Some(id) = self.column_at(x) {
                    self.column_drag_start(&id);
                }
                None
            }
            GridInput::ColumnDragMove { x } => {
                self.column_drag_move(x);
                None
            }
            GridInput::ColumnDrop => self.column_drop(columns),
            GridInput::RowDragStart { id } => {
                self.row_drag_start(&id);
                None
            }
            GridInput::RowDragOver { id, offset, height } => {
                self.row_drag_over(&id, DropPosition::from_pointer(offset, 0.0, height));
                None
            }
            GridInput::RowDrop => self.row_drop(rows).map(GridEvent::RowOrderChange),
            GridInput::DragCancel => {
                self.drag_cancel();
                None
            }
            GridInput::PinToggle => {
                let on = self.pinned().is_empty();
                self.set_pinning(on)
            }
            GridInput::ColumnPin { column_id } => self.toggle_column_pin(&column_id),
            GridInput::NextPage => self.next_page(),
            GridInput::PrevPage => self.prev_page(),
            GridInput::GoToPage(page) => self.set_page(page),
            GridInput::Scroll { offset } => {
                self.set_scroll_offset(offset);
                None
            }
        };
        event.into_iter().collect()
    }

    // -------------------------------------------------------------------------
    // Hit testing
    // -------------------------------------------------------------------------

    /// Header spans of the last render: `(column_id, left, width)`.
    fn column_spans(&self) -> Vec<(String, f32, f32)> {
        let widths = self.scheduler.lock().map(|s| s.widths()).unwrap_or_default();
        let Ok(guard) = self.inner.read() else {
            return Vec::new();
        };
        let mut left = 0.0;
        guard
            .column_ids
            .iter()
            .map(|id| {
                let width = effective_width(id, &widths, &guard.config.fallback_widths);
                let span = (id.clone(), left, width);
                left += width;
                span
            })
            .collect()
    }

    /// Column under header position `x`.
    pub fn column_at(&self, x: f32) -> Option<String> {
        self.column_spans()
            .into_iter()
            .find(|(_, left, width)| x >= *left && x < left + width)
            .map(|(id, _, _)| id)
    }

    fn on_header_click(&self, x: f32) -> Option<GridEvent> {
        let id = self.column_at(x)?;
        if id == CHECKBOX_COLUMN_ID {
            let next = !self.all_checked();
            return self.toggle_all(next);
        }
        self.toggle_sort(&id)
    }

    // -------------------------------------------------------------------------
    // Column drag
    // -------------------------------------------------------------------------

    /// Start dragging a column. The checkbox column never moves.
    pub fn column_drag_start(&self, column_id: &str) -> bool {
        if column_id == CHECKBOX_COLUMN_ID {
            return false;
        }
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if !guard.config.column_drag || guard.find_column(column_id).is_none() {
            return false;
        }
        let started = guard.column_drag.start(column_id);
        if started {
            self.mark_dirty();
        }
        started
    }

    /// Hover a column while dragging.
    pub fn column_drag_over(&self, column_id: &str, position: DropPosition) {
        if let Ok(mut guard) = self.inner.write()
            && guard.column_drag.is_dragging()
        {
            if column_id == CHECKBOX_COLUMN_ID || guard.find_column(column_id).is_none() {
                guard.column_drag.leave();
            } else {
                guard.column_drag.hover(column_id, position);
            }
            self.mark_dirty();
        }
    }

    /// Hover whatever column is under header position `x`.
    pub fn column_drag_move(&self, x: f32) {
        let target = self
            .column_spans()
            .into_iter()
            .find(|(_, left, width)| x >= *left && x < left + width);
        match target {
            Some((id, left, width)) => {
                self.column_drag_over(&id, DropPosition::from_pointer(x, left, width))
            }
            None => {
                if let Ok(mut guard) = self.inner.write() {
                    guard.column_drag.leave();
                }
            }
        }
    }

    /// Drop the dragged column.
    ///
    /// `columns` are the current definitions; groups are kept, and the move
    /// applies within the sibling list holding both columns.
    pub fn column_drop(&self, columns: &[Column]) -> Option<GridEvent> {
        let target = self.inner.write().ok()?.column_drag.drop()?;
        self.mark_dirty();
        let reordered = reorder_columns(
            columns,
            &target.source_id,
            &target.target_id,
            target.position,
        )?;
        log::debug!(
            "[grid] {} column '{}' dropped {:?} '{}'",
            self.id(),
            target.source_id,
            target.position,
            target.target_id
        );
        self.remeasure();
        let event = GridEvent::ColumnOrderChange(reordered);
        self.emit(&event);
        Some(event)
    }

    // -------------------------------------------------------------------------
    // Row drag
    // -------------------------------------------------------------------------

    /// Start dragging a row.
    pub fn row_drag_start(&self, row_id: &str) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if !guard.config.row_drag {
            return false;
        }
        let started = guard.row_drag.start(row_id);
        if started {
            self.mark_dirty();
        }
        started
    }

    /// Hover a row while dragging.
    pub fn row_drag_over(&self, row_id: &str, position: DropPosition) {
        if let Ok(mut guard) = self.inner.write()
            && guard.row_drag.is_dragging()
        {
            guard.row_drag.hover(row_id, position);
            self.mark_dirty();
        }
    }

    /// Drop the dragged row into `rows`.
    ///
    /// Returns the optimistic reorder; the page shows `next` and persists it.
    pub fn row_drop(&self, rows: &[Row]) -> Option<RowReorder> {
        let target = self.inner.write().ok()?.row_drag.drop()?;
        self.mark_dirty();
        let next = reorder_rows(rows, &target.source_id, &target.target_id, target.position)?;
        let reorder = RowReorder {
            previous: rows.to_vec(),
            next,
        };
        self.emit(&GridEvent::RowOrderChange(reorder.clone()));
        Some(reorder)
    }

    /// Abandon any drag in flight.
    pub fn drag_cancel(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.column_drag.cancel();
            guard.row_drag.cancel();
            self.mark_dirty();
        }
    }

    /// Whether a column or row drag is in flight.
    pub fn is_dragging(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.column_drag.is_dragging() || g.row_drag.is_dragging())
            .unwrap_or(false)
    }
}

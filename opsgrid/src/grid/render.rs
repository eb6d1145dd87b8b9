//! Grid rendering.
//!
//! [`Grid::render`] turns `{columns, rows}` plus the grid's own state into a
//! [`RenderFrame`]: header cells with their sticky geometry, and the current
//! page of rows with per-cell content. The frame is plain data; drawing it is
//! the host's job.

use std::ops::Range;

use serde_json::Value;

use crate::column::{
    Alignment, CHECKBOX_COLUMN_ID, Column, ColumnType, RenderColumn, render_order, resolve,
};
use crate::hierarchy::{flatten, flatten_flat, flatten_sorted};
use crate::layout::{PinnedOffset, compute_offsets, effective_width, pinned_order};
use crate::pagination::{PageInfo, PaginationMode, paginate};
use crate::reorder::{DragHandleProps, DropPosition};
use crate::row::{FlatRow, Row};
use crate::state::SortDirection;
use crate::value;

use super::state::Grid;

/// Tri-state of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    /// Some, but not all, visible rows are checked.
    Indeterminate,
    Checked,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column_id: String,
    pub header: String,
    /// `None` for the synthetic checkbox column.
    pub column_type: Option<ColumnType>,
    pub align: Alignment,
    /// Left edge within the header row.
    pub left: f32,
    /// Measured width, or the fallback before measurement.
    pub width: f32,
    pub sortable: bool,
    /// Active sort direction on this column.
    pub sort: Option<SortDirection>,
    pub pinnable: bool,
    /// Sticky geometry when pinned.
    pub pinned: Option<PinnedOffset>,
    pub draggable: bool,
    /// This column is being dragged.
    pub dragging: bool,
    /// Drop indicator while another column hovers this one.
    pub drop_indicator: Option<DropPosition>,
    /// Header checkbox state (checkbox column only).
    pub checkbox: Option<CheckState>,
}

/// Content of one body cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Missing or null field.
    Empty,
    Number(f64),
    Text(String),
    Chip(String),
    Currency { amount: f64, text: String },
    DateTime(String),
    Multiline(Vec<String>),
    /// Indented tree cell; `toggle` is the expand state of rows with
    /// children.
    Hierarchical {
        text: String,
        level: usize,
        toggle: Option<bool>,
    },
    Button { label: String },
    Checkbox(bool),
}

impl CellContent {
    /// Plain-text form of the cell.
    pub fn text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) | Self::Chip(s) | Self::DateTime(s) => s.clone(),
            Self::Currency { text, .. } => text.clone(),
            Self::Multiline(lines) => lines.join(" / "),
            Self::Hierarchical {
                text,
                level,
                toggle,
            } => {
                let marker = match toggle {
                    Some(true) => "▾ ",
                    Some(false) => "▸ ",
                    None => "  ",
                };
                format!("{}{}{}", "  ".repeat(*level), marker, text)
            }
            Self::Button { label } => format!("[{label}]"),
            Self::Checkbox(true) => "[x]".into(),
            Self::Checkbox(false) => "[ ]".into(),
        }
    }
}

/// One body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCell {
    pub column_id: String,
    pub content: CellContent,
    pub align: Alignment,
    pub pinned: Option<PinnedOffset>,
    pub clickable: bool,
}

/// One body row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    pub id: String,
    pub level: usize,
    /// Position in the flattened list (before pagination).
    pub original_index: usize,
    pub has_children: bool,
    /// Expand state; `None` for leaves.
    pub expanded: Option<bool>,
    pub checked: bool,
    pub drag: DragHandleProps,
    pub cells: Vec<RenderCell>,
}

/// Vertical window of a virtualized body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyWindow {
    /// Indices into the page that were rendered.
    pub range: Range<usize>,
    /// Spacer above the first rendered row.
    pub offset_top: f32,
    /// Height of the whole page.
    pub total_height: f32,
}

/// Everything needed to draw one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub grid_id: String,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RenderRow>,
    pub page: PageInfo,
    /// Every row on the page is checked (false for an empty page).
    pub all_checked: bool,
    pub has_pinned: bool,
    /// Set when body virtualization is configured.
    pub body: Option<BodyWindow>,
}

impl RenderFrame {
    /// Header cell under position `x`.
    pub fn header_at(&self, x: f32) -> Option<&HeaderCell> {
        self.header
            .iter()
            .find(|cell| x >= cell.left && x < cell.left + cell.width)
    }

    /// Total header width.
    pub fn total_width(&self) -> f32 {
        self.header.iter().map(|cell| cell.width).sum()
    }
}

impl Grid {
    /// Render `columns` and `rows` with the grid's current state.
    ///
    /// Call on every render with the page's current data. A change in the
    /// resolved column set schedules a header re-measurement.
    pub fn render(&self, columns: &[Column], rows: &[Row]) -> RenderFrame {
        let widths = self
            .scheduler
            .lock()
            .map(|s| s.widths())
            .unwrap_or_default();

        let flat_columns = resolve(columns);
        let Ok(mut guard) = self.inner.write() else {
            log::warn!("[grid] {} state lock poisoned; rendering nothing", self.id());
            return RenderFrame {
                grid_id: self.id_string(),
                header: Vec::new(),
                rows: Vec::new(),
                page: PageInfo::default(),
                all_checked: false,
                has_pinned: false,
                body: None,
            };
        };
        let inner = &mut *guard;
        let config = &inner.config;

        let render_columns = render_order(&flat_columns, config.checkable);
        let column_ids: Vec<String> = render_columns
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        let columns_changed = inner.column_ids != column_ids;
        inner.columns = flat_columns.iter().map(|c| (*c).clone()).collect();
        if columns_changed {
            inner.column_ids = column_ids.clone();
        }

        // Rows
        let (flat, total) = match config.pagination {
            PaginationMode::Server { total_count } => {
                let flat = if config.hierarchical {
                    flatten(rows, &inner.state.expand)
                } else {
                    flatten_flat(rows, None)
                };
                (flat, total_count)
            }
            PaginationMode::Client => {
                let flat = if config.hierarchical {
                    flatten_sorted(rows, &inner.state.expand, Some(&inner.state.sort))
                } else {
                    flatten_flat(rows, Some(&inner.state.sort))
                };
                let total = flat.len();
                (flat, total)
            }
        };
        let page_rows: &[FlatRow<'_>] = match config.pagination {
            PaginationMode::Server { .. } => flat.as_slice(),
            PaginationMode::Client => {
                paginate(&flat, inner.pagination.page, inner.pagination.page_size)
            }
        };
        let page = PageInfo::new(inner.pagination, total);

        let (rendered, body) = match config.row_window {
            Some(window) => {
                let range = window.visible_range(page_rows.len(), inner.scroll_offset);
                let body = BodyWindow {
                    offset_top: range.start as f32 * window.row_height,
                    total_height: window.total_height(page_rows.len()),
                    range: range.clone(),
                };
                (&page_rows[range], Some(body))
            }
            None => (page_rows, None),
        };

        inner.visible_ids = page_rows.iter().map(|r| r.id().to_string()).collect();
        let all_checked = inner.state.all_checked(&inner.visible_ids);
        let some_checked = inner.state.checked.some_checked(&inner.visible_ids);

        // Geometry
        let fallback = &config.fallback_widths;
        let pinned = pinned_order(&render_columns, inner.pins.pinned());
        let offsets = compute_offsets(&pinned, &widths, fallback);

        let header_check = match (all_checked, some_checked) {
            (true, _) => CheckState::Checked,
            (false, true) => CheckState::Indeterminate,
            (false, false) => CheckState::Unchecked,
        };
        let mut left = 0.0;
        let header: Vec<HeaderCell> = render_columns
            .iter()
            .map(|render_column| {
                let id = render_column.id();
                let width = effective_width(id, &widths, fallback);
                let cell = header_cell(render_column, left, width);
                left += width;
                HeaderCell {
                    pinned: offsets.get(id).copied(),
                    sort: inner.state.sort.direction_for(id),
                    draggable: config.column_drag && !render_column.is_checkbox(),
                    dragging: inner.column_drag.dragged_id() == Some(id),
                    drop_indicator: inner
                        .column_drag
                        .drag_over()
                        .filter(|(over, _)| *over == id)
                        .map(|(_, position)| position),
                    checkbox: render_column.is_checkbox().then_some(header_check),
                    ..cell
                }
            })
            .collect();

        let mut missing: Vec<&str> = Vec::new();
        let body_rows: Vec<RenderRow> = rendered
            .iter()
            .map(|flat_row| {
                let checked = inner.state.checked.is_checked(flat_row.id());
                let cells = render_columns
                    .iter()
                    .map(|render_column| {
                        let content = match render_column {
                            RenderColumn::Checkbox => CellContent::Checkbox(checked),
                            RenderColumn::Data(column) => {
                                if column.column_type != ColumnType::Button
                                    && flat_row.row.get(&column.id).is_none()
                                    && !missing.contains(&column.id.as_str())
                                {
                                    missing.push(&column.id);
                                }
                                cell_content(column, flat_row)
                            }
                        };
                        let column = render_column.column();
                        RenderCell {
                            column_id: render_column.id().to_string(),
                            content,
                            align: column.map(|c| c.align).unwrap_or(Alignment::Center),
                            pinned: offsets.get(render_column.id()).copied(),
                            clickable: column.is_some_and(|c| c.clickable),
                        }
                    })
                    .collect();
                RenderRow {
                    id: flat_row.id().to_string(),
                    level: flat_row.display_level,
                    original_index: flat_row.original_index,
                    has_children: flat_row.has_children,
                    expanded: flat_row.has_children.then_some(flat_row.is_expanded),
                    checked,
                    drag: inner.row_drag.handle_props(flat_row.id(), config.row_drag),
                    cells,
                }
            })
            .collect();

        for column_id in missing {
            if inner.warned_columns.insert(column_id.to_string()) {
                log::warn!(
                    "[grid] {} column '{}' has no value in at least one row",
                    self.id(),
                    column_id
                );
            }
        }

        let has_pinned = inner.pins.has_pinned();
        log::trace!(
            "[grid] {} rendered {} of {} rows, {} columns",
            self.id(),
            body_rows.len(),
            total,
            header.len()
        );
        drop(guard);

        self.clear_dirty();
        if columns_changed {
            self.schedule_measurement(column_ids);
        }

        RenderFrame {
            grid_id: self.id_string(),
            header,
            rows: body_rows,
            page,
            all_checked,
            has_pinned,
            body,
        }
    }
}

fn header_cell(render_column: &RenderColumn<'_>, left: f32, width: f32) -> HeaderCell {
    let column = render_column.column();
    HeaderCell {
        column_id: render_column.id().to_string(),
        header: column.map(|c| c.header.clone()).unwrap_or_default(),
        column_type: column.map(|c| c.column_type),
        align: column.map(|c| c.align).unwrap_or(Alignment::Center),
        left,
        width,
        sortable: column.is_some_and(|c| c.sortable),
        sort: None,
        pinnable: column.is_some_and(|c| c.pinnable),
        pinned: None,
        draggable: false,
        dragging: false,
        drop_indicator: None,
        checkbox: None,
    }
}

/// Cell content for a data column.
fn cell_content(column: &Column, flat_row: &FlatRow<'_>) -> CellContent {
    let field = flat_row.row.get(&column.id);
    let raw = || field.map(value::to_text).unwrap_or_default();

    match column.column_type {
        ColumnType::Button => CellContent::Button {
            label: field
                .filter(|v| !value::is_blank(Some(v)))
                .map(value::to_text)
                .unwrap_or_else(|| column.header.clone()),
        },
        ColumnType::Hierarchical => CellContent::Hierarchical {
            text: raw(),
            level: flat_row.display_level,
            toggle: flat_row.has_children.then_some(flat_row.is_expanded),
        },
        _ if value::is_blank(field) => CellContent::Empty,
        ColumnType::Number => match field.and_then(value::to_number) {
            Some(n) => CellContent::Number(n),
            None => CellContent::Text(raw()),
        },
        ColumnType::Currency => match field.and_then(value::to_number) {
            Some(amount) => CellContent::Currency {
                amount,
                text: value::format_currency(amount),
            },
            None => CellContent::Text(raw()),
        },
        ColumnType::Datetime => {
            CellContent::DateTime(field.map(value::format_datetime).unwrap_or_default())
        }
        ColumnType::Multiline => CellContent::Multiline(match field {
            Some(Value::Array(items)) => items.iter().map(value::to_text).collect(),
            _ => raw().lines().map(str::to_string).collect(),
        }),
        ColumnType::Chip => CellContent::Chip(raw()),
        ColumnType::Checkbox => CellContent::Checkbox(matches!(field, Some(Value::Bool(true)))),
        ColumnType::Text | ColumnType::Group => CellContent::Text(raw()),
    }
}

impl HeaderCell {
    /// Whether this is the synthetic selection column.
    pub fn is_checkbox(&self) -> bool {
        self.column_id == CHECKBOX_COLUMN_ID
    }
}

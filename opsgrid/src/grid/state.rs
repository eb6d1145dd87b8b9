//! Grid handle and its owned state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::column::Column;
use crate::config::GridConfig;
use crate::layout::{MeasureScheduler, MeasurementProvider, WidthRegistry};
use crate::pagination::Pagination;
use crate::reorder::{DragController, DragHandleProps, PinSet};
use crate::row::Row;
use crate::state::{GridState, SortConfig};

use super::events::GridEvent;

/// Unique identifier for a Grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// Callback receiving every event a grid emits.
pub type GridListener = Arc<dyn Fn(&GridEvent) + Send + Sync>;

/// Internal state for the Grid.
#[derive(Debug)]
pub(super) struct GridInner {
    /// Configuration.
    pub config: GridConfig,
    /// Checked, expand and sort state.
    pub state: GridState,
    /// Current page.
    pub pagination: Pagination,
    /// Pinned columns.
    pub pins: PinSet,
    /// Column drag.
    pub column_drag: DragController,
    /// Row drag.
    pub row_drag: DragController,
    /// Resolved columns of the last render, in render order (no checkbox).
    pub columns: Vec<Column>,
    /// Render-order column ids of the last render (checkbox included).
    pub column_ids: Vec<String>,
    /// IDs of the rows on the last rendered page.
    pub visible_ids: Vec<String>,
    /// Columns already warned about for missing fields.
    pub warned_columns: HashSet<String>,
    /// Body scroll offset (row virtualization only).
    pub scroll_offset: f32,
}

impl GridInner {
    fn new(config: GridConfig) -> Self {
        let mut pins = PinSet::new(config.default_pinned.clone());
        if config.pinned_initially {
            pins.set_pinning(true);
        }
        Self {
            pagination: Pagination::new(0, config.page_size),
            config,
            state: GridState::new(),
            pins,
            column_drag: DragController::new(),
            row_drag: DragController::new(),
            columns: Vec::new(),
            column_ids: Vec::new(),
            visible_ids: Vec::new(),
            warned_columns: HashSet::new(),
            scroll_offset: 0.0,
        }
    }

    pub fn find_column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }
}

/// A data grid.
///
/// `Grid` owns the interaction state of one table: checked rows, expanded
/// rows, sort, page, pinned columns and in-flight drags. The page keeps the
/// data and passes `{columns, rows}` to [`render`](Grid::render) on every
/// render; handlers return the [`GridEvent`]s they produce and also forward
/// them to the listener, if one is installed.
///
/// Cloning is cheap: clones share state.
///
/// # Example
///
/// ```
/// use opsgrid::{Column, ColumnType, Grid, GridConfig, Row};
///
/// let columns = vec![Column::new("name", "Name", ColumnType::Text)];
/// let rows = vec![Row::new("1").field("name", "Seoul FC vs Busan")];
///
/// let grid = Grid::new(GridConfig::default().with_checkable(true));
/// let frame = grid.render(&columns, &rows);
/// assert_eq!(frame.rows.len(), 1);
///
/// grid.toggle_check("1");
/// assert!(grid.render(&columns, &rows).all_checked);
/// ```
#[derive(Clone)]
pub struct Grid {
    /// Unique identifier.
    id: GridId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<GridInner>>,
    /// Deferred header measurement.
    pub(super) scheduler: Arc<Mutex<MeasureScheduler>>,
    /// Registry header cells report into (default provider only).
    registry: Option<WidthRegistry>,
    /// Event listener.
    pub(super) listener: Option<GridListener>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create a grid measuring widths through its own [`WidthRegistry`].
    pub fn new(config: GridConfig) -> Self {
        let registry = WidthRegistry::new();
        let mut grid = Self::with_provider(config, Arc::new(registry.clone()));
        grid.registry = Some(registry);
        grid
    }

    /// Create a grid reading widths from `provider`.
    pub fn with_provider(config: GridConfig, provider: Arc<dyn MeasurementProvider>) -> Self {
        let scheduler = MeasureScheduler::new(provider, config.settle_delay);
        Self {
            id: GridId::new(),
            inner: Arc::new(RwLock::new(GridInner::new(config))),
            scheduler: Arc::new(Mutex::new(scheduler)),
            registry: None,
            listener: None,
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Install an event listener.
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&GridEvent) + Send + Sync + 'static,
    {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Seed checked/expand/sort state.
    pub fn with_initial_state(self, state: GridState) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.state = state;
        }
        self
    }

    /// Seed the current page.
    pub fn with_pagination(self, pagination: Pagination) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.pagination = pagination;
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// The grid's configuration.
    pub fn config(&self) -> GridConfig {
        self.inner
            .read()
            .map(|g| g.config.clone())
            .unwrap_or_default()
    }

    pub(super) fn emit(&self, event: &GridEvent) {
        if let Some(listener) = &self.listener {
            listener(event);
        }
    }

    pub(super) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flip a row's checked value.
    pub fn toggle_check(&self, id: &str) -> Option<GridEvent> {
        let checked = {
            let mut guard = self.inner.write().ok()?;
            if !guard.config.checkable {
                return None;
            }
            guard.state.toggle_check(id)
        };
        self.mark_dirty();
        let event = GridEvent::Check {
            id: id.to_string(),
            checked,
        };
        self.emit(&event);
        Some(event)
    }

    /// Set every row on the current page to `checked`.
    ///
    /// Rows outside the last rendered page keep their value. Changing the
    /// page, sort or expand state forgets the rendered page, so this is a
    /// no-op until the next [`render`](Grid::render).
    pub fn toggle_all(&self, checked: bool) -> Option<GridEvent> {
        {
            let mut guard = self.inner.write().ok()?;
            if !guard.config.checkable {
                return None;
            }
            if guard.visible_ids.is_empty() {
                log::debug!("[grid] {} toggle all ignored: no rendered page", self.id);
                return None;
            }
            let visible = std::mem::take(&mut guard.visible_ids);
            guard.state.toggle_all(&visible, checked);
            guard.visible_ids = visible;
        }
        self.mark_dirty();
        let event = GridEvent::ToggleAll { checked };
        self.emit(&event);
        Some(event)
    }

    /// Whether every row on the last rendered page is checked.
    pub fn all_checked(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.state.all_checked(&g.visible_ids))
            .unwrap_or(false)
    }

    /// Whether a row is checked.
    pub fn is_checked(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.state.checked.is_checked(id))
            .unwrap_or(false)
    }

    /// All checked row IDs (sorted).
    pub fn checked_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.state.checked_ids())
            .unwrap_or_default()
    }

    /// Uncheck every row.
    pub fn clear_checked(&self) -> Vec<String> {
        let cleared = self
            .inner
            .write()
            .map(|mut g| g.state.clear_checked())
            .unwrap_or_default();
        if !cleared.is_empty() {
            self.mark_dirty();
        }
        cleared
    }

    /// IDs of the rows on the last rendered page.
    pub fn visible_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.visible_ids.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Clicks
    // -------------------------------------------------------------------------

    /// A row was clicked.
    pub fn row_click(&self, id: &str) -> GridEvent {
        let event = GridEvent::RowClick { id: id.to_string() };
        self.emit(&event);
        event
    }

    /// A cell was clicked. Only clickable columns emit.
    pub fn cell_click(&self, column_id: &str, row_id: &str) -> Option<GridEvent> {
        let clickable = self
            .inner
            .read()
            .ok()?
            .find_column(column_id)
            .is_some_and(|c| c.clickable);
        if !clickable {
            return None;
        }
        let event = GridEvent::CellClick {
            column_id: column_id.to_string(),
            row_id: row_id.to_string(),
        };
        self.emit(&event);
        Some(event)
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Flip a row's expand value.
    pub fn toggle_expand(&self, id: &str) -> Option<GridEvent> {
        let expanded = {
            let mut guard = self.inner.write().ok()?;
            if !guard.config.hierarchical {
                return None;
            }
            guard.visible_ids.clear();
            guard.state.toggle_expand(id)
        };
        self.mark_dirty();
        let event = GridEvent::ToggleExpand {
            id: id.to_string(),
            expanded,
        };
        self.emit(&event);
        Some(event)
    }

    /// Effective expand value of a row.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.state.is_expanded(id))
            .unwrap_or(true)
    }

    /// Expand every row with children.
    pub fn expand_all(&self, rows: &[Row]) {
        if let Ok(mut guard) = self.inner.write() {
            guard.state.expand_all(rows);
            guard.visible_ids.clear();
            self.mark_dirty();
        }
    }

    /// Collapse every row with children.
    pub fn collapse_all(&self, rows: &[Row]) {
        if let Ok(mut guard) = self.inner.write() {
            guard.state.collapse_all(rows);
            guard.visible_ids.clear();
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// Advance the sort for a column.
    ///
    /// Columns known from the last render must be sortable.
    pub fn toggle_sort(&self, key: &str) -> Option<GridEvent> {
        let sort = {
            let mut guard = self.inner.write().ok()?;
            if let Some(column) = guard.find_column(key)
                && !column.sortable
            {
                return None;
            }
            guard.visible_ids.clear();
            guard.state.toggle_sort(key)
        };
        self.mark_dirty();
        let event = GridEvent::Sort(sort);
        self.emit(&event);
        Some(event)
    }

    /// Current sort.
    pub fn sort(&self) -> SortConfig {
        self.inner
            .read()
            .map(|g| g.state.sort.clone())
            .unwrap_or_default()
    }

    /// Snapshot of checked/expand/sort state.
    pub fn state(&self) -> GridState {
        self.inner
            .read()
            .map(|g| g.state.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page.
    pub fn pagination(&self) -> Pagination {
        self.inner.read().map(|g| g.pagination).unwrap_or_default()
    }

    /// Go to `page`.
    pub fn set_page(&self, page: usize) -> Option<GridEvent> {
        let pagination = {
            let mut guard = self.inner.write().ok()?;
            guard.pagination.page = page;
            guard.scroll_offset = 0.0;
            guard.visible_ids.clear();
            guard.pagination
        };
        self.mark_dirty();
        let event = GridEvent::PageChange(pagination);
        self.emit(&event);
        Some(event)
    }

    /// Change the page size, returning to the first page.
    pub fn set_page_size(&self, page_size: usize) -> Option<GridEvent> {
        let pagination = {
            let mut guard = self.inner.write().ok()?;
            guard.pagination = Pagination::new(0, page_size);
            guard.scroll_offset = 0.0;
            guard.visible_ids.clear();
            guard.pagination
        };
        self.mark_dirty();
        let event = GridEvent::PageChange(pagination);
        self.emit(&event);
        Some(event)
    }

    /// Go to the next page.
    pub fn next_page(&self) -> Option<GridEvent> {
        self.set_page(self.pagination().next().page)
    }

    /// Go to the previous page.
    pub fn prev_page(&self) -> Option<GridEvent> {
        self.set_page(self.pagination().prev().page)
    }

    // -------------------------------------------------------------------------
    // Pinning
    // -------------------------------------------------------------------------

    /// Pinned column ids.
    pub fn pinned(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.pins.pinned().to_vec())
            .unwrap_or_default()
    }

    /// Turn pinning on (default set) or off (cleared).
    pub fn set_pinning(&self, on: bool) -> Option<GridEvent> {
        let has_pinned = self.inner.write().ok()?.pins.set_pinning(on);
        Some(self.pins_changed(has_pinned))
    }

    /// Pin or unpin one pinnable column.
    pub fn toggle_column_pin(&self, column_id: &str) -> Option<GridEvent> {
        let has_pinned = {
            let mut guard = self.inner.write().ok()?;
            if !guard.find_column(column_id).is_some_and(|c| c.pinnable) {
                return None;
            }
            guard.pins.toggle(column_id);
            guard.pins.has_pinned()
        };
        Some(self.pins_changed(has_pinned))
    }

    fn pins_changed(&self, has_pinned: bool) -> GridEvent {
        self.mark_dirty();
        self.remeasure();
        let event = GridEvent::ColumnPinToggle { has_pinned };
        self.emit(&event);
        event
    }

    // -------------------------------------------------------------------------
    // Measurement
    // -------------------------------------------------------------------------

    /// Report a header cell's rendered width.
    ///
    /// Only grids created with [`Grid::new`] own a registry; with a custom
    /// provider the report is ignored.
    ///
    /// Inside a tokio runtime, widths reported before the settle delay
    /// elapses are picked up by the pending measurement. Outside a runtime
    /// the measurement scheduled by [`render`](Grid::render) has already
    /// run, so call [`measure_now`](Grid::measure_now) after reporting.
    pub fn report_width(&self, column_id: &str, width: f32) {
        match &self.registry {
            Some(registry) => registry.report(column_id, width),
            None => log::debug!(
                "[grid] {} ignores width report for '{}': custom provider",
                self.id,
                column_id
            ),
        }
    }

    /// Schedule a re-measurement of the current header.
    pub fn remeasure(&self) -> Option<u64> {
        let column_ids = self.inner.read().ok()?.column_ids.clone();
        self.schedule_measurement(column_ids)
    }

    /// Measure the current header right away.
    pub fn measure_now(&self) -> Option<u64> {
        let column_ids = self.inner.read().ok()?.column_ids.clone();
        let generation = self.scheduler.lock().ok()?.measure_now(&column_ids);
        self.mark_dirty();
        Some(generation)
    }

    pub(super) fn schedule_measurement(&self, column_ids: Vec<String>) -> Option<u64> {
        // Without a runtime the measurement would run inside `schedule`; run
        // it here instead so the listener is called with no lock held.
        if tokio::runtime::Handle::try_current().is_err() {
            let generation = self.scheduler.lock().ok()?.measure_now(&column_ids);
            self.mark_dirty();
            self.emit(&GridEvent::LayoutMeasured { generation });
            return Some(generation);
        }

        let dirty = Arc::clone(&self.dirty);
        let listener = self.listener.clone();
        let mut scheduler = self.scheduler.lock().ok()?;
        let generation = scheduler.schedule(column_ids, move |generation| {
            dirty.store(true, Ordering::SeqCst);
            if let Some(listener) = listener {
                listener(&GridEvent::LayoutMeasured { generation });
            }
        });
        log::trace!("[grid] {} scheduled measurement {}", self.id, generation);
        Some(generation)
    }

    /// Whether a measurement is waiting for the settle delay.
    pub fn measurement_pending(&self) -> bool {
        self.scheduler
            .lock()
            .map(|s| s.is_pending())
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Drag
    // -------------------------------------------------------------------------

    /// Drag handle props for a row.
    pub fn drag_handle_props(&self, row: &Row) -> DragHandleProps {
        self.inner
            .read()
            .map(|g| g.row_drag.handle_props(&row.id, g.config.row_drag))
            .unwrap_or_else(|_| DragHandleProps {
                row_id: row.id.clone(),
                draggable: false,
                dragging: false,
                drop_indicator: None,
            })
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Set the body scroll offset (row virtualization).
    pub fn set_scroll_offset(&self, offset: f32) {
        if let Ok(mut guard) = self.inner.write() {
            let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
            if guard.scroll_offset != offset {
                guard.scroll_offset = offset;
                self.mark_dirty();
            }
        }
    }

    /// Body scroll offset.
    pub fn scroll_offset(&self) -> f32 {
        self.inner.read().map(|g| g.scroll_offset).unwrap_or(0.0)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the grid has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

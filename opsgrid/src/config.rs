//! Grid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::layout::FallbackWidths;
use crate::pagination::{DEFAULT_PAGE_SIZE, PaginationMode};
use crate::virtual_window::RowWindow;

/// Configuration for one grid instance.
///
/// Each axis (selection, hierarchy, pagination, pinning, drag-reorder) is
/// toggled independently.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use opsgrid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_checkable(true)
///     .with_hierarchical(true)
///     .with_page_size(50)
///     .with_default_pinned(vec!["event".into()])
///     .with_settle_delay(Duration::from_millis(30));
/// assert_eq!(config.page_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Prepend the selection column.
    pub checkable: bool,
    /// Treat `children` as a hierarchy.
    pub hierarchical: bool,
    /// Client- or server-side pagination.
    pub pagination: PaginationMode,
    /// Rows per page.
    ///
    /// Default: 20
    pub page_size: usize,
    /// Widths used before measurement.
    pub fallback_widths: FallbackWidths,
    /// Columns pinned when pinning is turned on.
    pub default_pinned: Vec<String>,
    /// Start with the default pin set applied.
    pub pinned_initially: bool,
    /// Allow dragging columns.
    pub column_drag: bool,
    /// Allow dragging rows.
    pub row_drag: bool,
    /// Delay before re-measuring header widths.
    ///
    /// Default: 50ms
    #[serde(with = "duration_ms")]
    pub settle_delay: Duration,
    /// Debounce for container resizes.
    ///
    /// Default: 200ms
    #[serde(with = "duration_ms")]
    pub resize_debounce: Duration,
    /// Vertical virtualization of the body, if any.
    pub row_window: Option<RowWindow>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            checkable: false,
            hierarchical: false,
            pagination: PaginationMode::Client,
            page_size: DEFAULT_PAGE_SIZE,
            fallback_widths: FallbackWidths::default(),
            default_pinned: Vec::new(),
            pinned_initially: false,
            column_drag: true,
            row_drag: false,
            settle_delay: Duration::from_millis(50),
            resize_debounce: Duration::from_millis(200),
            row_window: None,
        }
    }
}

impl GridConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a config from JSON; missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Sets whether rows are checkable.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// Sets whether the data is hierarchical.
    pub fn with_hierarchical(mut self, hierarchical: bool) -> Self {
        self.hierarchical = hierarchical;
        self
    }

    /// Sets the pagination mode.
    pub fn with_pagination(mut self, pagination: PaginationMode) -> Self {
        self.pagination = pagination;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the fallback widths.
    pub fn with_fallback_widths(mut self, fallback_widths: FallbackWidths) -> Self {
        self.fallback_widths = fallback_widths;
        self
    }

    /// Sets the default pin set.
    pub fn with_default_pinned(mut self, default_pinned: Vec<String>) -> Self {
        self.default_pinned = default_pinned;
        self
    }

    /// Sets whether the default pin set starts applied.
    pub fn with_pinned_initially(mut self, pinned_initially: bool) -> Self {
        self.pinned_initially = pinned_initially;
        self
    }

    /// Sets whether columns can be dragged.
    pub fn with_column_drag(mut self, column_drag: bool) -> Self {
        self.column_drag = column_drag;
        self
    }

    /// Sets whether rows can be dragged.
    pub fn with_row_drag(mut self, row_drag: bool) -> Self {
        self.row_drag = row_drag;
        self
    }

    /// Sets the header settle delay.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Sets the resize debounce.
    pub fn with_resize_debounce(mut self, resize_debounce: Duration) -> Self {
        self.resize_debounce = resize_debounce;
        self
    }

    /// Sets body virtualization.
    pub fn with_row_window(mut self, row_window: RowWindow) -> Self {
        self.row_window = Some(row_window);
        self
    }
}

/// Durations as whole milliseconds on the wire.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

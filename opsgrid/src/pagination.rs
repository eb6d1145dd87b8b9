//! Pagination window.
//!
//! Client-side grids slice their (flattened) rows into pages here. Server-side
//! grids receive one page from the caller and only use [`PageInfo`] for the
//! pager.

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Current page (0-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Create pagination state.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Move to the next page (unbounded; slicing clamps).
    pub fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self
        }
    }

    /// Move to the previous page, stopping at 0.
    pub fn prev(self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
    }

    /// Pull a page that fell off the end back onto the last page.
    ///
    /// Used after a filter shrinks the dataset. Empty datasets clamp to 0.
    pub fn clamp_to(self, total: usize) -> Self {
        let last = page_count(total, self.page_size).saturating_sub(1);
        Self {
            page: self.page.min(last),
            ..self
        }
    }
}

/// Where the rows of the current page come from.
///
/// Must be chosen explicitly; the grid never guesses from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum PaginationMode {
    /// The grid holds every row and slices pages itself.
    #[default]
    Client,
    /// The caller supplies only the current page and the overall total.
    Server { total_count: usize },
}

/// Slice one page out of `items`.
///
/// Never panics: a page past the end (or a zero page size) yields an empty
/// slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page.checked_mul(page_size) else {
        return &[];
    };
    if page_size == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Pager summary for a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    /// Current page (0-based).
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total visible rows (client) or the caller's total count (server).
    pub total: usize,
    /// Number of pages.
    pub page_count: usize,
}

impl PageInfo {
    /// Build pager info.
    pub fn new(pagination: Pagination, total: usize) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total,
            page_count: page_count(total, pagination.page_size),
        }
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

//! Pagination envelope shared by every list endpoint.
//!
//! List queries accept 1-based `page` and `size` parameters; repositories
//! return a [`Page`] carrying the items for that slice plus the totals the
//! client needs to paginate further.

use serde::Serialize;

/// Default number of items per page when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound for the `size` parameter.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// One page of a list result.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    /// 1-based index of this page.
    pub index: i64,
    /// Requested page size (after clamping).
    pub max_size: i64,
    /// Total number of pages for the current filter.
    pub total_pages: i64,
    /// Total number of items matching the current filter.
    pub total: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from a slice of items plus the matching row count.
    pub fn new(index: i64, max_size: i64, total: i64, items: Vec<T>) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + max_size - 1) / max_size
        };
        Self {
            index,
            max_size,
            total_pages,
            total,
            items,
        }
    }

    /// Map every item of the page, keeping the pagination bookkeeping.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            index: self.index,
            max_size: self.max_size,
            total_pages: self.total_pages,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Clamp an optional 1-based page index to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp an optional page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// SQL OFFSET for a clamped (page, size) pair.
pub fn offset(page: i64, size: i64) -> i64 {
    (page - 1) * size
}

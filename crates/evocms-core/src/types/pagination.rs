//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the page to at least 1 and the
    /// page size into `1..=max_page_size`.
    pub fn new(page: u64, page_size: u64, max_page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    /// SQL `OFFSET`, capped at `i64::MAX` so it always binds as `BIGINT`.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The rows on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of rows per page.
    pub page_size: u64,
    /// Total number of rows across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages: total_pages(total_items, page_size),
        }
    }

    /// Map the rows while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed for `total_items`; an empty set still has one page.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if total_items == 0 || page_size == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10, 100).offset(), 0);
        assert_eq!(PageRequest::new(3, 10, 100).offset(), 20);
    }

    #[test]
    fn test_offset_saturates_for_huge_page() {
        let req = PageRequest::new(i64::MAX as u64, 10, 100);
        assert_eq!(req.offset(), i64::MAX as u64);
        assert_eq!(PageRequest::new(u64::MAX, 100, 100).offset(), i64::MAX as u64);
    }

    #[test]
    fn test_new_clamps() {
        let req = PageRequest::new(0, 500, 100);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 100);
        assert_eq!(PageRequest::new(1, 0, 100).page_size, 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }
}

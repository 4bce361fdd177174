//! # Pagination
//!
//! Page requests are zero-based. A page carries the total number of records in the store at the
//! moment it was cut, so callers can render "page 2 of 7" without a second round trip.

use serde::{Deserialize, Serialize};

/// Which slice of a listing to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u64,
    /// Maximum number of items on the page.
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Number of records skipped before this page starts.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}

/// A slice of a listing plus the total it was cut from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    /// Transforms every item while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_total_pages() {
        let request = PageRequest::new(2, 10);
        assert_eq!(request.offset(), 20);

        let page = Page::new(vec![1, 2, 3], 23, request);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());

        let first = Page::new(vec![0; 10], 23, PageRequest::new(0, 10));
        assert!(first.has_next());
    }

    #[test]
    fn test_zero_sized_page_has_no_pages() {
        let page: Page<u32> = Page::new(vec![], 5, PageRequest::new(0, 0));
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_last_possible_page_index() {
        let request = PageRequest::new(u64::MAX, 10);
        assert_eq!(request.offset(), u64::MAX);

        let page: Page<u32> = Page::new(vec![], 3, request);
        assert!(!page.has_next());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 2, PageRequest::new(0, 5)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 2);
        assert_eq!(page.size, 5);
    }
}

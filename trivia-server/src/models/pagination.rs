//! Page-number pagination over questions

use serde::Serialize;

/// Questions shown per page
pub const PAGE_SIZE: u32 = 10;

/// A 1-indexed page request with a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Page `page` of [`PAGE_SIZE`] items. Page 0 is clamped to 1.
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: PAGE_SIZE,
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.per_page as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    /// Slice `[(page-1)*per_page, page*per_page)` of an ordered list.
    ///
    /// Returns an empty slice when the page starts past the end; a last
    /// partial page is returned as-is.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.per_page as usize).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T: Clone> Paginated<T> {
    /// Build a page from the full ordered list.
    pub fn from_slice(all: &[T], page: Pagination) -> Self {
        Self {
            items: page.slice(all).to_vec(),
            total: all.len() as i64,
            page: page.page,
            per_page: page.per_page,
        }
    }
}

impl<T> Paginated<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Offset/limit pagination shared by repository queries and listing pages.

use serde::{Deserialize, Serialize};

/// Number of posts on a listing page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pagination parameters applied to a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// One page of items plus the data templates need to render pager links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

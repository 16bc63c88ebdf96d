//! 1-based pagination over filtered results.
//!
//! Out-of-range pages yield an empty slice rather than an error.

use serde::Serialize;

/// One page of a filtered, ordered result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}

/// Slice `items` into the requested page.
///
/// Page 0 is treated as page 1. A page past the end comes back empty, and a
/// page size of 0 yields an empty page with no pages at all.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<&T> {
    let page = page.max(1);
    let total_items = items.len();
    if page_size == 0 {
        return Page {
            items: Vec::new(),
            page,
            page_size,
            total_items,
            total_pages: 0,
        };
    }

    let total_pages = total_items.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let page_items = items.iter().skip(start).take(page_size).collect();

    Page {
        items: page_items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

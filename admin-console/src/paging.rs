//! Page arithmetic for list views. Pages are 1-based.

use std::ops::Range;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 3;

/// `ceil(count / per_page)`; zero items means zero pages.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

/// Zero-based slice bounds for `page` over `count` filtered items.
///
/// A page past the end yields an empty range anchored at `count`.
pub fn page_bounds(page: usize, per_page: usize, count: usize) -> Range<usize> {
    let page = page.max(1);
    let start = ((page - 1) * per_page).min(count);
    let end = (page * per_page).min(count);
    start..end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Moves to `page`, clamped into `1..=total_pages(count)`.
    pub fn go_to(&mut self, page: usize, count: usize) {
        let last = total_pages(count, self.items_per_page).max(1);
        self.current_page = page.clamp(1, last);
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.items_per_page)
    }

    pub fn bounds(&self, count: usize) -> Range<usize> {
        page_bounds(self.current_page, self.items_per_page, count)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, count: usize) -> bool {
        self.current_page < self.total_pages(count)
    }

    /// Controls are hidden when everything fits on one page.
    pub fn controls_visible(&self, count: usize) -> bool {
        self.total_pages(count) > 1
    }

    /// "Showing 4–6 of 7 users".
    pub fn summary(&self, count: usize, noun: &str) -> String {
        let range = self.bounds(count);
        if range.is_empty() {
            return format!("Showing 0 of {} {}", count, noun);
        }
        format!(
            "Showing {}–{} of {} {}",
            range.start + 1,
            range.end,
            count,
            noun
        )
        .trim_end()
        .to_string()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

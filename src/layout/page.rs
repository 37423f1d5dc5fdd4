//! Gallery pagination
//!
//! Pages are 1-indexed. The final page absorbs whatever remains once fewer
//! than a full page of streams is left after its start.

use std::ops::Range;

/// Page state for gallery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Paginator {
    /// Create a paginator positioned on the first page
    ///
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    /// Streams per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page (1-indexed)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages for `total` streams; never less than one
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Index range of page `page` over `total` streams
    pub fn range_of(&self, page: usize, total: usize) -> Range<usize> {
        let start = page.saturating_sub(1).saturating_mul(self.page_size).min(total);
        let remaining = total - start;
        if remaining <= self.page_size {
            start..total
        } else {
            start..start + self.page_size
        }
    }

    /// Index range of the current page
    pub fn range(&self, total: usize) -> Range<usize> {
        self.range_of(self.page, total)
    }

    /// Move to a page, clamped to the valid range
    ///
    /// Returns whether the current page changed.
    pub fn set_page(&mut self, page: usize, total: usize) -> bool {
        let clamped = page.clamp(1, self.page_count(total));
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Pull the current page back in range after the total shrank
    pub fn clamp(&mut self, total: usize) -> bool {
        self.set_page(self.page, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_over_twenty_five() {
        let mut pages = Paginator::new(25);

        assert_eq!(pages.page_count(30), 2);
        assert_eq!(pages.range(30), 0..25);

        assert!(pages.set_page(2, 30));
        assert_eq!(pages.range(30), 25..30);
    }

    #[test]
    fn test_exact_multiple() {
        let pages = Paginator::new(9);

        assert_eq!(pages.page_count(18), 2);
        assert_eq!(pages.range_of(1, 18), 0..9);
        assert_eq!(pages.range_of(2, 18), 9..18);
    }

    #[test]
    fn test_empty_total() {
        let mut pages = Paginator::new(25);

        assert_eq!(pages.page_count(0), 1);
        assert_eq!(pages.range(0), 0..0);
        assert!(!pages.set_page(5, 0));
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut pages = Paginator::new(9);

        pages.set_page(10, 20);
        assert_eq!(pages.page(), 3);

        pages.set_page(0, 20);
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn test_shrinking_total_clamps_down() {
        let mut pages = Paginator::new(9);
        pages.set_page(3, 20);

        assert!(pages.clamp(10));
        assert_eq!(pages.page(), 2);
        assert_eq!(pages.range(10), 9..10);

        assert!(!pages.clamp(10));
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let pages = Paginator::new(9);
        assert_eq!(pages.range_of(4, 10), 10..10);
    }

    #[test]
    fn test_zero_page_size() {
        let pages = Paginator::new(0);
        assert_eq!(pages.page_size(), 1);
        assert_eq!(pages.page_count(3), 3);
    }
}

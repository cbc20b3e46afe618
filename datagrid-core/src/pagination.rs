//! Page index arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Rows per page when the embedder does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination footer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

impl PageNav {
    pub fn all() -> &'static [PageNav] {
        &[PageNav::First, PageNav::Previous, PageNav::Next, PageNav::Last]
    }
}

/// "Showing first-last of total", one-based. Both bounds are zero when there
/// are no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    /// Whether the footer button for `nav` is enabled.
    pub fn can_navigate(&self, nav: PageNav, total: usize) -> bool {
        match nav {
            PageNav::First | PageNav::Previous => self.can_previous(),
            PageNav::Next | PageNav::Last => self.can_next(total),
        }
    }

    /// Move the page index. Returns false, leaving the index untouched, when
    /// the button would be disabled.
    pub fn navigate(&mut self, nav: PageNav, total: usize) -> bool {
        if !self.can_navigate(nav, total) {
            return false;
        }
        self.page_index = match nav {
            PageNav::First => 0,
            PageNav::Previous => self.page_index - 1,
            PageNav::Next => self.page_index + 1,
            PageNav::Last => self.page_count(total).saturating_sub(1),
        };
        true
    }

    /// Keep the index inside the available pages after the row count shrank.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total).saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }

    /// Index range of the current page within the sorted rows.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn window(&self, total: usize) -> PageWindow {
        if total == 0 {
            return PageWindow {
                first: 0,
                last: 0,
                total,
            };
        }
        let first = self.page_index * self.page_size + 1;
        let last = total.min(first + self.page_size - 1);
        PageWindow { first, last, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_and_window() {
        let p = Pagination::new(20);
        assert_eq!(p.page_count(57), 3);
        assert_eq!(p.page_count(0), 0);
        assert_eq!(
            p.window(57),
            PageWindow {
                first: 1,
                last: 20,
                total: 57
            }
        );
    }

    #[test]
    fn test_last_page_window_is_partial() {
        let mut p = Pagination::new(20);
        assert!(p.navigate(PageNav::Last, 57));
        assert_eq!(p.page_index, 2);
        assert_eq!(p.range(57), 40..57);
        assert_eq!(p.window(57).first, 41);
        assert_eq!(p.window(57).last, 57);
    }

    #[test]
    fn test_disabled_navigation_is_noop() {
        let mut p = Pagination::new(10);
        assert!(!p.navigate(PageNav::Previous, 25));
        assert!(!p.navigate(PageNav::First, 25));
        assert!(p.navigate(PageNav::Next, 25));
        assert!(p.navigate(PageNav::Next, 25));
        assert!(!p.navigate(PageNav::Next, 25));
        assert_eq!(p.page_index, 2);
    }

    #[test]
    fn test_clamp_after_rows_shrink() {
        let mut p = Pagination::new(10);
        p.page_index = 4;
        p.clamp(15);
        assert_eq!(p.page_index, 1);
        p.clamp(0);
        assert_eq!(p.page_index, 0);
    }

    #[test]
    fn test_empty_window() {
        let p = Pagination::new(10);
        assert_eq!(
            p.window(0),
            PageWindow {
                first: 0,
                last: 0,
                total: 0
            }
        );
        assert_eq!(p.range(0), 0..0);
    }
}

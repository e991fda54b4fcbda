/// Number of page links shown by default.
pub const DEFAULT_WINDOW_SIZE: u32 = 5;

/// Current position within a paginated listing.
///
/// `current_page` is 1-indexed and kept within `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    total_pages: u32,
    page_size: u32,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn window(&self, window_size: u32) -> Vec<u32> {
        visible_window(self.current_page, self.total_pages, window_size)
    }

    /// Moves to `page` if it is in range. Returns whether the page changed.
    pub(crate) fn go_to(&mut self, page: u32) -> bool {
        if !self.can_go_to(page) || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub(crate) fn reset_to_first(&mut self) {
        self.current_page = 1;
    }

    pub(crate) fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
    }

    /// Records the total reported by a response and clamps the current page.
    /// Returns whether the clamp moved the current page.
    pub(crate) fn apply_total(&mut self, total_pages: u32) -> bool {
        self.total_pages = total_pages.max(1);
        let clamped = self.current_page.clamp(1, self.total_pages);
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

/// Page numbers to show as navigation links.
///
/// Shows every page when they fit. Otherwise the first `window_size` pages
/// while on pages 1 to 3, the last `window_size` pages within two of the end,
/// and the two pages either side of the current one in between.
pub fn visible_window(current_page: u32, total_pages: u32, window_size: u32) -> Vec<u32> {
    let total = total_pages.max(1);
    let size = window_size.max(1);
    let current = current_page.clamp(1, total);

    if total <= size {
        (1..=total).collect()
    } else if current <= 3 {
        (1..=size).collect()
    } else if current >= total - 2 {
        (total - size + 1..=total).collect()
    } else {
        (current - 2..=current + 2).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_totals_show_every_page() {
        assert_eq!(visible_window(3, 4, 5), vec![1, 2, 3, 4]);
        assert_eq!(visible_window(1, 1, 5), vec![1]);
    }

    #[test]
    fn zero_total_is_treated_as_one_page() {
        assert_eq!(visible_window(1, 0, 5), vec![1]);
    }

    #[test]
    fn middle_run_is_two_pages_either_side() {
        assert_eq!(visible_window(6, 10, 4), vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn clamp_reports_movement() {
        let mut state = PaginationState::new(10);
        state.apply_total(8);
        assert!(state.go_to(8));
        assert!(state.apply_total(3));
        assert_eq!(state.current_page(), 3);
        assert!(!state.apply_total(5));
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut state = PaginationState::new(10);
        state.apply_total(4);
        assert!(!state.go_to(0));
        assert!(!state.go_to(5));
        assert_eq!(state.current_page(), 1);
    }
}

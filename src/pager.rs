use std::ops::Range;

use crate::constants::*;

/// Clamped page navigation over a list of items, a fixed number per view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    total: usize,
    per_view: usize,
    page: usize,
}

impl Pager {
    pub fn new(total: usize, per_view: usize) -> Self {
        Self { total, per_view: per_view.max(1), page: 0 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_view)
    }

    /// Move by `delta` pages, stopping at the first and last page.
    pub fn change_page(&mut self, delta: isize) {
        let last = self.page_count().saturating_sub(1) as isize;
        self.page = (self.page as isize + delta).clamp(0, last.max(0)) as usize;
    }

    pub fn show_page_of(&mut self, index: usize) {
        if index < self.total {
            self.page = index / self.per_view;
        }
    }

    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.page * self.per_view).min(self.total);
        start..(start + self.per_view).min(self.total)
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }
}

/// Zoom factor of the gallery's main image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f32);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(MIN_ZOOM)
    }
}

impl Zoom {
    pub fn factor(self) -> f32 {
        self.0
    }

    pub fn zoom_in(&mut self) {
        self.0 += ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        if self.0 > MIN_ZOOM {
            self.0 = (self.0 - ZOOM_STEP).max(MIN_ZOOM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_clamp_at_both_ends() {
        let mut pager = Pager::new(7, ITEMS_PER_VIEW);
        assert_eq!(pager.page_count(), 3);
        assert!(!pager.can_go_previous());

        pager.change_page(-1);
        assert_eq!(pager.page(), 0);

        pager.change_page(1);
        pager.change_page(1);
        pager.change_page(1);
        assert_eq!(pager.page(), 2);
        assert!(!pager.can_go_next());
        assert_eq!(pager.visible_range(), 6..7);
    }

    #[test]
    fn empty_pager_has_no_pages() {
        let mut pager = Pager::new(0, ITEMS_PER_VIEW);
        pager.change_page(1);
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.visible_range(), 0..0);
        assert!(!pager.can_go_next());
    }

    #[test]
    fn follows_active_item() {
        let mut pager = Pager::new(6, ITEMS_PER_VIEW);
        pager.show_page_of(4);
        assert_eq!(pager.visible_range(), 3..6);
        pager.show_page_of(10);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn zoom_never_drops_below_one() {
        let mut zoom = Zoom::default();
        zoom.zoom_out();
        assert_eq!(zoom.factor(), 1.0);

        zoom.zoom_in();
        zoom.zoom_in();
        assert!((zoom.factor() - 1.4).abs() < 1e-6);

        zoom.zoom_out();
        zoom.zoom_out();
        zoom.zoom_out();
        assert_eq!(zoom.factor(), 1.0);
    }
}

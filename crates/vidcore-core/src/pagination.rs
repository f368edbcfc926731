// crates/vidcore-core/src/pagination.rs
//
// Client-side paging over the full record slice. Pages are zero-based here;
// the views add one when they print page numbers.

pub const GRID_PAGE_SIZE: usize = 8;
pub const LIST_PAGE_SIZES: [usize; 3] = [5, 10, 25];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page:      usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), page: 0 }
    }

    pub fn grid() -> Self { Self::new(GRID_PAGE_SIZE) }

    pub fn list() -> Self { Self::new(LIST_PAGE_SIZES[0]) }

    pub fn page(&self) -> usize { self.page }

    pub fn page_size(&self) -> usize { self.page_size }

    /// Changing the page size always returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 0;
    }

    /// At least 1, so an empty collection still has a (blank) first page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    pub fn next(&mut self, total: usize) { self.set_page(self.page + 1, total); }

    pub fn prev(&mut self) { self.page = self.page.saturating_sub(1); }

    /// Pull the current page back inside range after the collection shrank.
    pub fn clamp(&mut self, total: usize) { self.set_page(self.page, total); }

    /// The visible window. Empty when the page lies past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page * self.page_size).min(items.len());
        let end   = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// 1-based inclusive range of the visible rows, `(0, 0)` when empty.
    /// Feeds the "6–10 of 12" label in the list footer.
    pub fn visible_range(&self, total: usize) -> (usize, usize) {
        let start = self.page * self.page_size;
        if start >= total {
            return (0, 0);
        }
        (start + 1, (start + self.page_size).min(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pages_of_eight() {
        let items: Vec<u32> = (0..20).collect();
        let mut p = Paginator::grid();
        assert_eq!(p.page_count(items.len()), 3);
        assert_eq!(p.slice(&items), &items[0..8]);
        p.next(items.len());
        p.next(items.len());
        assert_eq!(p.slice(&items), &items[16..20]);
        p.next(items.len());
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn empty_collection_has_one_blank_page() {
        let p = Paginator::list();
        let items: Vec<u32> = Vec::new();
        assert_eq!(p.page_count(0), 1);
        assert!(p.slice(&items).is_empty());
        assert_eq!(p.visible_range(0), (0, 0));
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut p = Paginator::list();
        p.set_page(3, 30);
        assert_eq!(p.page(), 3);
        p.set_page_size(10);
        assert_eq!(p.page(), 0);
        assert_eq!(p.page_size(), 10);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut p = Paginator::new(5);
        p.set_page(2, 11);
        assert_eq!(p.visible_range(11), (11, 11));
        p.clamp(10);
        assert_eq!(p.page(), 1);
        assert_eq!(p.visible_range(10), (6, 10));
    }

    #[test]
    fn prev_saturates_at_first_page() {
        let mut p = Paginator::grid();
        p.prev();
        assert_eq!(p.page(), 0);
    }
}

/// Most page buttons shown around the current page.
pub const WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Previous(usize),
    Page(usize),
    Current(usize),
    Ellipsis,
    Next(usize),
}

/// Position in a paginated list, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// `current` is clamped into `[1, total_pages]`.
    pub fn new(current: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current: current.clamp(1, total_pages),
            total_pages,
        }
    }

    /// Pages for a list of `total` items.
    pub fn for_total(current: usize, total: usize, page_size: usize) -> Self {
        Self::new(current, total.div_ceil(page_size.max(1)))
    }

    /// Pages when the total is unknown: a full page suggests one more.
    pub fn open_ended(current: usize, page_len: usize, page_size: usize) -> Self {
        let has_more = page_size > 0 && page_len >= page_size;
        Self::new(current, current + usize::from(has_more))
    }

    /// Inclusive range of page numbers shown as buttons.
    pub fn window(&self) -> (usize, usize) {
        let half = WINDOW / 2;
        let mut start = self.current.saturating_sub(half).max(1);
        let end = (start + WINDOW - 1).min(self.total_pages);
        if end + 1 - start < WINDOW {
            start = (end + 1).saturating_sub(WINDOW).max(1);
        }
        (start, end)
    }

    /// Controls to render, left to right. Empty when there is a single page.
    pub fn items(&self) -> Vec<PageItem> {
        if self.total_pages <= 1 {
            return Vec::new();
        }
        let (start, end) = self.window();
        let mut items = Vec::new();

        if self.current > 1 {
            items.push(PageItem::Previous(self.current - 1));
        }
        if start > 1 {
            items.push(PageItem::Page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        for page in start..=end {
            if page == self.current {
                items.push(PageItem::Current(page));
            } else {
                items.push(PageItem::Page(page));
            }
        }
        if end < self.total_pages {
            if end + 1 < self.total_pages {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(self.total_pages));
        }
        if self.current < self.total_pages {
            items.push(PageItem::Next(self.current + 1));
        }
        items
    }
}

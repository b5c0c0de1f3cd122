// Pure pagination over an already-filtered collection.
use serde::Serialize;

/// One page slice plus the counts render needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Items on earlier pages, for continuous numbering across pages.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }
}

/// `total_pages` is never 0; an empty collection still has one (empty) page.
/// `current_page` out of range is clamped rather than rejected.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, current_page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = current_page.clamp(1, total_pages);
    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    Page {
        items: items[start..end].to_vec(),
        current_page,
        page_size,
        total_pages,
        total_items,
    }
}

/// Entry in the page-number control.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PageMark {
    Page(usize),
    /// A single ellipsis standing in for a run of hidden pages.
    Gap,
}

/// First and last page always show, plus pages within `radius` of the
/// current one; each skipped run collapses to exactly one `Gap`.
pub fn page_window(current: usize, total: usize, radius: usize) -> Vec<PageMark> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let mut marks = Vec::new();
    let mut gap_pending = false;
    for page in 1..=total {
        let visible = page == 1 || page == total || page.abs_diff(current) <= radius;
        if visible {
            if gap_pending {
                marks.push(PageMark::Gap);
                gap_pending = false;
            }
            marks.push(PageMark::Page(page));
        } else {
            gap_pending = true;
        }
    }
    marks
}

/// Radius used by every listing view's page-number control.
pub const DEFAULT_WINDOW_RADIUS: usize = 2;

/// Page-number control marks for a page, suppressed entirely when the whole
/// collection fits on a single page.
pub fn controls_for<T>(page: &Page<T>, page_size: usize, radius: usize) -> Vec<PageMark> {
    if page.total_items <= page_size.max(1) {
        Vec::new()
    } else {
        page_window(page.current_page, page.total_pages, radius)
    }
}

/// Current page number owned by a listing view. The one rule: any change to
/// the underlying filtered collection lands back on page 1, so a stale page
/// number can never point past the end of a newly-shrunk collection.
#[derive(Debug, Clone)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// New search, new country, new fetch: back to page 1.
    pub fn collection_changed(&mut self) {
        self.current_page = 1;
    }

    pub fn page_of<T: Clone>(&self, items: &[T]) -> Page<T> {
        paginate(items, self.page_size, self.current_page)
    }
}

//! Client-side paging of ranking tables.

use super::error::AnalyticsError;

/// Rows per page of a ranking table unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// `items[(page-1)*page_size .. page*page_size]`, clipped to the slice.
///
/// Pages past the end give an empty slice. Page 0 is read as page 1, and a
/// zero page size yields nothing.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Page position bound to the result set it was opened on.
///
/// `K` identifies the result set (e.g. the report request). Whenever `sync`
/// sees a different key the cursor jumps back to page 1; it also falls back
/// to page 1 if the set shrank below the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor<K> {
    key: Option<K>,
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl<K> Default for PageCursor<K> {
    fn default() -> Self {
        Self {
            key: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl<K: PartialEq + Clone> PageCursor<K> {
    pub fn new(page_size: usize) -> Result<Self, AnalyticsError> {
        if page_size == 0 {
            return Err(AnalyticsError::InvalidPageSize);
        }
        Ok(Self {
            key: None,
            page: 1,
            page_size,
            total_items: 0,
        })
    }

    /// Returns true when the page was reset
    pub fn sync(&mut self, key: &K, total_items: usize) -> bool {
        self.total_items = total_items;
        let changed = self.key.as_ref() != Some(key);
        if changed {
            self.key = Some(key.clone());
        }
        if changed || self.page > self.total_pages().max(1) {
            let was = self.page;
            self.page = 1;
            return changed || was != 1;
        }
        false
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn go_to(&mut self, page: usize) -> Result<(), AnalyticsError> {
        let total_pages = self.total_pages().max(1);
        if page == 0 || page > total_pages {
            return Err(AnalyticsError::InvalidPage { page, total_pages });
        }
        self.page = page;
        Ok(())
    }

    pub fn next(&mut self) -> bool {
        self.has_next() && self.go_to(self.page + 1).is_ok()
    }

    pub fn prev(&mut self) -> bool {
        self.has_prev() && self.go_to(self.page - 1).is_ok()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), AnalyticsError> {
        if page_size == 0 {
            return Err(AnalyticsError::InvalidPageSize);
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.page_size)
    }

    /// 1-based position of the `index`-th row of the current page in the full list
    pub fn display_rank(&self, index: usize) -> usize {
        (self.page - 1) * self.page_size + index + 1
    }
}

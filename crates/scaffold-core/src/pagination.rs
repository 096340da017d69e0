//! Page/offset pagination over ordered queries.
//!
//! A [`PageRequest`] says which page the caller wants; once the total number
//! of rows is known it resolves into a [`PageWindow`] (the offset/limit to
//! run) and finally a [`Page`] holding the slice plus navigation data.

use std::collections::BTreeMap;

/// Items per page when the caller does not ask for a size.
pub const DEFAULT_ITEMS_PER_PAGE: u64 = 50;

/// Pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    /// Total row count supplied by the caller; skips the count query.
    pub item_count: Option<u64>,
    pub items_per_page: u64,
    /// Extra options carried onto the page, e.g. query parameters to keep
    /// in navigation links.
    pub extra: BTreeMap<String, String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            item_count: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            extra: BTreeMap::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_items_per_page(mut self, items_per_page: u64) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn with_item_count(mut self, item_count: u64) -> Self {
        self.item_count = Some(item_count);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Resolve against the total number of rows.
    pub fn window(&self, item_count: u64) -> PageWindow {
        PageWindow::compute(self.page, self.items_per_page, item_count)
    }
}

/// Offset/limit for one page once the row count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub items_per_page: u64,
    pub item_count: u64,
    pub page_count: u64,
}

impl PageWindow {
    /// Pages start at 1 and hold at least one item. A page past the end is
    /// clamped to the last page.
    pub fn compute(page: u64, items_per_page: u64, item_count: u64) -> Self {
        let items_per_page = items_per_page.max(1);
        let page_count = item_count.div_ceil(items_per_page);
        let page = page.clamp(1, page_count.max(1));

        Self {
            page,
            items_per_page,
            item_count,
            page_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.items_per_page
    }

    pub fn limit(&self) -> u64 {
        self.items_per_page
    }

    /// Wrap the fetched slice into a page.
    pub fn into_page<T>(self, items: Vec<T>, extra: BTreeMap<String, String>) -> Page<T> {
        if self.is_empty() {
            return Page {
                page: self.page,
                items_per_page: self.items_per_page,
                item_count: 0,
                page_count: 0,
                first_page: None,
                last_page: None,
                first_item: None,
                last_item: None,
                previous_page: None,
                next_page: None,
                items: Vec::new(),
                extra,
            };
        }

        let first_item = self.offset() + 1;
        let last_item = self
            .offset()
            .saturating_add(self.items_per_page)
            .min(self.item_count);
        let last_page = self.page_count;

        Page {
            page: self.page,
            items_per_page: self.items_per_page,
            item_count: self.item_count,
            page_count: self.page_count,
            first_page: Some(1),
            last_page: Some(last_page),
            first_item: Some(first_item),
            last_item: Some(last_item),
            previous_page: (self.page > 1).then(|| self.page - 1),
            next_page: (self.page < last_page).then(|| self.page + 1),
            items,
            extra,
        }
    }
}

/// One materialized page of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub page: u64,
    pub items_per_page: u64,
    pub item_count: u64,
    pub page_count: u64,
    pub first_page: Option<u64>,
    pub last_page: Option<u64>,
    /// 1-based position of the first item on this page.
    pub first_item: Option<u64>,
    pub last_item: Option<u64>,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
    pub items: Vec<T>,
    pub extra: BTreeMap<String, String>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            page: self.page,
            items_per_page: self.items_per_page,
            item_count: self.item_count,
            page_count: self.page_count,
            first_page: self.first_page,
            last_page: self.last_page,
            first_item: self.first_item,
            last_item: self.last_item,
            previous_page: self.previous_page,
            next_page: self.next_page,
            items: self.items.into_iter().map(f).collect(),
            extra: self.extra,
        }
    }
}

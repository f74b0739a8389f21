//! Grid state snapshot and its derived values.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::BTreeMap;

use super::types::{Filters, PaginatorInfo, SortOrder};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Everything the grid renders from. `first` is the zero-based offset of the
/// first visible row; `current_page` is one-based.
#[derive(Clone, Debug, PartialEq)]
pub struct TableState<R> {
    pub rows: Vec<R>,
    pub loading: bool,
    pub total_records: usize,
    pub selected_items: Vec<R>,
    pub expanded_rows: BTreeMap<String, bool>,
    pub filters: Filters,
    pub page_size: usize,
    pub first: usize,
    pub current_page: usize,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub rows_per_page_options: Vec<usize>,
}

impl<R> Default for TableState<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            total_records: 0,
            selected_items: Vec::new(),
            expanded_rows: BTreeMap::new(),
            filters: Filters::new(),
            page_size: DEFAULT_PAGE_SIZE,
            first: 0,
            current_page: 1,
            sort_field: None,
            sort_order: SortOrder::Unsorted,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
        }
    }
}

impl<R> TableState<R> {
    /// `ceil(total_records / page_size)`, or 0 when there is nothing to page.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.total_records == 0 || self.page_size == 0 {
            return 0;
        }
        self.total_records.div_ceil(self.page_size)
    }

    #[must_use]
    pub fn paginator_info(&self) -> PaginatorInfo {
        let total = self.total_records;
        let start = if total > 0 { self.first.saturating_add(1) } else { 0 };
        let end = self.first.saturating_add(self.page_size).min(total);
        PaginatorInfo { start, end, total }
    }

    #[must_use]
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded_rows.get(key).copied().unwrap_or(false)
    }
}

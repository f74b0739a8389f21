//! Grid state container with event handlers.
//!
//! DESIGN
//! ======
//! Every `on_*` handler first applies the event to `state`, then forwards the
//! untouched event to the matching callback if one was configured. Callbacks
//! run after the state write has been released, so they may read the table.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use tracing::debug;

use super::state::{DEFAULT_PAGE_SIZE, DEFAULT_ROWS_PER_PAGE_OPTIONS, TableState};
use super::types::{CsvExport, FilterEvent, PageEvent, PaginatorInfo, RowEvent, SortEvent, SortOrder, TableRow};
use crate::reactive::Observable;

pub type Handler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Initial grid settings plus optional event callbacks.
pub struct TableOptions<R> {
    pub rows: usize,
    pub rows_per_page_options: Vec<usize>,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub on_page: Option<Handler<PageEvent>>,
    pub on_sort: Option<Handler<SortEvent>>,
    pub on_filter: Option<Handler<FilterEvent>>,
    pub on_row_select: Option<Handler<RowEvent<R>>>,
    pub on_row_unselect: Option<Handler<RowEvent<R>>>,
    pub on_row_expand: Option<Handler<RowEvent<R>>>,
    pub on_row_collapse: Option<Handler<RowEvent<R>>>,
}

impl<R> Default for TableOptions<R> {
    fn default() -> Self {
        Self {
            rows: DEFAULT_PAGE_SIZE,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
            sort_field: None,
            sort_order: SortOrder::Unsorted,
            on_page: None,
            on_sort: None,
            on_filter: None,
            on_row_select: None,
            on_row_unselect: None,
            on_row_expand: None,
            on_row_collapse: None,
        }
    }
}

impl<R> TableOptions<R> {
    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_rows_per_page_options(mut self, options: Vec<usize>) -> Self {
        self.rows_per_page_options = options;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    #[must_use]
    pub fn on_page(mut self, f: impl Fn(&PageEvent) + Send + Sync + 'static) -> Self {
        self.on_page = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_sort(mut self, f: impl Fn(&SortEvent) + Send + Sync + 'static) -> Self {
        self.on_sort = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_filter(mut self, f: impl Fn(&FilterEvent) + Send + Sync + 'static) -> Self {
        self.on_filter = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_row_select(mut self, f: impl Fn(&RowEvent<R>) + Send + Sync + 'static) -> Self {
        self.on_row_select = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_row_unselect(mut self, f: impl Fn(&RowEvent<R>) + Send + Sync + 'static) -> Self {
        self.on_row_unselect = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_row_expand(mut self, f: impl Fn(&RowEvent<R>) + Send + Sync + 'static) -> Self {
        self.on_row_expand = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_row_collapse(mut self, f: impl Fn(&RowEvent<R>) + Send + Sync + 'static) -> Self {
        self.on_row_collapse = Some(Box::new(f));
        self
    }
}

fn notify<E>(handler: Option<&Handler<E>>, event: &E) {
    if let Some(f) = handler {
        f(event);
    }
}

// =============================================================================
// TABLE
// =============================================================================

pub struct Table<R> {
    state: Observable<TableState<R>>,
    options: TableOptions<R>,
}

impl<R: TableRow + Clone + PartialEq> Table<R> {
    pub fn new(options: TableOptions<R>) -> Self {
        let state = TableState {
            page_size: options.rows,
            rows_per_page_options: options.rows_per_page_options.clone(),
            sort_field: options.sort_field.clone(),
            sort_order: options.sort_order,
            ..TableState::default()
        };
        Self { state: Observable::new(state), options }
    }

    pub fn state(&self) -> &Observable<TableState<R>> {
        &self.state
    }

    pub fn total_pages(&self) -> usize {
        self.state.with(TableState::total_pages)
    }

    pub fn paginator_info(&self) -> PaginatorInfo {
        self.state.with(TableState::paginator_info)
    }

    pub fn on_page(&self, event: &PageEvent) {
        self.state.update(|s| {
            s.first = event.first;
            s.page_size = event.rows;
            s.current_page = event.page.saturating_add(1);
        });
        debug!(first = event.first, rows = event.rows, page = event.page, "table page");
        notify(self.options.on_page.as_ref(), event);
    }

    pub fn on_sort(&self, event: &SortEvent) {
        self.state.update(|s| {
            s.sort_field.clone_from(&event.sort_field);
            s.sort_order = event.sort_order;
        });
        notify(self.options.on_sort.as_ref(), event);
    }

    /// Apply new filters and jump back to the first page.
    pub fn on_filter(&self, event: &FilterEvent) {
        self.state.update(|s| {
            s.filters.clone_from(&event.filters);
            s.first = 0;
            s.current_page = 1;
        });
        notify(self.options.on_filter.as_ref(), event);
    }

    pub fn on_row_select(&self, event: &RowEvent<R>) {
        self.state.update_if(|s| {
            if s.selected_items.contains(&event.data) {
                return false;
            }
            s.selected_items.push(event.data.clone());
            true
        });
        notify(self.options.on_row_select.as_ref(), event);
    }

    pub fn on_row_unselect(&self, event: &RowEvent<R>) {
        self.state.update_if(|s| {
            let before = s.selected_items.len();
            s.selected_items.retain(|item| item != &event.data);
            s.selected_items.len() != before
        });
        notify(self.options.on_row_unselect.as_ref(), event);
    }

    pub fn on_row_expand(&self, event: &RowEvent<R>) {
        let key = event.data.row_key();
        self.state.update(|s| {
            s.expanded_rows.insert(key, true);
        });
        notify(self.options.on_row_expand.as_ref(), event);
    }

    pub fn on_row_collapse(&self, event: &RowEvent<R>) {
        let key = event.data.row_key();
        self.state.update_if(|s| s.expanded_rows.remove(&key).is_some());
        notify(self.options.on_row_collapse.as_ref(), event);
    }

    /// Replace the rows. `total` is the server-side count when paging remotely;
    /// without it the row count is used.
    pub fn set_data(&self, rows: Vec<R>, total: Option<usize>) {
        self.state.update(|s| {
            s.total_records = total.unwrap_or(rows.len());
            s.rows = rows;
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.update_if(|s| {
            let changed = s.loading != loading;
            s.loading = loading;
            changed
        });
    }

    pub fn clear_selection(&self) {
        self.state.update_if(|s| {
            let had_any = !s.selected_items.is_empty();
            s.selected_items.clear();
            had_any
        });
    }

    /// Ask the rendered grid to export itself. Does nothing without a grid.
    pub fn export_csv(&self, grid: Option<&dyn CsvExport>) {
        if let Some(grid) = grid {
            grid.export_csv();
        }
    }
}

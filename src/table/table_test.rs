use std::sync::{Arc, Mutex, OnceLock};

use serde_json::json;
use tokio::sync::watch;

use super::*;
use crate::sektor::SektorRecord;
use crate::table::types::Filters;

fn record(id: &str) -> SektorRecord {
    SektorRecord::new(id, serde_json::Map::new())
}

fn rows(n: usize) -> Vec<SektorRecord> {
    (1..=n).map(|i| record(&i.to_string())).collect()
}

struct Recorder<E> {
    events: Mutex<Vec<E>>,
}

impl<E> Default for Recorder<E> {
    fn default() -> Self {
        Self { events: Mutex::new(Vec::new()) }
    }
}

impl<E: Clone> Recorder<E> {
    fn push(&self, event: &E) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn new_uses_option_defaults() {
    let table: Table<SektorRecord> = Table::new(TableOptions::default());
    let state = table.state().get();
    assert_eq!(state.page_size, 10);
    assert_eq!(state.rows_per_page_options, vec![5, 10, 20, 50]);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.sort_field, None);
    assert_eq!(state.sort_order, SortOrder::Unsorted);
}

#[test]
fn new_applies_options() {
    let table: Table<SektorRecord> = Table::new(
        TableOptions::default()
            .with_rows(25)
            .with_rows_per_page_options(vec![25, 100])
            .with_sort("name", SortOrder::Descending),
    );
    let state = table.state().get();
    assert_eq!(state.page_size, 25);
    assert_eq!(state.rows_per_page_options, vec![25, 100]);
    assert_eq!(state.sort_field.as_deref(), Some("name"));
    assert_eq!(state.sort_order, SortOrder::Descending);
}

// =============================================================================
// DATA
// =============================================================================

#[test]
fn set_data_without_total_counts_rows() {
    let table = Table::new(TableOptions::default());
    table.set_data(rows(3), None);
    let state = table.state().get();
    assert_eq!(state.rows.len(), 3);
    assert_eq!(state.total_records, 3);
}

#[test]
fn set_data_with_server_total() {
    let table = Table::new(TableOptions::default());
    table.set_data(rows(10), Some(42));
    assert_eq!(table.state().with(|s| s.total_records), 42);
    assert_eq!(table.total_pages(), 5);
    assert_eq!(table.paginator_info(), PaginatorInfo { start: 1, end: 10, total: 42 });
}

#[test]
fn set_loading_toggles_flag() {
    let table: Table<SektorRecord> = Table::new(TableOptions::default());
    table.set_loading(true);
    assert!(table.state().with(|s| s.loading));
    table.set_loading(false);
    assert!(!table.state().with(|s| s.loading));
}

// =============================================================================
// PAGING / SORTING / FILTERING
// =============================================================================

#[test]
fn on_page_updates_offsets_and_calls_back() {
    let seen = Arc::new(Recorder::<PageEvent>::default());
    let sink = Arc::clone(&seen);
    let table: Table<SektorRecord> = Table::new(TableOptions::default().on_page(move |e| sink.push(e)));
    table.set_data(rows(10), Some(95));

    let event = PageEvent { first: 40, rows: 20, page: 2 };
    table.on_page(&event);

    let state = table.state().get();
    assert_eq!(state.first, 40);
    assert_eq!(state.page_size, 20);
    assert_eq!(state.current_page, 3);
    assert_eq!(table.paginator_info(), PaginatorInfo { start: 41, end: 60, total: 95 });
    assert_eq!(seen.take(), vec![event]);
}

#[test]
fn on_sort_sets_field_and_order() {
    let seen = Arc::new(Recorder::<SortEvent>::default());
    let sink = Arc::clone(&seen);
    let table: Table<SektorRecord> = Table::new(TableOptions::default().on_sort(move |e| sink.push(e)));

    let event = SortEvent { sort_field: Some("name".into()), sort_order: SortOrder::from_i8(-1) };
    table.on_sort(&event);
    assert_eq!(table.state().with(|s| s.sort_field.clone()), Some("name".into()));
    assert_eq!(table.state().with(|s| s.sort_order), SortOrder::Descending);

    let cleared = SortEvent { sort_field: None, sort_order: SortOrder::Unsorted };
    table.on_sort(&cleared);
    assert_eq!(table.state().with(|s| s.sort_field.clone()), None);
    assert_eq!(seen.take(), vec![event, cleared]);
}

#[test]
fn on_filter_resets_to_first_page() {
    let seen = Arc::new(Recorder::<FilterEvent>::default());
    let sink = Arc::clone(&seen);
    let table: Table<SektorRecord> = Table::new(TableOptions::default().on_filter(move |e| sink.push(e)));
    table.on_page(&PageEvent { first: 30, rows: 10, page: 3 });

    let mut filters = Filters::new();
    filters.insert("name".into(), json!({ "value": "pika", "matchMode": "contains" }));
    let event = FilterEvent { filters: filters.clone() };
    table.on_filter(&event);

    let state = table.state().get();
    assert_eq!(state.filters, filters);
    assert_eq!(state.first, 0);
    assert_eq!(state.current_page, 1);
    assert_eq!(seen.take(), vec![event]);
}

#[test]
fn on_filter_resets_even_with_same_filters() {
    let table: Table<SektorRecord> = Table::new(TableOptions::default());
    let event = FilterEvent { filters: Filters::new() };
    table.on_page(&PageEvent { first: 10, rows: 10, page: 1 });
    table.on_filter(&event);
    assert_eq!(table.state().with(|s| (s.first, s.current_page)), (0, 1));
}

#[test]
fn callback_sees_updated_state() {
    let rx: Arc<OnceLock<watch::Receiver<TableState<SektorRecord>>>> = Arc::new(OnceLock::new());
    let observed = Arc::new(Mutex::new(None));
    let (rx_cb, observed_cb) = (Arc::clone(&rx), Arc::clone(&observed));
    let table = Table::new(TableOptions::default().on_page(move |_| {
        let page = rx_cb.get().map(|rx| rx.borrow().current_page);
        *observed_cb.lock().unwrap() = page;
    }));
    rx.set(table.state().subscribe()).unwrap();

    table.on_page(&PageEvent { first: 10, rows: 10, page: 1 });
    assert_eq!(*observed.lock().unwrap(), Some(2));
}

#[test]
fn handlers_without_callbacks_only_update_state() {
    let table: Table<SektorRecord> = Table::new(TableOptions::default());
    table.on_page(&PageEvent { first: 5, rows: 5, page: 1 });
    table.on_sort(&SortEvent { sort_field: Some("id".into()), sort_order: SortOrder::Ascending });
    let state = table.state().get();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.sort_order, SortOrder::Ascending);
}

#[test]
fn on_page_show_all_rows_does_not_overflow() {
    let table = Table::new(TableOptions::default());
    table.set_data(rows(3), None);
    table.on_page(&PageEvent { first: 1, rows: usize::MAX, page: 0 });

    assert_eq!(table.paginator_info(), PaginatorInfo { start: 2, end: 3, total: 3 });
    assert_eq!(table.total_pages(), 1);

    table.on_page(&PageEvent { first: 0, rows: 10, page: usize::MAX });
    assert_eq!(table.state().with(|s| s.current_page), usize::MAX);
}

#[test]
fn sort_order_numeric_encoding() {
    for raw in [1, -1, 0] {
        assert_eq!(SortOrder::from_i8(raw).as_i8(), raw);
    }
    assert_eq!(SortOrder::from_i8(5), SortOrder::Ascending);
    assert_eq!(SortOrder::from_i8(-7).as_i8(), -1);
}

// =============================================================================
// SELECTION / EXPANSION
// =============================================================================

#[test]
fn select_and_unselect_rows() {
    let selected = Arc::new(Recorder::<RowEvent<SektorRecord>>::default());
    let unselected = Arc::new(Recorder::<RowEvent<SektorRecord>>::default());
    let (s, u) = (Arc::clone(&selected), Arc::clone(&unselected));
    let table = Table::new(
        TableOptions::default()
            .on_row_select(move |e| s.push(e))
            .on_row_unselect(move |e| u.push(e)),
    );
    table.set_data(rows(3), None);

    let first = RowEvent { data: record("1"), index: 0 };
    let second = RowEvent { data: record("2"), index: 1 };
    table.on_row_select(&first);
    table.on_row_select(&second);
    table.on_row_select(&first);
    assert_eq!(table.state().with(|s| s.selected_items.clone()), vec![record("1"), record("2")]);
    assert_eq!(selected.take().len(), 3);

    table.on_row_unselect(&first);
    assert_eq!(table.state().with(|s| s.selected_items.clone()), vec![record("2")]);
    assert_eq!(unselected.take(), vec![first]);

    table.clear_selection();
    assert!(table.state().with(|s| s.selected_items.is_empty()));
}

#[test]
fn expand_and_collapse_rows() {
    let expanded = Arc::new(Recorder::<RowEvent<SektorRecord>>::default());
    let collapsed = Arc::new(Recorder::<RowEvent<SektorRecord>>::default());
    let (e, c) = (Arc::clone(&expanded), Arc::clone(&collapsed));
    let table = Table::new(
        TableOptions::default()
            .on_row_expand(move |ev| e.push(ev))
            .on_row_collapse(move |ev| c.push(ev)),
    );

    let event = RowEvent { data: record("7"), index: 0 };
    table.on_row_expand(&event);
    assert!(table.state().with(|s| s.is_expanded("7")));

    table.on_row_collapse(&event);
    assert!(!table.state().with(|s| s.is_expanded("7")));
    assert_eq!(expanded.take(), vec![event.clone()]);
    assert_eq!(collapsed.take(), vec![event]);
}

// =============================================================================
// EXPORT
// =============================================================================

#[derive(Default)]
struct CountingGrid {
    exports: Mutex<usize>,
}

impl CsvExport for CountingGrid {
    fn export_csv(&self) {
        *self.exports.lock().unwrap() += 1;
    }
}

#[test]
fn export_csv_delegates_to_grid() {
    let table: Table<SektorRecord> = Table::new(TableOptions::default());
    let grid = CountingGrid::default();
    table.export_csv(Some(&grid));
    table.export_csv(Some(&grid));
    assert_eq!(*grid.exports.lock().unwrap(), 2);
}

#[test]
fn export_csv_without_grid_is_noop() {
    let table: Table<SektorRecord> = Table::new(TableOptions::default());
    table.export_csv(None);
    assert_eq!(table.state().with(|s| s.rows.len()), 0);
}

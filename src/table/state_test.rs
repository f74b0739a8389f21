use super::*;

fn state_with(total_records: usize, page_size: usize, first: usize) -> TableState<u32> {
    TableState { total_records, page_size, first, ..TableState::default() }
}

#[test]
fn defaults() {
    let state: TableState<u32> = TableState::default();
    assert_eq!(state.page_size, 10);
    assert_eq!(state.first, 0);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.rows_per_page_options, vec![5, 10, 20, 50]);
    assert_eq!(state.sort_order, SortOrder::Unsorted);
    assert!(state.filters.is_empty());
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(state_with(95, 10, 0).total_pages(), 10);
    assert_eq!(state_with(100, 10, 0).total_pages(), 10);
    assert_eq!(state_with(101, 10, 0).total_pages(), 11);
    assert_eq!(state_with(1, 50, 0).total_pages(), 1);
}

#[test]
fn total_pages_zero_when_empty_or_unpaged() {
    assert_eq!(state_with(0, 10, 0).total_pages(), 0);
    assert_eq!(state_with(25, 0, 0).total_pages(), 0);
}

#[test]
fn paginator_info_first_page() {
    assert_eq!(state_with(42, 10, 0).paginator_info(), PaginatorInfo { start: 1, end: 10, total: 42 });
}

#[test]
fn paginator_info_last_partial_page() {
    assert_eq!(state_with(42, 10, 40).paginator_info(), PaginatorInfo { start: 41, end: 42, total: 42 });
}

#[test]
fn paginator_info_empty() {
    assert_eq!(state_with(0, 10, 0).paginator_info(), PaginatorInfo { start: 0, end: 0, total: 0 });
}

#[test]
fn is_expanded_defaults_false() {
    let mut state: TableState<u32> = TableState::default();
    assert!(!state.is_expanded("1"));
    state.expanded_rows.insert("1".into(), true);
    assert!(state.is_expanded("1"));
}

#[test]
fn paginator_info_show_all_page_size() {
    assert_eq!(state_with(3, usize::MAX, 1).paginator_info(), PaginatorInfo { start: 2, end: 3, total: 3 });
    assert_eq!(state_with(3, usize::MAX, 0).total_pages(), 1);
}

#[test]
fn paginator_info_offset_at_limit() {
    let info = state_with(7, 10, usize::MAX).paginator_info();
    assert_eq!(info, PaginatorInfo { start: usize::MAX, end: 7, total: 7 });
}

//! Pagination, sort, filter, and selection state for a data grid.

pub mod state;
#[allow(clippy::module_inception)]
pub mod table;
pub mod types;

pub use state::TableState;
pub use table::{Handler, Table, TableOptions};
pub use types::{CsvExport, FilterEvent, Filters, PageEvent, PaginatorInfo, RowEvent, SortEvent, SortOrder, TableRow};

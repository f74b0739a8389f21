//! Data-grid events and row capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pokemon::PokemonSummary;
use crate::sektor::SektorRecord;

/// Column filters keyed by field name. Values are whatever the grid emits.
pub type Filters = BTreeMap<String, Value>;

/// A row the grid can track for expansion.
pub trait TableRow {
    /// Stable identity used as the `expanded_rows` key.
    fn row_key(&self) -> String;
}

impl TableRow for SektorRecord {
    fn row_key(&self) -> String {
        self.id.clone()
    }
}

impl TableRow for PokemonSummary {
    fn row_key(&self) -> String {
        if self.id.is_empty() { self.name.clone() } else { self.id.clone() }
    }
}

/// Handle to a rendered grid that can export its own contents.
pub trait CsvExport {
    fn export_csv(&self);
}

/// Grid sort direction, with the grid's numeric encoding (`1`, `-1`, `0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    Unsorted,
}

impl SortOrder {
    #[must_use]
    pub fn from_i8(raw: i8) -> Self {
        match raw.signum() {
            1 => Self::Ascending,
            -1 => Self::Descending,
            _ => Self::Unsorted,
        }
    }

    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
            Self::Unsorted => 0,
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Paginator change. `page` is zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEvent {
    pub first: usize,
    pub rows: usize,
    pub page: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortEvent {
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterEvent {
    pub filters: Filters,
}

/// Row selection or expansion change.
#[derive(Clone, Debug, PartialEq)]
pub struct RowEvent<R> {
    pub data: R,
    pub index: usize,
}

/// "Showing `start` to `end` of `total`". `start` is one-based, 0 when empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaginatorInfo {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

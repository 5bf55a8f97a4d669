//! Core data types shared across the grid modules.

mod column;
mod row;
mod sort;

pub use column::{Column, ColumnRegistry, ColumnRole};
pub use row::{FieldType, Row, RowId, MISSING_VALUE};
pub use sort::{SortDirection, SortState};

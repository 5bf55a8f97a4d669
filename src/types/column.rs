//! Column model and registry.
//!
//! Columns are configured once per grid instance; their set is stable for
//! the session while visibility and order are mutable view state. Structural
//! columns (selection, menu) carry a first-class role and are pinned
//! selection-first and menu-last, outside order/visibility logic entirely.

use std::fmt;

use crate::error::{GridError, Result};
use crate::render::{CellRenderer, HeaderRenderer};
use crate::types::FieldType;

/// What a column contributes to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnRole {
    /// Ordinary business data column.
    #[default]
    Data,
    /// Structural selection-checkbox column, pinned first.
    Selection,
    /// Structural settings/menu column, pinned last.
    Menu,
}

/// One column definition.
///
/// Renderers are optional; without them a header renders its label and a
/// cell renders the accessed field via [`Row::display`](crate::Row::display).
pub struct Column {
    id: String,
    label: String,
    field: String,
    role: ColumnRole,
    sortable: bool,
    field_type: FieldType,
    broadcast: bool,
    header_renderer: Option<Box<dyn HeaderRenderer>>,
    cell_renderer: Option<Box<dyn CellRenderer>>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("field", &self.field)
            .field("role", &self.role)
            .field("sortable", &self.sortable)
            .field("field_type", &self.field_type)
            .field("broadcast", &self.broadcast)
            .finish_non_exhaustive()
    }
}

impl Column {
    /// Create a data column whose id, accessor field, and label all derive
    /// from `field`.
    pub fn data(field: impl Into<String>) -> Self {
        let field = field.into();
        Column {
            id: field.clone(),
            label: field.clone(),
            field,
            role: ColumnRole::Data,
            sortable: false,
            field_type: FieldType::Text,
            broadcast: false,
            header_renderer: None,
            cell_renderer: None,
        }
    }

    /// Create a structural column (used by the column factories).
    pub(crate) fn structural(id: &str, role: ColumnRole) -> Self {
        Column {
            id: id.to_string(),
            label: String::new(),
            field: String::new(),
            role,
            sortable: false,
            field_type: FieldType::Text,
            broadcast: false,
            header_renderer: None,
            cell_renderer: None,
        }
    }

    /// Override the display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark the column sortable.
    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Declare the field type (used by broadcast input parsing).
    #[must_use]
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Supply a custom header renderer.
    #[must_use]
    pub fn header_renderer(mut self, renderer: impl HeaderRenderer + 'static) -> Self {
        self.header_renderer = Some(Box::new(renderer));
        self
    }

    /// Supply a custom cell renderer.
    #[must_use]
    pub fn cell_renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.cell_renderer = Some(Box::new(renderer));
        self
    }

    pub(crate) fn set_broadcast(&mut self, broadcast: bool) {
        self.broadcast = broadcast;
    }

    /// Unique column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Accessor field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Structural role.
    pub fn role(&self) -> ColumnRole {
        self.role
    }

    /// Whether header clicks toggle sorting.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Declared field type.
    pub fn declared_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the header offers a broadcast input surface.
    pub fn is_broadcast(&self) -> bool {
        self.broadcast
    }

    pub(crate) fn header(&self) -> Option<&dyn HeaderRenderer> {
        self.header_renderer.as_deref()
    }

    pub(crate) fn cell(&self) -> Option<&dyn CellRenderer> {
        self.cell_renderer.as_deref()
    }
}

/// The registered columns of one grid, pinned order applied at registration:
/// selection column first, data columns in configuration order, menu column
/// last.
#[derive(Debug, Default)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
}

impl ColumnRegistry {
    /// Build a registry from configured columns, enforcing unique ids and
    /// structural pinning.
    ///
    /// # Errors
    /// Returns [`GridError::DuplicateColumn`] if two columns share an id.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for col in &columns {
            if !seen.insert(col.id().to_string()) {
                return Err(GridError::DuplicateColumn(col.id().to_string()));
            }
        }

        let mut selection = Vec::new();
        let mut data = Vec::new();
        let mut menu = Vec::new();
        for col in columns {
            match col.role() {
                ColumnRole::Selection => selection.push(col),
                ColumnRole::Data => data.push(col),
                ColumnRole::Menu => menu.push(col),
            }
        }
        let mut ordered = selection;
        ordered.extend(data);
        ordered.extend(menu);
        Ok(ColumnRegistry { columns: ordered })
    }

    /// All columns in pinned registry order.
    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by id.
    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Ids of data-role columns in registry order. Structural columns never
    /// participate in visibility or ordering.
    pub fn data_column_ids(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.role() == ColumnRole::Data)
            .map(|c| c.id().to_string())
            .collect()
    }

    /// Whether an id names a registered column.
    pub fn contains(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id() == id)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_pins_structural_columns() {
        let registry = ColumnRegistry::new(vec![
            Column::data("name"),
            Column::structural("__menu", ColumnRole::Menu),
            Column::structural("__select", ColumnRole::Selection),
            Column::data("age"),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.all().iter().map(Column::id).collect();
        assert_eq!(ids, ["__select", "name", "age", "__menu"]);
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let err = ColumnRegistry::new(vec![Column::data("name"), Column::data("name")])
            .unwrap_err();
        assert!(matches!(err, GridError::DuplicateColumn(id) if id == "name"));
    }

    #[test]
    fn test_data_column_ids_exclude_structural() {
        let registry = ColumnRegistry::new(vec![
            Column::structural("__select", ColumnRole::Selection),
            Column::data("id"),
            Column::data("name"),
            Column::structural("__menu", ColumnRole::Menu),
        ])
        .unwrap();
        assert_eq!(registry.data_column_ids(), ["id", "name"]);
    }
}

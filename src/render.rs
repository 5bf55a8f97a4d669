//! Render seam between the grid core and the host's rendering technology.
//!
//! The grid never draws anything. One render pass produces a tree of [`Ui`]
//! values, a small tagged union a host can map onto DOM nodes, terminal
//! cells, or anything else. Hosts may override how individual headers and
//! cells project into that union via the renderer traits below.

use crate::selection::CheckState;
use crate::types::Row;

/// A renderable fragment produced by the grid.
///
/// This is deliberately minimal: just enough structure for a host to wire
/// up real widgets, and for tests to assert on without a rendering stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Ui {
    /// Nothing to render.
    Empty,
    /// Plain text (cell values, header labels).
    Text(String),
    /// Per-row selection checkbox.
    Checkbox {
        /// Whether the row is selected.
        checked: bool,
        /// Whether the checkbox can be toggled right now (cap semantics).
        enabled: bool,
    },
    /// Header select-all checkbox with tri-state rendering.
    HeaderCheckbox(CheckState),
    /// Per-row trigger that opens the row's context menu.
    MenuTrigger,
    /// Header trigger that opens the column settings surface.
    SettingsTrigger,
    /// A text input surface (broadcast column header).
    Input {
        /// Current input buffer contents.
        buffer: String,
    },
    /// Several fragments rendered together (e.g. label + input surface).
    Group(Vec<Ui>),
}

impl Ui {
    /// Build a text fragment.
    pub fn text(s: impl Into<String>) -> Self {
        Ui::Text(s.into())
    }
}

/// Everything a header renderer may consult for one column.
#[derive(Debug, Clone)]
pub struct HeaderContext {
    /// The column's id.
    pub column_id: String,
    /// The column's display label.
    pub label: String,
    /// Whether clicking this header toggles sorting.
    pub sortable: bool,
    /// Whether this column is the active sort column.
    pub is_sorted: bool,
    /// Whether the active sort is descending (false when unsorted).
    pub is_sorted_desc: bool,
    /// Aggregate selection state over visible rows, `None` when select-all
    /// is disabled by a selection cap (selection column only).
    pub select_all: Option<CheckState>,
    /// Open broadcast input buffer, if this column's surface is open.
    pub broadcast_input: Option<String>,
}

/// Everything a cell renderer may consult for one row/column pair.
#[derive(Debug, Clone)]
pub struct CellContext {
    /// The column's id.
    pub column_id: String,
    /// Whether the row is selected.
    pub selected: bool,
    /// Whether the row can be toggled right now.
    pub selectable: bool,
    /// Whether the row's context menu is open.
    pub menu_open: bool,
}

/// Host-supplied header projection.
///
/// Implemented for closures, so `|ctx: &HeaderContext| Ui::text(...)` works
/// directly as a renderer.
pub trait HeaderRenderer {
    /// Project a header into a [`Ui`] fragment.
    fn render_header(&self, ctx: &HeaderContext) -> Ui;
}

impl<F> HeaderRenderer for F
where
    F: Fn(&HeaderContext) -> Ui,
{
    fn render_header(&self, ctx: &HeaderContext) -> Ui {
        self(ctx)
    }
}

/// Host-supplied cell projection.
pub trait CellRenderer {
    /// Project one row's cell into a [`Ui`] fragment.
    fn render_cell(&self, row: &Row, ctx: &CellContext) -> Ui;
}

impl<F> CellRenderer for F
where
    F: Fn(&Row, &CellContext) -> Ui,
{
    fn render_cell(&self, row: &Row, ctx: &CellContext) -> Ui {
        self(row, ctx)
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
    use std::collections::BTreeMap;

    #[test]
    fn test_closure_renderers() {
        let header = |ctx: &HeaderContext| Ui::text(ctx.label.to_uppercase());
        let cell = |row: &Row, _ctx: &CellContext| Ui::text(row.display("name"));

        let hctx = HeaderContext {
            column_id: "name".to_string(),
            label: "Name".to_string(),
            sortable: true,
            is_sorted: false,
            is_sorted_desc: false,
            select_all: Some(CheckState::None),
            broadcast_input: None,
        };
        assert_eq!(header.render_header(&hctx), Ui::text("NAME"));

        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), serde_json::json!("Ada"));
        let row = Row::with_id(1, fields);
        let cctx = CellContext {
            column_id: "name".to_string(),
            selected: false,
            selectable: true,
            menu_open: false,
        };
        assert_eq!(cell.render_cell(&row, &cctx), Ui::text("Ada"));
    }
}

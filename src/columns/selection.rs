//! Selection column factory.

use crate::render::{CellContext, HeaderContext, Ui};
use crate::types::{Column, ColumnRole, Row};

/// Id of the structural selection column.
pub const SELECTION_COLUMN_ID: &str = "__selection";

/// Build the structural selection column.
///
/// The header renders a select-all checkbox, omitted entirely when a
/// selection cap is configured (the orchestrator passes `select_all: None`
/// in that case). The cell renders a per-row checkbox whose enabled state
/// follows the cap semantics. Never sortable; checkbox events do not
/// propagate to row-level handlers.
pub fn selection_column() -> Column {
    Column::structural(SELECTION_COLUMN_ID, ColumnRole::Selection)
        .header_renderer(|ctx: &HeaderContext| match ctx.select_all {
            Some(state) => Ui::HeaderCheckbox(state),
            None => Ui::Empty,
        })
        .cell_renderer(|_row: &Row, ctx: &CellContext| Ui::Checkbox {
            checked: ctx.selected,
            enabled: ctx.selectable,
        })
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
    use crate::selection::CheckState;

    fn header_ctx(select_all: Option<CheckState>) -> HeaderContext {
        HeaderContext {
            column_id: SELECTION_COLUMN_ID.to_string(),
            label: String::new(),
            sortable: false,
            is_sorted: false,
            is_sorted_desc: false,
            select_all,
            broadcast_input: None,
        }
    }

    #[test]
    fn test_header_checkbox_follows_check_state() {
        let col = selection_column();
        let header = col.header().unwrap();
        assert_eq!(
            header.render_header(&header_ctx(Some(CheckState::Some))),
            Ui::HeaderCheckbox(CheckState::Some)
        );
    }

    #[test]
    fn test_header_omitted_when_capped() {
        let col = selection_column();
        let header = col.header().unwrap();
        assert_eq!(header.render_header(&header_ctx(None)), Ui::Empty);
    }

    #[test]
    fn test_not_sortable() {
        assert!(!selection_column().is_sortable());
        assert_eq!(selection_column().role(), ColumnRole::Selection);
    }
}

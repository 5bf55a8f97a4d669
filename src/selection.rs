//! Multi-row selection with an optional cap.
//!
//! The controller tracks selected row ids and enforces `max_select` as a
//! hard invariant: with a cap of `k > 0` the selected set never exceeds `k`
//! entries, select-all is disabled entirely, and at the cap only
//! deselection is possible.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{Row, RowId};

/// Aggregate selection state over the visible rows, for rendering the
/// header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    /// No visible row is selected.
    #[default]
    None,
    /// Some, but not all, visible rows are selected (indeterminate).
    Some,
    /// Every visible row is selected.
    All,
}

/// Tracks which rows are selected and enforces the selection cap.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: HashSet<RowId>,
    /// Maximum number of selected rows; `0` means unlimited.
    max_select: usize,
}

impl SelectionController {
    /// Create a controller with the given cap (`0` = unlimited).
    pub fn new(max_select: usize) -> Self {
        SelectionController {
            selected: HashSet::new(),
            max_select,
        }
    }

    /// The configured cap (`0` = unlimited).
    pub fn max_select(&self) -> usize {
        self.max_select
    }

    /// Whether select-all is available. An unbounded "select all" cannot
    /// satisfy a cap, so any cap disables it outright.
    pub fn allows_select_all(&self) -> bool {
        self.max_select == 0
    }

    /// Whether the given row can be toggled right now.
    ///
    /// Selected rows are always toggleable (deselection must stay possible
    /// at the cap); unselected rows are toggleable unless the cap is
    /// reached.
    pub fn is_row_selectable(&self, id: &RowId) -> bool {
        self.selected.contains(id)
            || self.max_select == 0
            || self.selected.len() < self.max_select
    }

    /// Whether the given row is currently selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Number of currently selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether no row is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle a single row. Returns `true` if the selection changed.
    ///
    /// Selecting past the cap is a no-op.
    pub fn toggle_row(&mut self, id: &RowId) -> bool {
        if self.selected.contains(id) {
            self.selected.remove(id);
            debug!(row = %id, selected = self.selected.len(), "row deselected");
            return true;
        }
        if !self.is_row_selectable(id) {
            return false;
        }
        self.selected.insert(id.clone());
        debug!(row = %id, selected = self.selected.len(), "row selected");
        true
    }

    /// Toggle all visible rows: select every visible row unless all are
    /// already selected, in which case deselect them.
    ///
    /// Disabled (no-op, returns `false`) when a cap is configured.
    pub fn toggle_all(&mut self, visible: &[RowId]) -> bool {
        if !self.allows_select_all() || visible.is_empty() {
            return false;
        }
        if self.check_state(visible) == CheckState::All {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            for id in visible {
                self.selected.insert(id.clone());
            }
        }
        debug!(selected = self.selected.len(), "toggled all visible rows");
        true
    }

    /// Aggregate state over the visible rows, for header rendering.
    pub fn check_state(&self, visible: &[RowId]) -> CheckState {
        if visible.is_empty() {
            return CheckState::None;
        }
        let count = visible
            .iter()
            .filter(|id| self.selected.contains(*id))
            .count();
        if count == 0 {
            CheckState::None
        } else if count == visible.len() {
            CheckState::All
        } else {
            CheckState::Some
        }
    }

    /// Selected rows, in the order they appear in `all_rows`.
    ///
    /// Selection decisions (bulk actions) belong to the host, so rows are
    /// handed back by value-reference in table order.
    pub fn selected_rows<'a>(&self, all_rows: &'a [Row]) -> Vec<&'a Row> {
        all_rows
            .iter()
            .filter(|row| self.selected.contains(row.id()))
            .collect()
    }

    /// Clear the selection. Called when the underlying row set identity
    /// changes so no stale ids survive a page navigation.
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            debug!(dropped = self.selected.len(), "selection cleared");
            self.selected.clear();
        }
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

    fn ids(raw: &[i64]) -> Vec<RowId> {
        raw.iter().map(|&n| RowId::Int(n)).collect()
    }

    #[test]
    fn test_unbounded_toggle() {
        let mut sel = SelectionController::new(0);
        assert!(sel.toggle_row(&RowId::Int(1)));
        assert!(sel.toggle_row(&RowId::Int(2)));
        assert_eq!(sel.len(), 2);
        assert!(sel.toggle_row(&RowId::Int(1)));
        assert_eq!(sel.len(), 1);
        assert!(sel.is_selected(&RowId::Int(2)));
    }

    #[test]
    fn test_cap_blocks_excess_selection() {
        let mut sel = SelectionController::new(2);
        assert!(sel.toggle_row(&RowId::Int(1)));
        assert!(sel.toggle_row(&RowId::Int(2)));
        // At the cap: row 3 is not selectable, and toggling it is a no-op.
        assert!(!sel.is_row_selectable(&RowId::Int(3)));
        assert!(!sel.toggle_row(&RowId::Int(3)));
        assert_eq!(sel.len(), 2);
        // Selected rows stay toggleable so deselection is always possible.
        assert!(sel.is_row_selectable(&RowId::Int(1)));
        assert!(sel.toggle_row(&RowId::Int(1)));
        // Freed capacity re-enables selection of others.
        assert!(sel.toggle_row(&RowId::Int(3)));
        assert_eq!(sel.len(), 2);
        assert!(sel.is_selected(&RowId::Int(2)));
        assert!(sel.is_selected(&RowId::Int(3)));
    }

    #[test]
    fn test_toggle_all_disabled_when_capped() {
        let mut sel = SelectionController::new(3);
        assert!(!sel.allows_select_all());
        assert!(!sel.toggle_all(&ids(&[1, 2])));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_all_round_trip() {
        let mut sel = SelectionController::new(0);
        let visible = ids(&[1, 2, 3]);
        assert!(sel.toggle_all(&visible));
        assert_eq!(sel.check_state(&visible), CheckState::All);
        assert!(sel.toggle_all(&visible));
        assert_eq!(sel.check_state(&visible), CheckState::None);
    }

    #[test]
    fn test_check_state_indeterminate() {
        let mut sel = SelectionController::new(0);
        let visible = ids(&[1, 2, 3]);
        sel.toggle_row(&RowId::Int(2));
        assert_eq!(sel.check_state(&visible), CheckState::Some);
    }

    #[test]
    fn test_toggle_all_completes_partial_selection() {
        let mut sel = SelectionController::new(0);
        let visible = ids(&[1, 2, 3]);
        sel.toggle_row(&RowId::Int(1));
        // Partial selection: toggle-all selects the remainder first.
        assert!(sel.toggle_all(&visible));
        assert_eq!(sel.check_state(&visible), CheckState::All);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut sel = SelectionController::new(0);
        sel.toggle_row(&RowId::Int(1));
        sel.clear();
        assert!(sel.is_empty());
    }
}

//! Per-row context-menu state.
//!
//! Each row owns exactly one menu state, created when the row mounts and
//! pruned when it unmounts. Menus across different rows are independent:
//! opening one never closes another, and several may be open at once.
//! Escape is a global dismiss, so hosts install their keyboard listener
//! only while [`RowMenus::escape_active`] is true.

use std::collections::HashMap;

use tracing::trace;

use crate::types::{Row, RowId};

/// Ephemeral visibility state of one row's context menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMenuState {
    visible: bool,
}

impl RowMenuState {
    /// Open the menu.
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Close the menu.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.visible
    }
}

/// One host-supplied context-menu action.
pub struct MenuEntry {
    /// Display label.
    pub label: String,
    /// Host-defined action discriminator (e.g. `"edit"`, `"delete"`).
    pub kind: String,
    /// Invoked with the row's full underlying data.
    pub handler: Box<dyn Fn(&Row)>,
}

impl MenuEntry {
    /// Build an entry.
    pub fn new(
        label: impl Into<String>,
        kind: impl Into<String>,
        handler: impl Fn(&Row) + 'static,
    ) -> Self {
        MenuEntry {
            label: label.into(),
            kind: kind.into(),
            handler: Box::new(handler),
        }
    }
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Menu states for all mounted rows, keyed by row id.
#[derive(Debug, Default)]
pub struct RowMenus {
    states: HashMap<RowId, RowMenuState>,
}

impl RowMenus {
    /// Create or reuse states for exactly the given rows, dropping states
    /// of rows that unmounted. Surviving rows keep their open/closed state.
    pub fn mount(&mut self, row_ids: &[RowId]) {
        let mut states = HashMap::with_capacity(row_ids.len());
        for id in row_ids {
            let state = self.states.remove(id).unwrap_or_default();
            states.insert(id.clone(), state);
        }
        self.states = states;
    }

    /// Open a row's menu. Unknown (unmounted) rows are ignored.
    pub fn open(&mut self, id: &RowId) {
        if let Some(state) = self.states.get_mut(id) {
            trace!(row = %id, "menu opened");
            state.open();
        }
    }

    /// Close a row's menu.
    pub fn close(&mut self, id: &RowId) {
        if let Some(state) = self.states.get_mut(id) {
            trace!(row = %id, "menu closed");
            state.close();
        }
    }

    /// Whether a row's menu is open.
    pub fn is_open(&self, id: &RowId) -> bool {
        self.states.get(id).is_some_and(RowMenuState::is_open)
    }

    /// Whether any menu is open. The host keeps its global Escape listener
    /// installed exactly while this is true, so listeners never leak across
    /// row lifecycles.
    pub fn escape_active(&self) -> bool {
        self.states.values().any(RowMenuState::is_open)
    }

    /// Escape pressed: close every open menu.
    pub fn handle_escape(&mut self) {
        for state in self.states.values_mut() {
            state.close();
        }
    }

    /// A click landed outside the given row's menu region: close it.
    pub fn handle_outside_click(&mut self, id: &RowId) {
        self.close(id);
    }

    /// Invoke a menu entry for a row, passing the full row data, then close
    /// that row's menu unconditionally. The handler is not awaited; an
    /// asynchronous handler runs on its own.
    pub fn invoke(&mut self, entry: &MenuEntry, row: &Row) {
        trace!(row = %row.id(), action = %entry.kind, "menu action invoked");
        (entry.handler)(row);
        self.close(row.id());
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
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn ids(raw: &[i64]) -> Vec<RowId> {
        raw.iter().map(|&n| RowId::Int(n)).collect()
    }

    #[test]
    fn test_menus_are_independent_per_row() {
        let mut menus = RowMenus::default();
        menus.mount(&ids(&[1, 2, 3]));

        menus.open(&RowId::Int(1));
        menus.open(&RowId::Int(3));
        assert!(menus.is_open(&RowId::Int(1)));
        assert!(!menus.is_open(&RowId::Int(2)));
        assert!(menus.is_open(&RowId::Int(3)));

        // Closing one row leaves the other row's menu open.
        menus.handle_outside_click(&RowId::Int(1));
        assert!(!menus.is_open(&RowId::Int(1)));
        assert!(menus.is_open(&RowId::Int(3)));
    }

    #[test]
    fn test_escape_listener_lifecycle() {
        let mut menus = RowMenus::default();
        menus.mount(&ids(&[1, 2]));
        assert!(!menus.escape_active());

        menus.open(&RowId::Int(2));
        assert!(menus.escape_active());

        menus.handle_escape();
        assert!(!menus.escape_active());
        assert!(!menus.is_open(&RowId::Int(2)));
    }

    #[test]
    fn test_mount_prunes_unmounted_rows() {
        let mut menus = RowMenus::default();
        menus.mount(&ids(&[1, 2]));
        menus.open(&RowId::Int(1));
        menus.open(&RowId::Int(2));

        // Row 2 unmounts; row 1 keeps its state.
        menus.mount(&ids(&[1, 3]));
        assert!(menus.is_open(&RowId::Int(1)));
        assert!(!menus.is_open(&RowId::Int(2)));
        menus.open(&RowId::Int(2));
        assert!(!menus.is_open(&RowId::Int(2)));
    }

    #[test]
    fn test_invoke_passes_row_and_closes() {
        let mut menus = RowMenus::default();
        menus.mount(&ids(&[1]));
        menus.open(&RowId::Int(1));

        let seen: Rc<RefCell<Vec<RowId>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let entry = MenuEntry::new("Delete", "delete", move |row: &Row| {
            sink.borrow_mut().push(row.id().clone());
        });

        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), serde_json::json!("Ada"));
        let row = Row::with_id(1, fields);

        menus.invoke(&entry, &row);
        assert_eq!(seen.borrow().as_slice(), [RowId::Int(1)]);
        assert!(!menus.is_open(&RowId::Int(1)));
    }
}

//! Single-column sort state machine.
//!
//! Sorting is server-driven: the controller only advances state and
//! notifies the host with the encoded sort key so it can refetch. It never
//! touches row data.

use tracing::debug;

use crate::types::{Column, SortDirection, SortState};

/// Host notification fired on every sort-state change, carrying the wire
/// encoding (`"col"`, `"-col"`, or `None`). Fire-and-forget; the grid does
/// not wait for the refetch.
pub type SortChangeFn = Box<dyn Fn(Option<&str>)>;

/// Tracks the active sort column and direction.
#[derive(Default)]
pub struct SortController {
    state: SortState,
    /// Globally disables header-click sorting (`disable_sort_by`).
    disabled: bool,
    on_change: Option<SortChangeFn>,
}

impl SortController {
    /// Create a controller, optionally seeded from a wire-encoded initial
    /// sort. Seeding does not fire `on_change`: the host already knows the
    /// key it configured.
    pub fn new(disabled: bool, initial_sort_by: Option<&str>) -> Self {
        let state = initial_sort_by
            .and_then(SortState::decode)
            .unwrap_or_default();
        SortController {
            state,
            disabled,
            on_change: None,
        }
    }

    /// Register the host's change notification.
    pub fn on_change(&mut self, callback: SortChangeFn) {
        self.on_change = Some(callback);
    }

    /// Current sort state.
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Wire encoding of the current state.
    pub fn encode_for_server(&self) -> Option<String> {
        self.state.encode_for_server()
    }

    /// Whether the given column is the active sort column.
    pub fn is_sorted(&self, column_id: &str) -> bool {
        matches!(self.state.active(), Some((id, _)) if id == column_id)
    }

    /// Whether the given column is actively sorted descending.
    pub fn is_sorted_desc(&self, column_id: &str) -> bool {
        matches!(
            self.state.active(),
            Some((id, SortDirection::Descending)) if id == column_id
        )
    }

    /// Advance the sort state for a clicked column header.
    ///
    /// A different column replaces the prior sort, starting ascending. The
    /// already-sorted column cycles `Ascending -> Descending -> unsorted`.
    /// No-op for unsortable columns and when sorting is globally disabled.
    pub fn toggle(&mut self, column: &Column) {
        if self.disabled || !column.is_sortable() {
            return;
        }

        self.state = match self.state.active() {
            Some((id, SortDirection::Ascending)) if id == column.id() => {
                SortState::by(column.id(), SortDirection::Descending)
            }
            Some((id, SortDirection::Descending)) if id == column.id() => SortState::unsorted(),
            _ => SortState::by(column.id(), SortDirection::Ascending),
        };

        let encoded = self.state.encode_for_server();
        debug!(sort = ?encoded, "sort state changed");
        if let Some(callback) = &self.on_change {
            callback(encoded.as_deref());
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
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sortable(id: &str) -> Column {
        Column::data(id).sortable(true)
    }

    #[test]
    fn test_cycle_asc_desc_none() {
        let mut sort = SortController::new(false, None);
        let name = sortable("name");

        sort.toggle(&name);
        assert_eq!(sort.encode_for_server().as_deref(), Some("name"));
        assert!(sort.is_sorted("name"));
        assert!(!sort.is_sorted_desc("name"));

        sort.toggle(&name);
        assert_eq!(sort.encode_for_server().as_deref(), Some("-name"));
        assert!(sort.is_sorted_desc("name"));

        sort.toggle(&name);
        assert_eq!(sort.encode_for_server(), None);
        assert!(!sort.is_sorted("name"));
    }

    #[test]
    fn test_different_column_replaces_sort() {
        let mut sort = SortController::new(false, None);
        sort.toggle(&sortable("name"));
        sort.toggle(&sortable("name"));
        assert_eq!(sort.encode_for_server().as_deref(), Some("-name"));

        // A different column restarts ascending; never multi-column.
        sort.toggle(&sortable("id"));
        assert_eq!(sort.encode_for_server().as_deref(), Some("id"));
        assert!(!sort.is_sorted("name"));
    }

    #[test]
    fn test_unsortable_column_is_noop() {
        let mut sort = SortController::new(false, None);
        sort.toggle(&sortable("name"));
        sort.toggle(&Column::data("note"));
        assert_eq!(sort.encode_for_server().as_deref(), Some("name"));
    }

    #[test]
    fn test_globally_disabled() {
        let mut sort = SortController::new(true, None);
        sort.toggle(&sortable("name"));
        assert_eq!(sort.encode_for_server(), None);
    }

    #[test]
    fn test_initial_sort_does_not_notify() {
        let fired: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);

        let mut sort = SortController::new(false, Some("-age"));
        sort.on_change(Box::new(move |key| {
            sink.borrow_mut().push(key.map(str::to_string));
        }));
        assert_eq!(sort.encode_for_server().as_deref(), Some("-age"));
        assert!(fired.borrow().is_empty());

        sort.toggle(&sortable("name"));
        assert_eq!(
            fired.borrow().as_slice(),
            [Some("name".to_string())]
        );
    }

    #[test]
    fn test_notification_fires_on_every_change() {
        let fired: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);

        let mut sort = SortController::new(false, None);
        sort.on_change(Box::new(move |key| {
            sink.borrow_mut().push(key.map(str::to_string));
        }));

        let name = sortable("name");
        sort.toggle(&name);
        sort.toggle(&name);
        sort.toggle(&name);
        assert_eq!(
            fired.borrow().as_slice(),
            [Some("name".to_string()), Some("-name".to_string()), None]
        );
    }
}

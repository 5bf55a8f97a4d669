//! View preference persistence tests
//!
//! Round-trips hidden columns and column order through the preference
//! store across grid mounts, and checks the default-visibility rules.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridview::{
    selection_column, settings_column, Column, GridConfig, GridView, MemoryStore, PreferenceStore,
    MENU_COLUMN_ID, SELECTION_COLUMN_ID,
};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Store wrapper sharing one map across grid mounts, so tests can remount
/// a grid against the same persisted state.
#[derive(Clone, Default)]
struct SharedStore {
    entries: Rc<RefCell<MemoryStore>>,
}

impl PreferenceStore for SharedStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.borrow_mut().set(key, value);
    }
}

impl SharedStore {
    fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

fn columns(ids: &[&str]) -> Vec<Column> {
    let mut cols = vec![selection_column()];
    cols.extend(ids.iter().map(|id| Column::data(*id)));
    cols.push(settings_column());
    cols
}

fn mount(store: &SharedStore, ids: &[&str]) -> GridView {
    let config = GridConfig::new("/view", columns(ids)).table_name("people");
    GridView::new(config, Box::new(store.clone())).unwrap()
}

fn data_header_ids(grid: &GridView) -> Vec<String> {
    grid.render()
        .headers
        .iter()
        .map(|h| h.column_id.clone())
        .filter(|id| id != SELECTION_COLUMN_ID && id != MENU_COLUMN_ID)
        .collect()
}

#[test]
fn test_settings_submit_round_trip() {
    let store = SharedStore::default();
    let mut grid = mount(&store, &["a", "b", "c"]);

    // Hide a and b and order c,a,b through the settings surface, the only
    // persist path.
    let mut draft = grid.open_settings();
    draft.toggle_visible("a");
    draft.toggle_visible("b");
    draft.move_item(2, 0);
    grid.apply_settings(draft);

    // Fresh mount reads the same layout back.
    let remounted = mount(&store, &["a", "b", "c"]);
    assert_eq!(data_header_ids(&remounted), ["c"]);
    let entries = remounted.open_settings();
    let order: Vec<&str> = entries
        .entries()
        .iter()
        .map(|e| e.column_id.as_str())
        .collect();
    assert_eq!(order, ["c", "a", "b"]);
    assert!(!entries.entries()[1].visible);
    assert!(!entries.entries()[2].visible);
}

#[test]
fn test_new_column_appends_after_stored_order() {
    let store = SharedStore::default();
    let mut grid = mount(&store, &["a", "b", "c"]);
    let mut draft = grid.open_settings();
    draft.move_item(2, 0);
    grid.apply_settings(draft);

    // Schema evolved: column d joined the registry.
    let remounted = mount(&store, &["a", "b", "c", "d"]);
    assert_eq!(data_header_ids(&remounted), ["c", "a", "b", "d"]);
}

#[test]
fn test_stale_preference_ids_silently_dropped() {
    let store = SharedStore::default();
    let mut grid = mount(&store, &["a", "b", "gone"]);
    let mut draft = grid.open_settings();
    draft.toggle_visible("gone");
    draft.move_item(2, 0);
    grid.apply_settings(draft);

    // `gone` left the registry; its persisted entries are ignored.
    let remounted = mount(&store, &["a", "b"]);
    assert_eq!(data_header_ids(&remounted), ["a", "b"]);
}

#[test]
fn test_scenario_c_default_visibility_not_persisted() {
    let store = SharedStore::default();
    let config = GridConfig::new("/view", columns(&["id", "name", "note", "internalFlag"]))
        .table_name("people")
        .default_visible_columns(vec!["id".to_string(), "name".to_string()]);
    let grid = GridView::new(config, Box::new(store.clone())).unwrap();

    assert_eq!(data_header_ids(&grid), ["id", "name"]);
    // The computed hidden set is view state only; nothing was written.
    assert!(store.is_empty());
}

#[test]
fn test_persisted_hidden_set_wins_over_defaults() {
    let store = SharedStore::default();
    let mut grid = mount(&store, &["id", "name", "note"]);
    let mut draft = grid.open_settings();
    draft.toggle_visible("name");
    grid.apply_settings(draft);

    let config = GridConfig::new("/view", columns(&["id", "name", "note"]))
        .table_name("people")
        .default_visible_columns(vec!["id".to_string()]);
    let remounted = GridView::new(config, Box::new(store)).unwrap();
    assert_eq!(data_header_ids(&remounted), ["id", "note"]);
}

#[test]
fn test_locked_columns_stay_visible() {
    let store = SharedStore::default();
    let config = GridConfig::new("/view", columns(&["id", "name"]))
        .table_name("people")
        .columns_to_disable(vec!["id".to_string()]);
    let mut grid = GridView::new(config, Box::new(store)).unwrap();

    let mut draft = grid.open_settings();
    assert!(draft.entries()[0].locked);
    assert!(!draft.toggle_visible("id"));
    assert!(draft.toggle_visible("name"));
    grid.apply_settings(draft);
    assert_eq!(data_header_ids(&grid), ["id"]);
}

#[test]
fn test_locked_columns_start_visible_despite_defaults() {
    let store = SharedStore::default();
    // `b` is locked but not a default: it must still start visible, since a
    // locked checklist entry cannot be re-checked by the user.
    let config = GridConfig::new("/view", columns(&["a", "b"]))
        .table_name("people")
        .default_visible_columns(vec!["a".to_string()])
        .columns_to_disable(vec!["b".to_string()]);
    let grid = GridView::new(config, Box::new(store)).unwrap();

    assert_eq!(data_header_ids(&grid), ["a", "b"]);
    let draft = grid.open_settings();
    let b = draft
        .entries()
        .iter()
        .find(|e| e.column_id == "b")
        .unwrap();
    assert!(b.locked);
    assert!(b.visible);
}

#[test]
fn test_structural_columns_never_in_settings() {
    let store = SharedStore::default();
    let grid = mount(&store, &["a", "b"]);
    let draft = grid.open_settings();
    let ids: Vec<&str> = draft
        .entries()
        .iter()
        .map(|e| e.column_id.as_str())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

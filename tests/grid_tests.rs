//! End-to-end grid orchestrator tests
//!
//! Scenario coverage for sorting, capped selection, context menus, event
//! propagation, and the render pass, driving a [`GridView`] the way a host
//! would.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use gridview::{
    broadcast_column, selection_column, settings_column, CheckState, Column, EventTarget,
    FieldType, GridConfig, GridEvent, GridView, MemoryStore, MenuEntry, Propagation, Row, RowId,
    Ui, MENU_COLUMN_ID, SELECTION_COLUMN_ID, MISSING_VALUE,
};
use serde_json::json;

fn row(id: i64, name: &str) -> Row {
    let mut fields = BTreeMap::new();
    fields.insert("id".to_string(), json!(id));
    fields.insert("name".to_string(), json!(name));
    Row::with_id(id, fields)
}

fn three_rows() -> Vec<Row> {
    vec![row(1, "Ada"), row(2, "Grace"), row(3, "Edsger")]
}

/// Standard three-column grid: `id` and `name` sortable, `note` not.
fn sortable_grid() -> GridView {
    let config = GridConfig::new(
        "/people",
        vec![
            Column::data("id").sortable(true),
            Column::data("name").sortable(true),
            Column::data("note"),
        ],
    );
    GridView::new(config, Box::new(MemoryStore::new())).unwrap()
}

#[test]
fn test_scenario_a_single_column_sort_cycle() {
    let mut grid = sortable_grid();

    grid.toggle_sort("name");
    assert_eq!(grid.sort().encode_for_server().as_deref(), Some("name"));

    grid.toggle_sort("name");
    assert_eq!(grid.sort().encode_for_server().as_deref(), Some("-name"));

    // Clicking another column replaces the sort; never multi-column.
    grid.toggle_sort("id");
    assert_eq!(grid.sort().encode_for_server().as_deref(), Some("id"));
}

#[test]
fn test_unsortable_column_click_is_noop() {
    let mut grid = sortable_grid();
    grid.toggle_sort("note");
    assert_eq!(grid.sort().encode_for_server(), None);
}

#[test]
fn test_sort_key_only_ever_references_clicked_column() {
    let mut grid = sortable_grid();
    for _ in 0..7 {
        grid.toggle_sort("name");
        let key = grid.sort().encode_for_server();
        assert!(matches!(key.as_deref(), None | Some("name") | Some("-name")));
    }
}

#[test]
fn test_sorting_change_notifies_host_with_encoded_key() {
    let keys: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&keys);
    let config = GridConfig::new("/people", vec![Column::data("name").sortable(true)])
        .on_sorting_change(move |key| sink.borrow_mut().push(key.map(str::to_string)));
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();

    grid.toggle_sort("name");
    grid.toggle_sort("name");
    grid.toggle_sort("name");
    assert_eq!(
        keys.borrow().as_slice(),
        [Some("name".to_string()), Some("-name".to_string()), None]
    );
}

#[test]
fn test_scenario_b_selection_cap() {
    let config = GridConfig::new("/people", vec![selection_column(), Column::data("name")])
        .max_row_select(2);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    assert!(grid.toggle_row_selection(&RowId::Int(1)));
    assert!(grid.toggle_row_selection(&RowId::Int(2)));
    assert_eq!(grid.selection().len(), 2);

    // Third selection rejected at the cap.
    assert!(!grid.toggle_row_selection(&RowId::Int(3)));
    assert_eq!(grid.selection().len(), 2);

    // Deselecting frees capacity.
    assert!(grid.toggle_row_selection(&RowId::Int(1)));
    assert!(grid.toggle_row_selection(&RowId::Int(3)));
    let ids: Vec<&RowId> = grid.selected_rows().iter().map(|r| r.id()).collect();
    assert_eq!(ids, [&RowId::Int(2), &RowId::Int(3)]);
}

#[test]
fn test_capped_grid_omits_select_all_header() {
    let config = GridConfig::new("/people", vec![selection_column(), Column::data("name")])
        .max_row_select(1);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    assert!(!grid.toggle_select_all());
    let frame = grid.render();
    assert_eq!(frame.headers[0].column_id, SELECTION_COLUMN_ID);
    assert_eq!(frame.headers[0].ui, Ui::Empty);
}

#[test]
fn test_select_all_header_checkbox_states() {
    let config = GridConfig::new("/people", vec![selection_column(), Column::data("name")]);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    assert_eq!(
        grid.render().headers[0].ui,
        Ui::HeaderCheckbox(CheckState::None)
    );

    grid.toggle_row_selection(&RowId::Int(2));
    assert_eq!(
        grid.render().headers[0].ui,
        Ui::HeaderCheckbox(CheckState::Some)
    );

    grid.toggle_select_all();
    assert_eq!(
        grid.render().headers[0].ui,
        Ui::HeaderCheckbox(CheckState::All)
    );
}

#[test]
fn test_selection_cleared_when_row_set_identity_changes() {
    let config = GridConfig::new("/people", vec![selection_column(), Column::data("name")]);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());
    grid.toggle_row_selection(&RowId::Int(1));

    // Same ids (refetch of the same page) keep the selection.
    grid.set_rows(three_rows());
    assert_eq!(grid.selection().len(), 1);

    // A different page clears it.
    grid.set_rows(vec![row(4, "Barbara"), row(5, "Donald")]);
    assert!(grid.selection().is_empty());
}

#[test]
fn test_menu_open_close_idempotence() {
    let config = GridConfig::new(
        "/people",
        vec![
            selection_column(),
            Column::data("name").sortable(true),
            settings_column(),
        ],
    );
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());
    grid.toggle_sort("name");
    grid.toggle_row_selection(&RowId::Int(2));

    // Opening and dismissing a menu leaves sort and selection untouched.
    grid.open_row_menu(&RowId::Int(1));
    assert!(grid.menus().is_open(&RowId::Int(1)));
    grid.handle_escape();
    assert!(!grid.menus().is_open(&RowId::Int(1)));

    assert_eq!(grid.sort().encode_for_server().as_deref(), Some("name"));
    assert_eq!(grid.selection().len(), 1);
}

#[test]
fn test_multiple_row_menus_open_independently() {
    let config = GridConfig::new("/people", vec![Column::data("name"), settings_column()]);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    grid.open_row_menu(&RowId::Int(1));
    grid.open_row_menu(&RowId::Int(3));
    assert!(grid.menus().is_open(&RowId::Int(1)));
    assert!(grid.menus().is_open(&RowId::Int(3)));

    grid.outside_click(&RowId::Int(1));
    assert!(!grid.menus().is_open(&RowId::Int(1)));
    assert!(grid.menus().is_open(&RowId::Int(3)));
}

#[test]
fn test_menu_entry_receives_full_row_and_closes() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let config = GridConfig::new("/people", vec![Column::data("name"), settings_column()])
        .menu_entries(vec![MenuEntry::new("Rename", "rename", move |row: &Row| {
            sink.borrow_mut().push(row.display("name"));
        })]);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    grid.open_row_menu(&RowId::Int(2));
    grid.invoke_menu_entry(&RowId::Int(2), 0).unwrap();
    assert_eq!(seen.borrow().as_slice(), ["Grace".to_string()]);
    assert!(!grid.menus().is_open(&RowId::Int(2)));
}

#[test]
fn test_structural_cell_events_do_not_reach_row_handlers() {
    let clicks: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&clicks);
    let config = GridConfig::new(
        "/people",
        vec![selection_column(), Column::data("name"), settings_column()],
    )
    .on_row_click(move |_row| *sink.borrow_mut() += 1);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    // Checkbox click toggles selection and stops.
    let prop = grid.dispatch(
        &EventTarget::Cell {
            row_id: RowId::Int(1),
            column_id: SELECTION_COLUMN_ID.to_string(),
        },
        GridEvent::Click,
    );
    assert_eq!(prop, Propagation::Stopped);
    assert!(grid.selection().is_selected(&RowId::Int(1)));

    // Menu trigger double-click does not bubble either.
    let prop = grid.dispatch(
        &EventTarget::Cell {
            row_id: RowId::Int(1),
            column_id: MENU_COLUMN_ID.to_string(),
        },
        GridEvent::DoubleClick,
    );
    assert_eq!(prop, Propagation::Stopped);

    // A data cell click forwards to the host.
    let prop = grid.dispatch(
        &EventTarget::Cell {
            row_id: RowId::Int(1),
            column_id: "name".to_string(),
        },
        GridEvent::Click,
    );
    assert_eq!(prop, Propagation::Forwarded);
    assert_eq!(*clicks.borrow(), 1);
}

#[test]
fn test_row_context_menu_opens_menu_and_notifies_host() {
    let seen: Rc<RefCell<Vec<RowId>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let config = GridConfig::new("/people", vec![Column::data("name")])
        .on_row_context_menu(move |row| sink.borrow_mut().push(row.id().clone()));
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    let prop = grid.dispatch(
        &EventTarget::Row {
            row_id: RowId::Int(3),
        },
        GridEvent::ContextMenu,
    );
    assert_eq!(prop, Propagation::Stopped);
    assert!(grid.menus().is_open(&RowId::Int(3)));
    assert_eq!(seen.borrow().as_slice(), [RowId::Int(3)]);
}

#[test]
fn test_header_click_routes_to_sort() {
    let mut grid = sortable_grid();
    let prop = grid.dispatch(
        &EventTarget::Header {
            column_id: "name".to_string(),
        },
        GridEvent::Click,
    );
    assert_eq!(prop, Propagation::Stopped);
    assert_eq!(grid.sort().encode_for_server().as_deref(), Some("name"));
}

#[test]
fn test_broadcast_surface_lifecycle() {
    let pasted: Rc<RefCell<Vec<(String, serde_json::Value)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pasted);
    let config = GridConfig::new(
        "/people",
        vec![broadcast_column("age", FieldType::Integer).label("Age")],
    )
    .paste_to_column(move |field, value| sink.borrow_mut().push((field.to_string(), value)));
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();

    // Header context-click opens the surface.
    let prop = grid.dispatch(
        &EventTarget::Header {
            column_id: "age".to_string(),
        },
        GridEvent::ContextMenu,
    );
    assert_eq!(prop, Propagation::Stopped);
    assert!(grid.broadcast_input_open("age"));
    assert!(grid.escape_active());

    // A bad value keeps the surface open.
    grid.set_broadcast_input("age", "old");
    assert!(grid.submit_broadcast_input("age").is_err());
    assert!(grid.broadcast_input_open("age"));
    assert!(pasted.borrow().is_empty());

    // A good value forwards and closes.
    grid.set_broadcast_input("age", "36");
    grid.submit_broadcast_input("age").unwrap();
    assert!(!grid.broadcast_input_open("age"));
    assert_eq!(
        pasted.borrow().as_slice(),
        [("age".to_string(), json!(36))]
    );
}

#[test]
fn test_render_missing_value_placeholder() {
    let config = GridConfig::new("/people", vec![Column::data("name"), Column::data("note")]);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(vec![row(1, "Ada")]);

    let frame = grid.render();
    assert_eq!(frame.rows[0].cells[0].ui, Ui::Text("Ada".to_string()));
    // No `note` field on the row: placeholder, not an error.
    assert_eq!(frame.rows[0].cells[1].ui, Ui::Text(MISSING_VALUE.to_string()));
}

#[test]
fn test_render_pins_structural_columns() {
    let config = GridConfig::new(
        "/people",
        vec![
            Column::data("name"),
            settings_column(),
            selection_column(),
            Column::data("id"),
        ],
    );
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.set_rows(three_rows());

    let frame = grid.render();
    let ids: Vec<&str> = frame.headers.iter().map(|h| h.column_id.as_str()).collect();
    assert_eq!(ids, [SELECTION_COLUMN_ID, "name", "id", MENU_COLUMN_ID]);
}

#[test]
fn test_render_annotates_sort_affordances() {
    let mut grid = sortable_grid();
    grid.toggle_sort("name");
    grid.toggle_sort("name");

    let frame = grid.render();
    let name = frame
        .headers
        .iter()
        .find(|h| h.column_id == "name")
        .unwrap();
    assert!(name.sortable && name.is_sorted && name.is_sorted_desc);
    let note = frame
        .headers
        .iter()
        .find(|h| h.column_id == "note")
        .unwrap();
    assert!(!note.sortable && !note.is_sorted);
}

#[test]
fn test_initial_sort_by_seeds_state() {
    let config = GridConfig::new("/people", vec![Column::data("name").sortable(true)])
        .initial_sort_by("-name");
    let grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    assert_eq!(grid.sort().encode_for_server().as_deref(), Some("-name"));
}

#[test]
fn test_disable_sort_by_blocks_header_clicks() {
    let config =
        GridConfig::new("/people", vec![Column::data("name").sortable(true)]).disable_sort_by(true);
    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
    grid.toggle_sort("name");
    assert_eq!(grid.sort().encode_for_server(), None);
}

//! Example: Mount a grid over sample rows and print rendered frames
//!
//! Run with: cargo run --example show_grid

#![allow(clippy::expect_used, clippy::indexing_slicing)]

use std::collections::BTreeMap;

use gridview::{
    broadcast_column, selection_column, settings_column, Column, EventTarget, FieldType,
    GridConfig, GridEvent, GridView, MemoryStore, Row, Ui,
};

fn sample_row(id: i64, name: &str, age: i64) -> Row {
    let mut fields = BTreeMap::new();
    fields.insert("id".to_string(), serde_json::json!(id));
    fields.insert("name".to_string(), serde_json::json!(name));
    fields.insert("age".to_string(), serde_json::json!(age));
    Row::with_id(id, fields)
}

fn render_fragment(ui: &Ui) -> String {
    match ui {
        Ui::Empty => String::new(),
        Ui::Text(s) => s.clone(),
        Ui::Checkbox { checked, .. } => if *checked { "[x]" } else { "[ ]" }.to_string(),
        Ui::HeaderCheckbox(_) => "[all]".to_string(),
        Ui::MenuTrigger => "...".to_string(),
        Ui::SettingsTrigger => "[cols]".to_string(),
        Ui::Input { buffer } => format!("<{buffer}>"),
        Ui::Group(parts) => parts
            .iter()
            .map(render_fragment)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn print_frame(grid: &GridView) {
    let frame = grid.render();
    let headers: Vec<String> = frame.headers.iter().map(|h| render_fragment(&h.ui)).collect();
    println!("| {} |", headers.join(" | "));
    for row in &frame.rows {
        let cells: Vec<String> = row.cells.iter().map(|c| render_fragment(&c.ui)).collect();
        println!("| {} |", cells.join(" | "));
    }
}

fn main() {
    let config = GridConfig::new(
        "/demo",
        vec![
            selection_column(),
            Column::data("id").label("Id").sortable(true),
            Column::data("name").label("Name").sortable(true),
            broadcast_column("age", FieldType::Integer).label("Age"),
            settings_column(),
        ],
    )
    .on_sorting_change(|key| println!("  -> refetch sorted by {key:?}"));

    let mut grid = GridView::new(config, Box::new(MemoryStore::new())).expect("valid columns");
    grid.set_rows(vec![
        sample_row(1, "Ada", 36),
        sample_row(2, "Grace", 45),
        sample_row(3, "Edsger", 41),
    ]);

    println!("Initial frame:");
    print_frame(&grid);

    println!("\nClick the Name header (sort ascending):");
    grid.dispatch(
        &EventTarget::Header {
            column_id: "name".to_string(),
        },
        GridEvent::Click,
    );
    print_frame(&grid);

    println!("\nSelect rows 1 and 3:");
    grid.dispatch(
        &EventTarget::Cell {
            row_id: 1.into(),
            column_id: "__selection".to_string(),
        },
        GridEvent::Click,
    );
    grid.dispatch(
        &EventTarget::Cell {
            row_id: 3.into(),
            column_id: "__selection".to_string(),
        },
        GridEvent::Click,
    );
    print_frame(&grid);
    println!("Selected: {} rows", grid.selected_rows().len());
}

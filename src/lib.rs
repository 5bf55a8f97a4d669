//! gridview - interactive tabular view engine
//!
//! Renders arbitrary row collections as a sortable, column-configurable
//! grid with persisted per-view layout preferences, capped multi-row
//! selection, and per-row contextual action menus:
//! - Single-column server-driven sorting with a stable wire encoding
//! - Visible/hidden columns and column order persisted per logical view
//! - Structural selection and settings/menu columns pinned by role
//! - Broadcast columns forwarding one typed value to a host callback
//!
//! The engine owns data model and control logic only. One render pass
//! produces a [`GridFrame`] of [`Ui`] fragments; realizing them (DOM,
//! terminal, canvas) and classifying raw input into [`GridEvent`]s is the
//! host's job, so the grid behaves identically regardless of rendering
//! technology.
//!
//! # Usage
//!
//! ```
//! use gridview::{
//!     selection_column, settings_column, Column, GridConfig, GridView, MemoryStore,
//! };
//!
//! let config = GridConfig::new(
//!     "/contacts",
//!     vec![
//!         selection_column(),
//!         Column::data("id").label("Id").sortable(true),
//!         Column::data("name").label("Name").sortable(true),
//!         settings_column(),
//!     ],
//! )
//! .default_visible_columns(vec!["id".into(), "name".into()]);
//!
//! let mut grid = GridView::new(config, Box::new(MemoryStore::new())).unwrap();
//! let frame = grid.render();
//! assert_eq!(frame.headers.len(), 4);
//! ```

// Core data model and control logic
pub mod error;
pub mod menu;
pub mod selection;
pub mod sort;
pub mod types;

// Persistence boundary
pub mod prefs;

// Rendering seam and composition
pub mod columns;
pub mod grid;
pub mod render;

pub use columns::{
    broadcast_column, selection_column, settings_column, BroadcastInputs, PasteFn, SettingsDraft,
    SettingsEntry, MENU_COLUMN_ID, SELECTION_COLUMN_ID,
};
pub use error::{GridError, Result};
pub use grid::{
    CellView, EventTarget, GridConfig, GridEvent, GridFrame, GridView, HeaderCell, Propagation,
    RowCallback, RowView,
};
pub use menu::{MenuEntry, RowMenuState, RowMenus};
pub use prefs::{MemoryStore, PreferenceStore, ViewKey, ViewPreference, ViewPrefs};
pub use render::{CellContext, CellRenderer, HeaderContext, HeaderRenderer, Ui};
pub use selection::{CheckState, SelectionController};
pub use sort::{SortChangeFn, SortController};
pub use types::{
    Column, ColumnRegistry, ColumnRole, FieldType, Row, RowId, SortDirection, SortState,
    MISSING_VALUE,
};

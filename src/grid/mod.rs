//! Grid orchestrator - the primary entry point of the view engine.
//!
//! A [`GridView`] owns the column registry, the sort / selection / menu
//! controllers, and the view preference state, and coordinates them into
//! one render pass per update. It draws nothing itself: [`GridView::render`]
//! produces a [`GridFrame`] of [`Ui`] fragments for the host to realize in
//! whatever rendering technology it uses.

mod events;

pub use events::{EventTarget, GridEvent, Propagation};

use std::collections::BTreeSet;

use tracing::debug;

use crate::columns::{BroadcastInputs, PasteFn, SettingsDraft, SettingsEntry};
use crate::error::{GridError, Result};
use crate::menu::{MenuEntry, RowMenus};
use crate::prefs::{PreferenceStore, ViewKey, ViewPrefs};
use crate::render::{CellContext, HeaderContext, Ui};
use crate::selection::SelectionController;
use crate::sort::{SortChangeFn, SortController};
use crate::types::{Column, ColumnRegistry, ColumnRole, Row, RowId};

/// Host callback receiving a row's full underlying data.
pub type RowCallback = Box<dyn Fn(&Row)>;

/// Construction-time grid configuration.
pub struct GridConfig {
    columns: Vec<Column>,
    view_identity: String,
    table_name: String,
    max_row_select: usize,
    columns_to_disable: Vec<String>,
    default_visible_columns: Option<Vec<String>>,
    disable_sort_by: bool,
    initial_sort_by: Option<String>,
    menu_entries: Vec<MenuEntry>,
    on_sorting_change: Option<SortChangeFn>,
    on_row_click: Option<RowCallback>,
    on_row_double_click: Option<RowCallback>,
    on_row_context_menu: Option<RowCallback>,
    paste_to_column: Option<PasteFn>,
}

impl GridConfig {
    /// Start a configuration for a view identity (e.g. a route path) and
    /// its column definitions.
    pub fn new(view_identity: impl Into<String>, columns: Vec<Column>) -> Self {
        GridConfig {
            columns,
            view_identity: view_identity.into(),
            table_name: String::new(),
            max_row_select: 0,
            columns_to_disable: Vec::new(),
            default_visible_columns: None,
            disable_sort_by: false,
            initial_sort_by: None,
            menu_entries: Vec::new(),
            on_sorting_change: None,
            on_row_click: None,
            on_row_double_click: None,
            on_row_context_menu: None,
            paste_to_column: None,
        }
    }

    /// Table name distinguishing several grids on one view (preference
    /// key namespacing).
    #[must_use]
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Cap on selected rows (`0` = unlimited). Any cap disables select-all.
    #[must_use]
    pub fn max_row_select(mut self, max: usize) -> Self {
        self.max_row_select = max;
        self
    }

    /// Columns shown in the settings checklist but not uncheckable.
    #[must_use]
    pub fn columns_to_disable(mut self, ids: Vec<String>) -> Self {
        self.columns_to_disable = ids;
        self
    }

    /// Columns visible by default when no preference is persisted yet.
    #[must_use]
    pub fn default_visible_columns(mut self, ids: Vec<String>) -> Self {
        self.default_visible_columns = Some(ids);
        self
    }

    /// Globally disable header-click sorting.
    #[must_use]
    pub fn disable_sort_by(mut self, disable: bool) -> Self {
        self.disable_sort_by = disable;
        self
    }

    /// Initial sort in wire encoding (`"col"` / `"-col"`).
    #[must_use]
    pub fn initial_sort_by(mut self, encoded: impl Into<String>) -> Self {
        self.initial_sort_by = Some(encoded.into());
        self
    }

    /// Context-menu actions offered on every row.
    #[must_use]
    pub fn menu_entries(mut self, entries: Vec<MenuEntry>) -> Self {
        self.menu_entries = entries;
        self
    }

    /// Notification fired with the encoded sort key on every sort change.
    #[must_use]
    pub fn on_sorting_change(mut self, callback: impl Fn(Option<&str>) + 'static) -> Self {
        self.on_sorting_change = Some(Box::new(callback));
        self
    }

    /// Row click callback.
    #[must_use]
    pub fn on_row_click(mut self, callback: impl Fn(&Row) + 'static) -> Self {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    /// Row double-click callback.
    #[must_use]
    pub fn on_row_double_click(mut self, callback: impl Fn(&Row) + 'static) -> Self {
        self.on_row_double_click = Some(Box::new(callback));
        self
    }

    /// Row context-menu callback (fired alongside opening the row menu).
    #[must_use]
    pub fn on_row_context_menu(mut self, callback: impl Fn(&Row) + 'static) -> Self {
        self.on_row_context_menu = Some(Box::new(callback));
        self
    }

    /// Broadcast-column paste callback.
    #[must_use]
    pub fn paste_to_column(mut self, callback: impl Fn(&str, serde_json::Value) + 'static) -> Self {
        self.paste_to_column = Some(Box::new(callback));
        self
    }
}

/// One rendered header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    /// Column id.
    pub column_id: String,
    /// Rendered fragment.
    pub ui: Ui,
    /// Whether clicking this header toggles sorting.
    pub sortable: bool,
    /// Whether this is the active sort column.
    pub is_sorted: bool,
    /// Whether the active sort is descending.
    pub is_sorted_desc: bool,
}

/// One rendered body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    /// Column id.
    pub column_id: String,
    /// Rendered fragment.
    pub ui: Ui,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Row id.
    pub row_id: RowId,
    /// Whether the row's context menu is open.
    pub menu_open: bool,
    /// Cells, one per visible column, in rendering order.
    pub cells: Vec<CellView>,
}

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridFrame {
    /// Header cells in rendering order.
    pub headers: Vec<HeaderCell>,
    /// Body rows.
    pub rows: Vec<RowView>,
}

/// The assembled grid: registry, controllers, preferences, and rows.
pub struct GridView {
    registry: ColumnRegistry,
    sort: SortController,
    selection: SelectionController,
    menus: RowMenus,
    broadcast: BroadcastInputs,
    prefs: ViewPrefs,
    store: Box<dyn PreferenceStore>,
    rows: Vec<Row>,
    menu_entries: Vec<MenuEntry>,
    columns_to_disable: Vec<String>,
    on_row_click: Option<RowCallback>,
    on_row_double_click: Option<RowCallback>,
    on_row_context_menu: Option<RowCallback>,
    paste_to_column: Option<PasteFn>,
}

impl GridView {
    /// Mount a grid: register columns (selection pinned first, menu last),
    /// seed the sort state, and run the preference initialization
    /// algorithm against the store.
    ///
    /// # Errors
    /// Returns [`GridError::DuplicateColumn`] for colliding column ids.
    pub fn new(config: GridConfig, store: Box<dyn PreferenceStore>) -> Result<Self> {
        let registry = ColumnRegistry::new(config.columns)?;

        let mut sort = SortController::new(config.disable_sort_by, config.initial_sort_by.as_deref());
        if let Some(callback) = config.on_sorting_change {
            sort.on_change(callback);
        }

        let prefs = ViewPrefs::load(
            ViewKey::new(config.view_identity, config.table_name),
            store.as_ref(),
            &registry,
            config.default_visible_columns,
            &config.columns_to_disable,
        );

        Ok(GridView {
            registry,
            sort,
            selection: SelectionController::new(config.max_row_select),
            menus: RowMenus::default(),
            broadcast: BroadcastInputs::default(),
            prefs,
            store,
            rows: Vec::new(),
            menu_entries: config.menu_entries,
            columns_to_disable: config.columns_to_disable,
            on_row_click: config.on_row_click,
            on_row_double_click: config.on_row_double_click,
            on_row_context_menu: config.on_row_context_menu,
            paste_to_column: config.paste_to_column,
        })
    }

    /// Replace the row set (new page, new filter, fresh fetch).
    ///
    /// When the set of row ids changes, the selection is cleared so no
    /// stale ids survive; row menu states are pruned to the mounted rows
    /// either way.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        let new_ids: BTreeSet<&RowId> = rows.iter().map(Row::id).collect();
        let old_ids: BTreeSet<&RowId> = self.rows.iter().map(Row::id).collect();
        if new_ids != old_ids {
            debug!(rows = rows.len(), "row set identity changed");
            self.selection.clear();
        }

        let ids: Vec<RowId> = rows.iter().map(|r| r.id().clone()).collect();
        self.menus.mount(&ids);
        self.rows = rows;
    }

    /// The current row set.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The column registry.
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Selection state, exposed for header rendering and host queries.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Sort state.
    pub fn sort(&self) -> &SortController {
        &self.sort
    }

    /// Row menu states.
    pub fn menus(&self) -> &RowMenus {
        &self.menus
    }

    /// Selected rows by value-reference, in table order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.selection.selected_rows(&self.rows)
    }

    /// Whether the host should keep a global Escape listener installed:
    /// true while any row menu or broadcast surface is open.
    pub fn escape_active(&self) -> bool {
        self.menus.escape_active() || self.broadcast.any_open()
    }

    /// Escape pressed: dismiss every open row menu and broadcast surface.
    pub fn handle_escape(&mut self) {
        self.menus.handle_escape();
        self.broadcast.close_all();
    }

    /// A click classified as outside the given row's menu region.
    pub fn outside_click(&mut self, row_id: &RowId) {
        self.menus.handle_outside_click(row_id);
    }

    /// Advance the sort state for a clicked header. Unknown and
    /// unsortable columns are a no-op.
    pub fn toggle_sort(&mut self, column_id: &str) {
        if let Some(column) = self.registry.get(column_id) {
            self.sort.toggle(column);
        }
    }

    /// Toggle a row's selection checkbox.
    pub fn toggle_row_selection(&mut self, row_id: &RowId) -> bool {
        self.selection.toggle_row(row_id)
    }

    /// Toggle select-all over the current rows. Disabled under a cap.
    pub fn toggle_select_all(&mut self) -> bool {
        let visible: Vec<RowId> = self.rows.iter().map(|r| r.id().clone()).collect();
        self.selection.toggle_all(&visible)
    }

    /// Open a row's context menu.
    pub fn open_row_menu(&mut self, row_id: &RowId) {
        self.menus.open(row_id);
    }

    /// Invoke one of the configured menu entries for a row, passing the
    /// row's full data, then close that row's menu.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] for an out-of-range entry index and
    /// ignores unknown rows.
    pub fn invoke_menu_entry(&mut self, row_id: &RowId, entry_index: usize) -> Result<()> {
        let entry = self
            .menu_entries
            .get(entry_index)
            .ok_or_else(|| GridError::Config(format!("no menu entry at index {entry_index}")))?;
        if let Some(row) = self.rows.iter().find(|r| r.id() == row_id) {
            self.menus.invoke(entry, row);
        }
        Ok(())
    }

    /// Build a settings draft over the non-structural columns: the
    /// visibility checklist (locked entries per `columns_to_disable`) and
    /// the current order.
    pub fn open_settings(&self) -> SettingsDraft {
        let entries = self
            .prefs
            .effective_order(&self.registry)
            .into_iter()
            .filter_map(|id| {
                let column = self.registry.get(&id)?;
                Some(SettingsEntry {
                    label: if column.label_text().is_empty() {
                        id.clone()
                    } else {
                        column.label_text().to_string()
                    },
                    locked: self.columns_to_disable.contains(&id),
                    visible: !self.prefs.is_hidden(&self.registry, &id),
                    column_id: id,
                })
            })
            .collect();
        SettingsDraft::new(entries)
    }

    /// Submit a settings draft: the sole path that persists preferences.
    pub fn apply_settings(&mut self, draft: SettingsDraft) {
        self.prefs.save(self.store.as_mut(), draft.into_preference());
    }

    /// Open a broadcast column's header input surface. Non-broadcast and
    /// unknown columns are a no-op.
    pub fn open_broadcast_input(&mut self, column_id: &str) {
        if self
            .registry
            .get(column_id)
            .is_some_and(Column::is_broadcast)
        {
            self.broadcast.open(column_id);
        }
    }

    /// Replace the buffer of an open broadcast surface.
    pub fn set_broadcast_input(&mut self, column_id: &str, text: impl Into<String>) {
        self.broadcast.set_buffer(column_id, text);
    }

    /// Close a broadcast surface without submitting (Escape).
    pub fn close_broadcast_input(&mut self, column_id: &str) {
        self.broadcast.close(column_id);
    }

    /// Whether a broadcast surface is open.
    pub fn broadcast_input_open(&self, column_id: &str) -> bool {
        self.broadcast.is_open(column_id)
    }

    /// Submit a broadcast surface: parse per the declared field type and
    /// forward to the host's paste callback. The surface closes on success
    /// and stays open on a parse error.
    ///
    /// # Errors
    /// Returns [`GridError::UnknownColumn`] for unregistered columns and
    /// [`GridError::InvalidValue`] when the buffer does not parse.
    pub fn submit_broadcast_input(&mut self, column_id: &str) -> Result<()> {
        let column = self
            .registry
            .get(column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;
        match &self.paste_to_column {
            Some(paste) => self.broadcast.submit(column, paste),
            None => {
                // No host callback configured: value has nowhere to go.
                self.broadcast.close(column_id);
                Ok(())
            }
        }
    }

    /// Effective visible columns in rendering order: selection column
    /// first, visible data columns per preference order, menu column last.
    pub fn visible_columns(&self) -> Vec<&Column> {
        let order = self.prefs.effective_order(&self.registry);
        let mut columns: Vec<&Column> = self
            .registry
            .all()
            .iter()
            .filter(|c| c.role() == ColumnRole::Selection)
            .collect();
        columns.extend(
            order
                .iter()
                .filter(|id| !self.prefs.is_hidden(&self.registry, id))
                .filter_map(|id| self.registry.get(id)),
        );
        columns.extend(
            self.registry
                .all()
                .iter()
                .filter(|c| c.role() == ColumnRole::Menu),
        );
        columns
    }

    /// One render pass: resolve order and visibility, annotate headers
    /// with sort affordances, and project every row through the visible
    /// columns. Missing values render the placeholder, never an error.
    pub fn render(&self) -> GridFrame {
        let visible_ids: Vec<RowId> = self.rows.iter().map(|r| r.id().clone()).collect();
        let columns = self.visible_columns();

        let headers = columns
            .iter()
            .map(|column| {
                let sortable = column.is_sortable();
                let is_sorted = self.sort.is_sorted(column.id());
                let is_sorted_desc = self.sort.is_sorted_desc(column.id());
                let ctx = HeaderContext {
                    column_id: column.id().to_string(),
                    label: column.label_text().to_string(),
                    sortable,
                    is_sorted,
                    is_sorted_desc,
                    select_all: (column.role() == ColumnRole::Selection
                        && self.selection.allows_select_all())
                    .then(|| self.selection.check_state(&visible_ids)),
                    broadcast_input: column
                        .is_broadcast()
                        .then(|| self.broadcast.buffer(column.id()).map(str::to_string))
                        .flatten(),
                };
                let ui = match column.header() {
                    Some(renderer) => renderer.render_header(&ctx),
                    None => Ui::text(ctx.label.clone()),
                };
                HeaderCell {
                    column_id: column.id().to_string(),
                    ui,
                    sortable,
                    is_sorted,
                    is_sorted_desc,
                }
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let menu_open = self.menus.is_open(row.id());
                let cells = columns
                    .iter()
                    .map(|column| {
                        let ctx = CellContext {
                            column_id: column.id().to_string(),
                            selected: self.selection.is_selected(row.id()),
                            selectable: self.selection.is_row_selectable(row.id()),
                            menu_open,
                        };
                        let ui = match column.cell() {
                            Some(renderer) => renderer.render_cell(row, &ctx),
                            None => Ui::text(row.display(column.field())),
                        };
                        CellView {
                            column_id: column.id().to_string(),
                            ui,
                        }
                    })
                    .collect();
                RowView {
                    row_id: row.id().clone(),
                    menu_open,
                    cells,
                }
            })
            .collect();

        GridFrame { headers, rows }
    }
}

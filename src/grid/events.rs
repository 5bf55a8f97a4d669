//! Row and cell event routing.
//!
//! The host translates its input events (DOM, terminal, anything) into
//! [`GridEvent`]s against an [`EventTarget`] and hands them to
//! [`GridView::dispatch`]. Events originating from a structural column's
//! interactive element act on the controllers and report
//! [`Propagation::Stopped`] so the host never forwards them to row-level
//! handlers; everything else forwards to the configured row callbacks.

use super::GridView;
use crate::types::{ColumnRole, RowId};

/// A user interaction, already classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// Primary click.
    Click,
    /// Double primary click.
    DoubleClick,
    /// Secondary click / long-press (default browser menu suppressed).
    ContextMenu,
}

/// Where an event landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget {
    /// A column header.
    Header {
        /// Column id.
        column_id: String,
    },
    /// A body cell.
    Cell {
        /// Row id.
        row_id: RowId,
        /// Column id.
        column_id: String,
    },
    /// A row outside any specific cell.
    Row {
        /// Row id.
        row_id: RowId,
    },
}

/// Whether the event was consumed by a structural control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Consumed; must not reach row-level handlers.
    Stopped,
    /// Not consumed; row-level default handling may proceed.
    Forwarded,
}

impl GridView {
    /// Route one classified event. See the module docs for the rules.
    pub fn dispatch(&mut self, target: &EventTarget, event: GridEvent) -> Propagation {
        match target {
            EventTarget::Header { column_id } => self.dispatch_header(column_id, event),
            EventTarget::Cell { row_id, column_id } => {
                self.dispatch_cell(row_id, column_id, event)
            }
            EventTarget::Row { row_id } => self.dispatch_row(row_id, event),
        }
    }

    fn dispatch_header(&mut self, column_id: &str, event: GridEvent) -> Propagation {
        let Some(column) = self.registry.get(column_id) else {
            return Propagation::Forwarded;
        };
        let role = column.role();
        let broadcast = column.is_broadcast();

        match (role, event) {
            (ColumnRole::Selection, GridEvent::Click) => {
                self.toggle_select_all();
                Propagation::Stopped
            }
            // The settings trigger is opened by the host through
            // `open_settings`; the click itself just never bubbles.
            (ColumnRole::Menu, GridEvent::Click) => Propagation::Stopped,
            (ColumnRole::Data, GridEvent::Click) => {
                self.toggle_sort(column_id);
                Propagation::Stopped
            }
            // Header context-click opens the broadcast input surface.
            (ColumnRole::Data, GridEvent::ContextMenu) if broadcast => {
                self.open_broadcast_input(column_id);
                Propagation::Stopped
            }
            _ => Propagation::Forwarded,
        }
    }

    fn dispatch_cell(&mut self, row_id: &RowId, column_id: &str, event: GridEvent) -> Propagation {
        let role = match self.registry.get(column_id) {
            Some(column) => column.role(),
            None => return Propagation::Forwarded,
        };

        match (role, event) {
            // Checkbox interaction never reaches row-level handlers.
            (ColumnRole::Selection, GridEvent::Click) => {
                self.toggle_row_selection(row_id);
                Propagation::Stopped
            }
            (ColumnRole::Selection, _) => Propagation::Stopped,
            // The per-row menu trigger; double-click does not bubble.
            (ColumnRole::Menu, GridEvent::Click) => {
                self.open_row_menu(row_id);
                Propagation::Stopped
            }
            (ColumnRole::Menu, _) => Propagation::Stopped,
            (ColumnRole::Data, event) => self.dispatch_row(row_id, event),
        }
    }

    fn dispatch_row(&mut self, row_id: &RowId, event: GridEvent) -> Propagation {
        match event {
            GridEvent::Click => {
                if let Some(row) = self.rows.iter().find(|r| r.id() == row_id) {
                    if let Some(callback) = &self.on_row_click {
                        callback(row);
                    }
                }
                Propagation::Forwarded
            }
            GridEvent::DoubleClick => {
                if let Some(row) = self.rows.iter().find(|r| r.id() == row_id) {
                    if let Some(callback) = &self.on_row_double_click {
                        callback(row);
                    }
                }
                Propagation::Forwarded
            }
            GridEvent::ContextMenu => {
                // Open the row's menu and notify the host; the default
                // browser menu is suppressed.
                self.menus.open(row_id);
                if let Some(row) = self.rows.iter().find(|r| r.id() == row_id) {
                    if let Some(callback) = &self.on_row_context_menu {
                        callback(row);
                    }
                }
                Propagation::Stopped
            }
        }
    }
}

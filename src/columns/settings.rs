//! Settings/menu column factory and the column-settings surface model.
//!
//! The settings surface is the one place layout preferences get persisted:
//! a visibility checklist plus a reorderable list over the same
//! non-structural columns. Submitting the draft is the sole caller of
//! [`ViewPrefs::save`](crate::prefs::ViewPrefs::save).

use crate::prefs::ViewPreference;
use crate::render::{CellContext, HeaderContext, Ui};
use crate::types::{Column, ColumnRole, Row};

/// Id of the structural settings/menu column.
pub const MENU_COLUMN_ID: &str = "__menu";

/// Build the structural settings/menu column.
///
/// The header renders the settings trigger (checklist + reorder surface);
/// the cell renders the per-row menu trigger. Never sortable; trigger
/// events do not bubble to row-level handlers.
pub fn settings_column() -> Column {
    Column::structural(MENU_COLUMN_ID, ColumnRole::Menu)
        .header_renderer(|_ctx: &HeaderContext| Ui::SettingsTrigger)
        .cell_renderer(|_row: &Row, _ctx: &CellContext| Ui::MenuTrigger)
}

/// One line of the settings surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEntry {
    /// Data column id.
    pub column_id: String,
    /// Display label.
    pub label: String,
    /// Current checkbox state.
    pub visible: bool,
    /// Shown but not uncheckable (`columns_to_disable`).
    pub locked: bool,
}

/// An in-progress edit of the column settings surface.
///
/// Entry order is the draft's column order; visibility toggles and list
/// reordering mutate the draft only. Nothing persists until the draft is
/// submitted through the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    entries: Vec<SettingsEntry>,
}

impl SettingsDraft {
    pub(crate) fn new(entries: Vec<SettingsEntry>) -> Self {
        SettingsDraft { entries }
    }

    /// Current entries, in draft order.
    pub fn entries(&self) -> &[SettingsEntry] {
        &self.entries
    }

    /// Toggle a column's visibility checkbox. Locked entries are a no-op.
    /// Returns `true` if the draft changed.
    pub fn toggle_visible(&mut self, column_id: &str) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.column_id == column_id && !e.locked)
        {
            Some(entry) => {
                entry.visible = !entry.visible;
                true
            }
            None => false,
        }
    }

    /// Move the entry at `from` so it lands at index `to` (the post-drag
    /// position). Out-of-range indices are a no-op; drag handlers clamp
    /// before calling. Returns `true` if the draft changed.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() || from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    /// Resolve the draft into the persisted preference shape: hidden ids
    /// are the unchecked entries, order is the draft order.
    pub fn into_preference(self) -> ViewPreference {
        let column_order = self.entries.iter().map(|e| e.column_id.clone()).collect();
        let hidden_column_ids = self
            .entries
            .into_iter()
            .filter(|e| !e.visible)
            .map(|e| e.column_id)
            .collect();
        ViewPreference {
            hidden_column_ids,
            column_order,
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

    fn draft() -> SettingsDraft {
        SettingsDraft::new(vec![
            SettingsEntry {
                column_id: "a".to_string(),
                label: "A".to_string(),
                visible: true,
                locked: false,
            },
            SettingsEntry {
                column_id: "b".to_string(),
                label: "B".to_string(),
                visible: true,
                locked: true,
            },
            SettingsEntry {
                column_id: "c".to_string(),
                label: "C".to_string(),
                visible: false,
                locked: false,
            },
        ])
    }

    #[test]
    fn test_toggle_visible() {
        let mut d = draft();
        assert!(d.toggle_visible("a"));
        assert!(!d.entries()[0].visible);
        assert!(d.toggle_visible("a"));
        assert!(d.entries()[0].visible);
    }

    #[test]
    fn test_locked_entry_cannot_be_unchecked() {
        let mut d = draft();
        assert!(!d.toggle_visible("b"));
        assert!(d.entries()[1].visible);
    }

    #[test]
    fn test_move_item_reorders() {
        let mut d = draft();
        assert!(d.move_item(2, 0));
        let ids: Vec<&str> = d.entries().iter().map(|e| e.column_id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_move_item_out_of_range_is_noop() {
        let mut d = draft();
        assert!(!d.move_item(0, 9));
        assert!(!d.move_item(9, 0));
        assert!(!d.move_item(1, 1));
    }

    #[test]
    fn test_into_preference() {
        let mut d = draft();
        d.move_item(2, 0);
        let pref = d.into_preference();
        assert_eq!(pref.column_order, ["c", "a", "b"]);
        assert_eq!(pref.hidden_column_ids, ["c"]);
    }

    #[test]
    fn test_factory_column_shape() {
        let col = settings_column();
        assert_eq!(col.role(), ColumnRole::Menu);
        assert!(!col.is_sortable());
    }
}

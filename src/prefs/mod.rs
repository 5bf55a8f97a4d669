//! Persisted per-view layout preferences.
//!
//! Hidden columns and column order are stored per logical view through the
//! abstract [`PreferenceStore`], a synchronous key-value boundary the host
//! implements (browser storage, a settings table, a file). Keys are built
//! from the view's identity per [`ViewKey`], so the core stays testable
//! against [`MemoryStore`].
//!
//! Stale ids (columns that no longer exist) are dropped at read time;
//! that is ordinary schema evolution, not a fault.

mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::types::ColumnRegistry;

/// Synchronous key-value boundary for persisted preferences.
///
/// Reads must be cheap enough to run before first render; missing keys
/// yield `None` and callers supply their own defaults.
pub trait PreferenceStore {
    /// Read a value, if the key exists.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value. Fire-and-forget from the grid's perspective.
    fn set(&mut self, key: &str, value: Value);
}

/// Composite identifier namespacing one view's preferences.
///
/// `identity` is typically a route path; `table` distinguishes multiple
/// grids on one view and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewKey {
    identity: String,
    table: String,
}

impl ViewKey {
    /// Build a key from a view identity and table name.
    pub fn new(identity: impl Into<String>, table: impl Into<String>) -> Self {
        ViewKey {
            identity: identity.into(),
            table: table.into(),
        }
    }

    /// Store key for the hidden-column set: `{identity}{table}HiddenColumns`.
    pub fn hidden_columns_key(&self) -> String {
        format!("{}{}HiddenColumns", self.identity, self.table)
    }

    /// Store key for the column order: `{identity}ColumnOrder`.
    pub fn column_order_key(&self) -> String {
        format!("{}ColumnOrder", self.identity)
    }
}

/// The persisted shape of one view's layout preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPreference {
    /// Ids of hidden data columns.
    pub hidden_column_ids: Vec<String>,
    /// Data column ids in rendering order.
    pub column_order: Vec<String>,
}

fn read_ids(store: &dyn PreferenceStore, key: &str) -> Vec<String> {
    store
        .get(key)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// Runtime view-preference state for one mounted grid.
///
/// Owns the current hidden set and stored order, applies the
/// default-visibility rule exactly once per mount, and is the sole writer
/// of preference keys (via [`ViewPrefs::save`], called only from the
/// settings surface submit path).
#[derive(Debug)]
pub struct ViewPrefs {
    key: ViewKey,
    hidden: Vec<String>,
    stored_order: Vec<String>,
    default_visible: Option<Vec<String>>,
    /// Guard: the computed default hidden set is applied at most once per
    /// mount, even if dependent values re-evaluate.
    default_applied: bool,
}

impl ViewPrefs {
    /// Mount-time initialization.
    ///
    /// A persisted non-empty hidden set wins. Otherwise, if the grid was
    /// configured with `default_visible`, the initial hidden set is
    /// computed as all data columns minus the defaults minus the
    /// always-visible set, and is *not* persisted; only an explicit save
    /// through the settings surface writes to the store.
    ///
    /// `always_visible` ids (columns whose checklist entry is locked) are
    /// never put into the computed hidden set: a hidden locked column could
    /// not be unhidden through the settings surface.
    pub fn load(
        key: ViewKey,
        store: &dyn PreferenceStore,
        registry: &ColumnRegistry,
        default_visible: Option<Vec<String>>,
        always_visible: &[String],
    ) -> Self {
        let mut prefs = ViewPrefs {
            hidden: read_ids(store, &key.hidden_columns_key()),
            stored_order: read_ids(store, &key.column_order_key()),
            key,
            default_visible,
            default_applied: false,
        };
        prefs.apply_default_visibility(registry, always_visible);
        trace!(
            hidden = ?prefs.hidden,
            order = ?prefs.stored_order,
            "view preferences loaded"
        );
        prefs
    }

    fn apply_default_visibility(&mut self, registry: &ColumnRegistry, always_visible: &[String]) {
        if !self.hidden.is_empty() || self.default_applied {
            return;
        }
        let Some(defaults) = &self.default_visible else {
            return;
        };
        self.hidden = registry
            .data_column_ids()
            .into_iter()
            .filter(|id| !defaults.contains(id) && !always_visible.contains(id))
            .collect();
        self.default_applied = true;
        debug!(hidden = ?self.hidden, "applied default visibility (not persisted)");
    }

    /// The view key these preferences belong to.
    pub fn key(&self) -> &ViewKey {
        &self.key
    }

    /// Whether a data column is currently hidden. Ids that are not
    /// registered data columns are never reported hidden.
    pub fn is_hidden(&self, registry: &ColumnRegistry, column_id: &str) -> bool {
        registry.contains(column_id) && self.hidden.iter().any(|id| id == column_id)
    }

    /// Currently hidden data-column ids, stale entries excluded.
    pub fn hidden_ids(&self, registry: &ColumnRegistry) -> Vec<String> {
        self.hidden
            .iter()
            .filter(|id| registry.contains(id))
            .cloned()
            .collect()
    }

    /// Effective rendering order of data columns: the stored order with
    /// stale ids dropped, then any columns absent from the stored order
    /// appended in registry order.
    pub fn effective_order(&self, registry: &ColumnRegistry) -> Vec<String> {
        let data_ids = registry.data_column_ids();
        let mut order: Vec<String> = self
            .stored_order
            .iter()
            .filter(|id| data_ids.contains(id))
            .cloned()
            .collect();
        for id in data_ids {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        order
    }

    /// Persist a new preference set and adopt it. The settings surface
    /// submit is the only caller; nothing else writes the store.
    pub fn save(&mut self, store: &mut dyn PreferenceStore, preference: ViewPreference) {
        debug!(
            hidden = ?preference.hidden_column_ids,
            order = ?preference.column_order,
            "saving view preferences"
        );
        store.set(
            &self.key.hidden_columns_key(),
            Value::from(preference.hidden_column_ids.clone()),
        );
        store.set(
            &self.key.column_order_key(),
            Value::from(preference.column_order.clone()),
        );
        self.hidden = preference.hidden_column_ids;
        self.stored_order = preference.column_order;
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
    use crate::types::Column;

    fn registry(ids: &[&str]) -> ColumnRegistry {
        ColumnRegistry::new(ids.iter().map(|id| Column::data(*id)).collect()).unwrap()
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_construction() {
        let key = ViewKey::new("/contacts", "people");
        assert_eq!(key.hidden_columns_key(), "/contactspeopleHiddenColumns");
        assert_eq!(key.column_order_key(), "/contactsColumnOrder");
    }

    #[test]
    fn test_persisted_hidden_set_wins_over_defaults() {
        let mut store = MemoryStore::new();
        let key = ViewKey::new("/v", "");
        store.set(&key.hidden_columns_key(), Value::from(strings(&["note"])));

        let reg = registry(&["id", "name", "note"]);
        let prefs = ViewPrefs::load(key, &store, &reg, Some(strings(&["id"])), &[]);
        assert_eq!(prefs.hidden_ids(&reg), strings(&["note"]));
    }

    #[test]
    fn test_computed_default_hidden_set_is_not_persisted() {
        let store = MemoryStore::new();
        let reg = registry(&["id", "name", "note", "internalFlag"]);
        let prefs = ViewPrefs::load(
            ViewKey::new("/v", ""),
            &store,
            &reg,
            Some(strings(&["id", "name"])),
            &[],
        );

        let mut hidden = prefs.hidden_ids(&reg);
        hidden.sort();
        assert_eq!(hidden, strings(&["internalFlag", "note"]));
        // Nothing was written until the user explicitly saves.
        assert!(store.is_empty());
    }

    #[test]
    fn test_always_visible_excluded_from_computed_hidden_set() {
        let store = MemoryStore::new();
        let reg = registry(&["id", "name", "note"]);
        // `note` is locked in the settings checklist, so it must never land
        // in the computed hidden set even though it is not a default.
        let prefs = ViewPrefs::load(
            ViewKey::new("/v", ""),
            &store,
            &reg,
            Some(strings(&["id"])),
            &strings(&["note"]),
        );
        assert_eq!(prefs.hidden_ids(&reg), strings(&["name"]));
    }

    #[test]
    fn test_stale_ids_dropped_and_new_columns_appended() {
        let mut store = MemoryStore::new();
        let key = ViewKey::new("/v", "");
        store.set(
            &key.column_order_key(),
            Value::from(strings(&["c", "gone", "a", "b"])),
        );
        store.set(&key.hidden_columns_key(), Value::from(strings(&["gone", "b"])));

        let reg = registry(&["a", "b", "c", "d"]);
        let prefs = ViewPrefs::load(key, &store, &reg, None, &[]);
        assert_eq!(prefs.effective_order(&reg), strings(&["c", "a", "b", "d"]));
        assert_eq!(prefs.hidden_ids(&reg), strings(&["b"]));
    }

    #[test]
    fn test_save_round_trip() {
        let mut store = MemoryStore::new();
        let reg = registry(&["a", "b", "c"]);
        let mut prefs = ViewPrefs::load(ViewKey::new("/v", "t"), &store, &reg, None, &[]);

        prefs.save(
            &mut store,
            ViewPreference {
                hidden_column_ids: strings(&["a", "b"]),
                column_order: strings(&["c", "a", "b"]),
            },
        );

        // A fresh mount reads back the same layout.
        let reloaded = ViewPrefs::load(ViewKey::new("/v", "t"), &store, &reg, None, &[]);
        let mut hidden = reloaded.hidden_ids(&reg);
        hidden.sort();
        assert_eq!(hidden, strings(&["a", "b"]));
        assert_eq!(reloaded.effective_order(&reg), strings(&["c", "a", "b"]));
    }

    #[test]
    fn test_missing_keys_yield_registry_order() {
        let store = MemoryStore::new();
        let reg = registry(&["a", "b"]);
        let prefs = ViewPrefs::load(ViewKey::new("/v", ""), &store, &reg, None, &[]);
        assert_eq!(prefs.effective_order(&reg), strings(&["a", "b"]));
        assert!(prefs.hidden_ids(&reg).is_empty());
    }
}

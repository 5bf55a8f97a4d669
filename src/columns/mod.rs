//! Reusable column factories.
//!
//! Three builders compose the grid primitives into ready-made columns: the
//! structural selection and settings/menu columns, and the broadcast
//! ("copyable") data column.

mod broadcast;
mod selection;
mod settings;

pub use broadcast::{broadcast_column, BroadcastInputs, PasteFn};
pub use selection::{selection_column, SELECTION_COLUMN_ID};
pub use settings::{settings_column, SettingsDraft, SettingsEntry, MENU_COLUMN_ID};

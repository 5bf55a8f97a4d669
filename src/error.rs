//! Structured error types for gridview.
//!
//! The grid core has no I/O of its own, so the taxonomy is small:
//! configuration mistakes caught at construction time and invalid values
//! typed into a broadcast column's header input. Stale preference entries
//! (ids for columns that no longer exist) are silently dropped at read time
//! and never surface as errors.

/// All errors that can occur while configuring or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A row was constructed without a usable `id` field.
    #[error("Row is missing a string or integer `id` field")]
    MissingRowId,

    /// Two columns were registered under the same id.
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    /// An operation referenced a column id that is not registered.
    #[error("Unknown column id: {0}")]
    UnknownColumn(String),

    /// A value typed into a broadcast header input did not parse as the
    /// column's declared field type.
    #[error("Invalid {field_type} value: {raw:?}")]
    InvalidValue {
        /// The declared field type of the column.
        field_type: &'static str,
        /// The raw text that failed to parse.
        raw: String,
    },

    /// Grid configuration rejected at construction.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

//! Row data model.
//!
//! Rows are opaque field-name → value mappings supplied by the host. The
//! grid never mutates them; the only mandatory shape is a unique `id` field
//! that is either a string or an integer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GridError, Result};

/// Placeholder rendered for missing or null cell values.
///
/// Missing data is not a fault condition for the grid; a cell without a
/// value renders this instead of erroring.
pub const MISSING_VALUE: &str = "—";

/// Unique row identifier, either a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Integer id (e.g. a database primary key).
    Int(i64),
    /// String id (e.g. a UUID).
    Str(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Str(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Str(s)
    }
}

/// Declared field type for typed inputs (broadcast column header surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldType {
    /// Free text, accepted verbatim.
    #[default]
    Text,
    /// Whole number.
    Integer,
    /// Floating point number.
    Float,
    /// `true`/`false` (also accepts `1`/`0`).
    Boolean,
}

impl FieldType {
    /// Human-readable name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
        }
    }

    /// Parse raw input text into a JSON value of this type.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidValue`] if the text does not parse as
    /// this type.
    pub fn parse(self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();
        match self {
            FieldType::Text => Ok(Value::String(raw.to_string())),
            FieldType::Integer => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| self.invalid(raw)),
            FieldType::Float => trimmed
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| self.invalid(raw)),
            FieldType::Boolean => match trimmed {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(self.invalid(raw)),
            },
        }
    }

    fn invalid(self, raw: &str) -> GridError {
        GridError::InvalidValue {
            field_type: self.name(),
            raw: raw.to_string(),
        }
    }
}

/// A single row: an id plus an opaque field map.
///
/// Field values are arbitrary JSON values; the grid only reads them through
/// column accessors and [`Row::display`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    fields: BTreeMap<String, Value>,
}

impl Row {
    /// Build a row from a field map, extracting the mandatory `id` field.
    ///
    /// # Errors
    /// Returns [`GridError::MissingRowId`] if `id` is absent or is neither
    /// a string nor an integer.
    pub fn from_fields(fields: BTreeMap<String, Value>) -> Result<Self> {
        let id = match fields.get("id") {
            Some(Value::String(s)) => RowId::Str(s.clone()),
            Some(Value::Number(n)) => n.as_i64().map(RowId::Int).ok_or(GridError::MissingRowId)?,
            _ => return Err(GridError::MissingRowId),
        };
        Ok(Row { id, fields })
    }

    /// Build a row with an explicit id and field map.
    pub fn with_id(id: impl Into<RowId>, fields: BTreeMap<String, Value>) -> Self {
        Row {
            id: id.into(),
            fields,
        }
    }

    /// The row's unique id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All fields of the row.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Render a field as display text.
    ///
    /// Strings render bare, numbers and booleans via their canonical text,
    /// missing and null fields as [`MISSING_VALUE`], and composite values
    /// as compact JSON.
    pub fn display(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => MISSING_VALUE.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
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
    use serde_json::json;
    use test_case::test_case;

    fn fields(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_from_fields_string_id() {
        let row = Row::from_fields(fields(&[("id", json!("r1")), ("name", json!("Ada"))])).unwrap();
        assert_eq!(row.id(), &RowId::from("r1"));
    }

    #[test]
    fn test_from_fields_integer_id() {
        let row = Row::from_fields(fields(&[("id", json!(7))])).unwrap();
        assert_eq!(row.id(), &RowId::Int(7));
    }

    #[test]
    fn test_from_fields_missing_id() {
        let err = Row::from_fields(fields(&[("name", json!("Ada"))])).unwrap_err();
        assert!(matches!(err, GridError::MissingRowId));
    }

    #[test]
    fn test_from_fields_float_id_rejected() {
        let err = Row::from_fields(fields(&[("id", json!(1.5))])).unwrap_err();
        assert!(matches!(err, GridError::MissingRowId));
    }

    #[test]
    fn test_display_missing_and_null() {
        let row = Row::with_id(1, fields(&[("note", Value::Null)]));
        assert_eq!(row.display("note"), MISSING_VALUE);
        assert_eq!(row.display("absent"), MISSING_VALUE);
    }

    #[test]
    fn test_display_scalars() {
        let row = Row::with_id(
            1,
            fields(&[("name", json!("Ada")), ("age", json!(36)), ("ok", json!(true))]),
        );
        assert_eq!(row.display("name"), "Ada");
        assert_eq!(row.display("age"), "36");
        assert_eq!(row.display("ok"), "true");
    }

    #[test_case(FieldType::Integer, "42" => json!(42); "integer")]
    #[test_case(FieldType::Integer, " 42 " => json!(42); "integer trimmed")]
    #[test_case(FieldType::Float, "2.5" => json!(2.5); "float")]
    #[test_case(FieldType::Boolean, "true" => json!(true); "bool word")]
    #[test_case(FieldType::Boolean, "0" => json!(false); "bool digit")]
    #[test_case(FieldType::Text, "  raw " => json!("  raw "); "text verbatim")]
    fn test_field_type_parse_ok(ft: FieldType, raw: &str) -> Value {
        ft.parse(raw).unwrap()
    }

    #[test_case(FieldType::Integer, "four")]
    #[test_case(FieldType::Float, "")]
    #[test_case(FieldType::Boolean, "yes")]
    fn test_field_type_parse_err(ft: FieldType, raw: &str) {
        assert!(matches!(
            ft.parse(raw),
            Err(GridError::InvalidValue { .. })
        ));
    }
}

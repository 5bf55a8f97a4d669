//! Broadcast ("copyable") column factory and its header input surfaces.
//!
//! A broadcast column is an ordinary data column whose header additionally
//! offers a small input surface, opened by a context-click on the header.
//! Submitting forwards one typed value to the host's `paste_to_column`
//! callback; what the host does with it (apply to all rows, to selected
//! rows, ...) is entirely its own business.

use std::collections::HashMap;

use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::render::{HeaderContext, Ui};
use crate::types::{Column, FieldType};

/// Host callback receiving `(accessor field, typed value)` on submit.
pub type PasteFn = Box<dyn Fn(&str, Value)>;

/// Build a broadcast column over the given field.
///
/// Renders like a plain data column until its input surface opens; then
/// the header shows the label together with the input.
pub fn broadcast_column(field: impl Into<String>, field_type: FieldType) -> Column {
    let mut column = Column::data(field)
        .field_type(field_type)
        .header_renderer(|ctx: &HeaderContext| match &ctx.broadcast_input {
            Some(buffer) => Ui::Group(vec![
                Ui::text(ctx.label.clone()),
                Ui::Input {
                    buffer: buffer.clone(),
                },
            ]),
            None => Ui::text(ctx.label.clone()),
        });
    column.set_broadcast(true);
    column
}

/// Open header input surfaces, keyed by column id.
///
/// Owned by the orchestrator; a surface closes on Escape or on successful
/// submission and stays open (buffer intact) when parsing fails.
#[derive(Debug, Default)]
pub struct BroadcastInputs {
    open: HashMap<String, String>,
}

impl BroadcastInputs {
    /// Open the surface for a column with an empty buffer. Reopening an
    /// already-open surface keeps its buffer.
    pub fn open(&mut self, column_id: &str) {
        self.open.entry(column_id.to_string()).or_default();
    }

    /// Whether a column's surface is open.
    pub fn is_open(&self, column_id: &str) -> bool {
        self.open.contains_key(column_id)
    }

    /// Whether any surface is open.
    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    /// The current buffer of a column's surface, if open.
    pub fn buffer(&self, column_id: &str) -> Option<&str> {
        self.open.get(column_id).map(String::as_str)
    }

    /// Replace the buffer of an open surface. Closed surfaces are ignored.
    pub fn set_buffer(&mut self, column_id: &str, text: impl Into<String>) {
        if let Some(buffer) = self.open.get_mut(column_id) {
            *buffer = text.into();
        }
    }

    /// Close one surface (Escape).
    pub fn close(&mut self, column_id: &str) {
        self.open.remove(column_id);
    }

    /// Close every open surface (global Escape).
    pub fn close_all(&mut self) {
        self.open.clear();
    }

    /// Parse the buffer per the column's declared type and forward it to
    /// the host. Closes the surface on success; on a parse error the
    /// surface stays open with its buffer intact.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidValue`](crate::GridError::InvalidValue)
    /// when the buffer does not parse as the declared field type.
    pub fn submit(&mut self, column: &Column, paste: &PasteFn) -> Result<()> {
        let Some(buffer) = self.open.get(column.id()) else {
            return Ok(());
        };
        let value = column.declared_type().parse(buffer)?;
        trace!(column = column.id(), ?value, "broadcast value forwarded");
        paste(column.field(), value);
        self.open.remove(column.id());
        Ok(())
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
    use crate::error::GridError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_submit_forwards_typed_value_and_closes() {
        let column = broadcast_column("age", FieldType::Integer);
        let mut inputs = BroadcastInputs::default();
        inputs.open("age");
        inputs.set_buffer("age", "42");

        let seen: Rc<RefCell<Vec<(String, Value)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let paste: PasteFn = Box::new(move |field, value| {
            sink.borrow_mut().push((field.to_string(), value));
        });

        inputs.submit(&column, &paste).unwrap();
        assert_eq!(
            seen.borrow().as_slice(),
            [("age".to_string(), Value::from(42))]
        );
        assert!(!inputs.is_open("age"));
    }

    #[test]
    fn test_parse_failure_keeps_surface_open() {
        let column = broadcast_column("age", FieldType::Integer);
        let mut inputs = BroadcastInputs::default();
        inputs.open("age");
        inputs.set_buffer("age", "not a number");

        let paste: PasteFn = Box::new(|_, _| {});
        let err = inputs.submit(&column, &paste).unwrap_err();
        assert!(matches!(err, GridError::InvalidValue { .. }));
        assert_eq!(inputs.buffer("age"), Some("not a number"));
    }

    #[test]
    fn test_escape_closes_without_submitting() {
        let mut inputs = BroadcastInputs::default();
        inputs.open("age");
        inputs.close("age");
        assert!(!inputs.is_open("age"));
    }

    #[test]
    fn test_submit_on_closed_surface_is_noop() {
        let column = broadcast_column("age", FieldType::Integer);
        let mut inputs = BroadcastInputs::default();
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        let paste: PasteFn = Box::new(move |_, _| *sink.borrow_mut() += 1);
        inputs.submit(&column, &paste).unwrap();
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_header_renders_input_when_open() {
        let column = broadcast_column("age", FieldType::Integer);
        let header = column.header().unwrap();
        let ctx = HeaderContext {
            column_id: "age".to_string(),
            label: "Age".to_string(),
            sortable: false,
            is_sorted: false,
            is_sorted_desc: false,
            select_all: None,
            broadcast_input: Some("4".to_string()),
        };
        assert_eq!(
            header.render_header(&ctx),
            Ui::Group(vec![
                Ui::text("Age"),
                Ui::Input {
                    buffer: "4".to_string()
                }
            ])
        );
    }
}

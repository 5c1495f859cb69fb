//! Rows: one value per declared field of a record type.

use std::sync::Arc;

use crate::column::RecordType;
use crate::error::TableError;
use crate::value::{Value, ValueKind};
use crate::width::{char_count, display_width};
use crate::Result;

/// One record instance.
///
/// A row always holds exactly one value per field of its record type,
/// hidden fields included, and every value is either `Null` or of the
/// field's declared kind.
#[derive(Debug, Clone)]
pub struct Row {
    record_type: Arc<RecordType>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from values given in field declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::FieldCount`] if the number of values differs
    /// from the number of fields, and [`TableError::KindMismatch`] if a
    /// non-null value has a kind other than its field's.
    pub fn new(record_type: &Arc<RecordType>, values: Vec<Value>) -> Result<Self> {
        let fields = record_type.fields();
        if values.len() != fields.len() {
            return Err(TableError::FieldCount {
                expected: fields.len(),
                found: values.len(),
            });
        }
        for (field, value) in fields.iter().zip(&values) {
            let found = value.kind();
            if found != ValueKind::Null && found != field.kind {
                return Err(TableError::KindMismatch {
                    column: field.key.clone(),
                    expected: field.kind,
                    found,
                });
            }
        }
        Ok(Self {
            record_type: Arc::clone(record_type),
            values,
        })
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Values in field declaration order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Raw value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `key` is not declared.
    pub fn value(&self, key: &str) -> Result<&Value> {
        self.record_type
            .index_of(key)
            .map(|i| &self.values[i])
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))
    }

    /// Text shown for a field: formatted through the column's datetime
    /// pattern when the value is temporal, the value's plain text
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `key` is not declared, and
    /// [`TableError::InvalidFormat`] if the column's pattern cannot format
    /// the value.
    pub fn rendered_value(&self, key: &str) -> Result<String> {
        let column = self.record_type.column(key)?;
        let value = self.value(key)?;
        let pattern = column.value_format.as_deref();
        value.render(pattern).map_err(|_| TableError::InvalidFormat {
            column: key.to_string(),
            pattern: pattern.unwrap_or_default().to_string(),
            kind: value.kind(),
        })
    }

    /// Display width of [`Row::rendered_value`].
    ///
    /// # Errors
    ///
    /// Fails like [`Row::rendered_value`].
    pub fn display_width(&self, key: &str) -> Result<usize> {
        self.rendered_value(key).map(|s| display_width(&s))
    }

    /// Character count of [`Row::rendered_value`].
    ///
    /// # Errors
    ///
    /// Fails like [`Row::rendered_value`].
    pub fn char_len(&self, key: &str) -> Result<usize> {
        self.rendered_value(key).map(|s| char_count(&s))
    }
}

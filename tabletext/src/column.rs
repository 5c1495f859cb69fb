//! Record types and their resolved column descriptors.
//!
//! A [`RecordType`] is declared once, as an ordered list of [`FieldDef`]s,
//! each carrying its own presentation options. The first time a record
//! type's columns are requested they are resolved into
//! [`ColumnDescriptor`]s and cached for the lifetime of the record type.
//!
//! ## Example
//!
//! ```rust
//! use tabletext::{Alignment, FieldDef, RecordType, ValueKind};
//!
//! let employee = RecordType::builder("Employee")
//!     .field(FieldDef::new("name", ValueKind::Text).alias("Name").align(Alignment::Left))
//!     .field(FieldDef::new("age", ValueKind::Integer))
//!     .field(FieldDef::new("id", ValueKind::Integer).hidden())
//!     .build()
//!     .unwrap();
//!
//! let headers: Vec<&str> = employee
//!     .visible_columns()
//!     .map(|c| c.header.as_str())
//!     .collect();
//! assert_eq!(headers, ["Name", "age"]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::highlight::ConditionalFormat;
use crate::value::ValueKind;
use crate::width::display_width;
use crate::Result;

/// Horizontal placement of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" | "<" => Ok(Alignment::Left),
            "center" | "centre" | "c" | "^" => Ok(Alignment::Center),
            "right" | "r" | ">" => Ok(Alignment::Right),
            _ => Err(format!("Unknown alignment: {}", s)),
        }
    }
}

/// Declaration-time options of one field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub key: String,
    pub kind: ValueKind,
    pub alias: Option<String>,
    pub alignment: Alignment,
    pub value_format: Option<String>,
    pub hidden: bool,
    pub conditional_format: Option<Arc<dyn ConditionalFormat>>,
}

impl FieldDef {
    pub fn new(key: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            key: key.into(),
            kind,
            alias: None,
            alignment: Alignment::default(),
            value_format: None,
            hidden: false,
            conditional_format: None,
        }
    }

    /// Builder: display header instead of the key
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Builder: cell alignment
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: strftime pattern for temporal values
    pub fn format(mut self, pattern: impl Into<String>) -> Self {
        self.value_format = Some(pattern.into());
        self
    }

    /// Builder: keep the field out of rendered output
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Builder: conditional highlight rule
    pub fn highlight(mut self, rule: impl ConditionalFormat + 'static) -> Self {
        self.conditional_format = Some(Arc::new(rule));
        self
    }

    /// Builder: shared conditional highlight rule
    pub fn highlight_shared(mut self, rule: Arc<dyn ConditionalFormat>) -> Self {
        self.conditional_format = Some(rule);
        self
    }
}

/// Resolved, immutable presentation metadata of one column.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub key: String,
    pub header: String,
    pub kind: ValueKind,
    pub hidden: bool,
    pub alignment: Alignment,
    pub value_format: Option<String>,
    pub conditional_format: Option<Arc<dyn ConditionalFormat>>,
}

impl ColumnDescriptor {
    /// Display width of the header, the floor of the column's width
    pub fn header_width(&self) -> usize {
        display_width(&self.header)
    }
}

/// Resolve the column descriptors of a record type, in declaration order.
///
/// Pure: the same record type always yields the same descriptors. Callers
/// should go through [`RecordType::columns`], which caches the result.
pub fn resolve(record_type: &RecordType) -> Vec<ColumnDescriptor> {
    record_type
        .fields
        .iter()
        .map(|field| ColumnDescriptor {
            key: field.key.clone(),
            header: field.alias.clone().unwrap_or_else(|| field.key.clone()),
            kind: field.kind,
            hidden: field.hidden,
            alignment: field.alignment,
            value_format: field.value_format.clone(),
            conditional_format: field.conditional_format.clone(),
        })
        .collect()
}

/// A named, ordered set of field definitions shared by rows and tables.
///
/// Identity is nominal: two record types built separately are different
/// types even when their fields are identical.
pub struct RecordType {
    name: String,
    fields: Vec<FieldDef>,
    columns: OnceLock<Vec<ColumnDescriptor>>,
}

impl RecordType {
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Build a record type from field definitions.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if two fields share a key.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Result<Arc<Self>> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(TableError::DuplicateColumn(field.key.clone()));
            }
        }
        Ok(Arc::new(Self {
            name: name.into(),
            fields,
            columns: OnceLock::new(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// All column descriptors, hidden ones included, resolved on first use
    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.columns.get_or_init(|| {
            log::debug!(
                "resolving {} columns for record type '{}'",
                self.fields.len(),
                self.name
            );
            resolve(self)
        })
    }

    /// Columns that appear in rendered output
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns().iter().filter(|c| !c.hidden)
    }

    /// Position of `key` among the declared fields
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Descriptor of `key`, hidden or not
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if `key` is not declared.
    pub fn column(&self, key: &str) -> Result<&ColumnDescriptor> {
        self.index_of(key)
            .map(|i| &self.columns()[i])
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn is_resolved(&self) -> bool {
        self.columns.get().is_some()
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RecordType`].
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl RecordTypeBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if two fields share a key.
    pub fn build(self) -> Result<Arc<RecordType>> {
        RecordType::new(self.name, self.fields)
    }
}

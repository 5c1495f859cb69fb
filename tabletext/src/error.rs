//! Error types for tabletext

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while building, sorting or rendering tables
#[derive(Error, Debug)]
pub enum TableError {
    /// Row inserted into a table bound to another record type
    #[error("row of type '{found}' does not match table row type '{expected}'")]
    TypeMismatch { expected: String, found: String },

    /// Column key not declared on the record type
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Malformed sort request
    #[error("invalid sort specification: {0}")]
    InvalidSortSpec(String),

    /// Conditional format evaluated without a match target
    #[error("{0} rule has no match target configured")]
    UnconfiguredPredicate(&'static str),

    /// Two fields of one record type share a key
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// Row built with the wrong number of values
    #[error("expected {expected} values, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Value kind differs from the field's declared kind
    #[error("column '{column}' holds {expected} values, found {found}")]
    KindMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Datetime pattern that cannot format the column's values
    #[error("column '{column}': pattern '{pattern}' cannot format {kind} values")]
    InvalidFormat {
        column: String,
        pattern: String,
        kind: ValueKind,
    },

    /// IO error while writing rendered output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! # tabletext
//!
//! Render uniformly typed records as aligned text tables for the terminal.
//!
//! ## Overview
//!
//! A table is bound to a record type: an ordered list of fields, each with
//! its own presentation options. Rows are appended one at a time; the table
//! keeps the widest rendered value seen in every column and pads each cell
//! to that width. Widths are measured in terminal columns, so CJK and other
//! wide characters line up with plain ASCII.
//!
//! ## Features
//!
//! - **Per-column options**: header alias, hiding, left/center/right
//!   alignment, strftime patterns for dates and times
//! - **Conditional highlighting**: colour cells whose text contains or
//!   equals a target, or plug in your own rule
//! - **Stable multi-key sorting**: ascending or descending per key, hidden
//!   columns included
//! - **Configurable glyphs**: ASCII or box drawing presets, custom line
//!   terminator and row separators
//! - **Static record types**: declare a struct and its columns at once
//!   with [`record!`]
//!
//! ## Example
//!
//! ```rust
//! use tabletext::{Alignment, FieldDef, RecordType, Row, Table, ValueKind};
//!
//! let rt = RecordType::builder("Staff")
//!     .field(FieldDef::new("Name", ValueKind::Text).align(Alignment::Left))
//!     .field(FieldDef::new("Age", ValueKind::Integer))
//!     .field(FieldDef::new("Salary", ValueKind::Integer).hidden())
//!     .build()
//!     .unwrap();
//!
//! let mut table = Table::new(&rt);
//! for (name, age, salary) in [("Zoe", 27, 7000), ("Ann", 21, 5000), ("Bo", 21, 6000)] {
//!     let row = Row::new(&rt, vec![name.into(), age.into(), salary.into()]).unwrap();
//!     table.insert(row).unwrap();
//! }
//!
//! let text = table
//!     .render_table(Some(&["Age", "Name"]), Some(&[true, true]))
//!     .unwrap();
//! assert_eq!(text, "Name | Age\n-----|----\nAnn  | 21 \nBo   | 21 \nZoe  | 27 ");
//! ```

pub mod column;
pub mod error;
pub mod highlight;
pub mod options;
pub mod record;
pub mod row;
pub mod sort;
pub mod table;
pub mod value;
pub mod width;

pub use column::{Alignment, ColumnDescriptor, FieldDef, RecordType, RecordTypeBuilder};
pub use error::TableError;
pub use highlight::{ColorId, ConditionalFormat, Contains, Decoration, Exact};
pub use options::{BorderPreset, TableStyle};
pub use record::Record;
pub use row::Row;
pub use sort::{sort_rows, OrderDirection, SortSpec};
pub use table::Table;
pub use value::{IntoValue, Value, ValueKind};
pub use width::{char_count, display_width};

/// Result type for tabletext operations
pub type Result<T> = std::result::Result<T, TableError>;

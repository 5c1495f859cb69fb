//! Statically declared record types.
//!
//! The [`record!`](crate::record!) macro declares a plain Rust struct
//! together with its [`RecordType`]. Field options are attached next to
//! the field, at declaration time:
//!
//! ```rust
//! use tabletext::{record, Alignment, Table};
//!
//! record! {
//!     /// One line of the payroll
//!     pub struct Payroll {
//!         name: String => alias("Name").align(Alignment::Left),
//!         age: i64 => alias("Age"),
//!         salary: i64 => hidden(),
//!     }
//! }
//!
//! let mut table = Table::for_record::<Payroll>();
//! table
//!     .insert_record(Payroll { name: "Zoe".into(), age: 27, salary: 7000 })
//!     .unwrap();
//! assert_eq!(table.render_header_line(), "Name | Age");
//! ```
//!
//! The record type is built once per struct, on first use, and shared by
//! every row and table of that struct.

use std::sync::Arc;

use crate::column::{FieldDef, RecordType};
use crate::row::Row;
use crate::value::Value;
use crate::Result;

/// A Rust type whose instances become table rows.
pub trait Record {
    /// The shared record type of `Self`. Must return the same `Arc` on
    /// every call, since tables compare record types by identity.
    fn record_type() -> Arc<RecordType>;

    /// Field values in declaration order.
    fn into_values(self) -> Vec<Value>;

    /// Convert into a row of [`Record::record_type`].
    ///
    /// # Errors
    ///
    /// Fails like [`Row::new`] if `into_values` disagrees with the
    /// declared fields.
    fn into_row(self) -> Result<Row>
    where
        Self: Sized,
    {
        Row::new(&Self::record_type(), self.into_values())
    }
}

#[doc(hidden)]
pub fn __configure(field: FieldDef, configure: impl FnOnce(FieldDef) -> FieldDef) -> FieldDef {
    configure(field)
}

/// Declare a struct and its record type.
///
/// Each field may be followed by `=>` and a chain of [`FieldDef`]
/// builder calls (`alias`, `align`, `format`, `hidden`, `highlight`). See
/// the [module docs](crate::record) for an example.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $fty:ty $( => $( $opt:ident ( $($arg:expr),* $(,)? ) ).+ )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
        }

        impl $crate::Record for $name {
            fn record_type() -> ::std::sync::Arc<$crate::RecordType> {
                static RECORD_TYPE: ::std::sync::OnceLock<::std::sync::Arc<$crate::RecordType>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(RECORD_TYPE.get_or_init(|| {
                    let fields = ::std::vec![
                        $(
                            $crate::record::__configure(
                                $crate::FieldDef::new(
                                    stringify!($field),
                                    <$fty as $crate::IntoValue>::KIND,
                                ),
                                |field| field $( $( .$opt( $($arg),* ) )+ )?,
                            ),
                        )*
                    ];
                    match $crate::RecordType::new(stringify!($name), fields) {
                        Ok(record_type) => record_type,
                        // Struct fields cannot share a name, so keys are unique.
                        Err(e) => unreachable!("{}", e),
                    }
                }))
            }

            fn into_values(self) -> ::std::vec::Vec<$crate::Value> {
                ::std::vec![
                    $( $crate::IntoValue::into_value(self.$field), )*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::highlight::{ColorId, Decoration, Exact};
    use crate::{Alignment, Record, Table, TableError, Value, ValueKind};
    use chrono::NaiveDate;
    use std::sync::Arc;

    crate::record! {
        /// Test record
        pub struct Employee {
            name: String => alias("Name").align(Alignment::Left),
            age: i64 => alias("Age"),
            hired: NaiveDate => alias("Hired").format("%Y/%m"),
            salary: Option<i64> => hidden(),
        }
    }

    crate::record! {
        struct Plain {
            a: i32,
            b: bool,
        }
    }

    crate::record! {
        struct Flagged {
            status: &'static str => highlight(Exact::new("down", Decoration::new().foreground(ColorId::RED))),
        }
    }

    fn hired(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_record_type_is_shared() {
        let a = Employee::record_type();
        let b = Employee::record_type();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "Employee");
    }

    #[test]
    fn test_declared_fields() {
        let rt = Employee::record_type();
        let keys: Vec<&str> = rt.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["name", "age", "hired", "salary"]);
        assert_eq!(rt.column("salary").unwrap().kind, ValueKind::Integer);
        assert!(rt.column("salary").unwrap().hidden);
        assert_eq!(rt.column("hired").unwrap().header, "Hired");
        assert_eq!(rt.column("name").unwrap().alignment, Alignment::Left);
    }

    #[test]
    fn test_fields_without_options() {
        let rt = Plain::record_type();
        let headers: Vec<&str> = rt.visible_columns().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, ["a", "b"]);
        let row = Plain { a: 1, b: true }.into_row().unwrap();
        assert_eq!(row.values(), &[Value::Integer(1), Value::Bool(true)]);
    }

    #[test]
    fn test_records_render() {
        let mut table = Table::for_record::<Employee>();
        table
            .insert_record(Employee {
                name: "Zoe".into(),
                age: 27,
                hired: hired(2019, 4),
                salary: Some(7000),
            })
            .unwrap();
        table
            .insert_record(Employee {
                name: "Bo".into(),
                age: 21,
                hired: hired(2022, 11),
                salary: None,
            })
            .unwrap();
        assert_eq!(
            table.render().unwrap(),
            "Name | Age |  Hired \n-----|-----|--------\nZoe  | 27  | 2019/04\nBo   | 21  | 2022/11"
        );
    }

    #[test]
    fn test_other_record_rejected() {
        let mut table = Table::for_record::<Employee>();
        let err = table.insert_record(Plain { a: 1, b: false }).unwrap_err();
        assert!(matches!(
            err,
            TableError::TypeMismatch { ref expected, ref found }
                if expected == "Employee" && found == "Plain"
        ));
    }

    #[test]
    fn test_highlight_option() {
        let mut table = Table::for_record::<Flagged>();
        table.insert_record(Flagged { status: "down" }).unwrap();
        table.insert_record(Flagged { status: "up" }).unwrap();
        let lines: Vec<String> = table
            .rows()
            .iter()
            .map(|r| table.render_row_line(r).unwrap())
            .collect();
        assert!(lines[0].contains('\u{1b}'));
        assert_eq!(lines[1], "  up  ");
    }
}

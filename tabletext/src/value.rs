//! Cell values held by rows.
//!
//! A [`Value`] is the typed content of one field. Temporal variants can be
//! rendered through a column's strftime pattern; every other variant always
//! renders with its `Display` text.

use std::cmp::Ordering;
use std::fmt::{self, Write};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The kind of a value, without its payload.
///
/// Every field declares one kind; rows may hold that kind or `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    Date,
    Time,
    DateTime,
}

impl ValueKind {
    /// Whether values of this kind can be rendered with a datetime pattern
    pub fn is_temporal(self) -> bool {
        matches!(self, ValueKind::Date | ValueKind::Time | ValueKind::DateTime)
    }

    /// Fixed rank used to order values of unrelated kinds
    fn rank(self) -> u8 {
        match self {
            ValueKind::Null => 0,
            ValueKind::Bool => 1,
            ValueKind::Integer | ValueKind::Float => 2,
            ValueKind::Text => 3,
            ValueKind::Date => 4,
            ValueKind::Time => 5,
            ValueKind::DateTime => 6,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render with an optional datetime pattern.
    ///
    /// The pattern only applies to temporal values; other values ignore it
    /// and use their default text.
    ///
    /// # Errors
    ///
    /// Fails when the pattern has an unknown specifier or asks for a part
    /// the value lacks, such as `%H` on a date.
    pub fn render(&self, pattern: Option<&str>) -> Result<String, fmt::Error> {
        let mut out = String::new();
        match (self, pattern) {
            (Value::Date(d), Some(p)) => write!(out, "{}", d.format(p))?,
            (Value::Time(t), Some(p)) => write!(out, "{}", t.format(p))?,
            (Value::DateTime(dt), Some(p)) => write!(out, "{}", dt.format(p))?,
            _ => write!(out, "{self}")?,
        }
        Ok(out)
    }

    /// Total order used by the sort engine.
    ///
    /// `Null` sorts first, integers and floats compare numerically, and
    /// values of unrelated kinds fall back to a fixed kind rank.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            #[allow(clippy::cast_precision_loss)]
            (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            #[allow(clippy::cast_precision_loss)]
            (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (a, b) => a.kind().rank().cmp(&b.kind().rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// Conversion of a Rust field type into a [`Value`].
///
/// `KIND` is the declared kind of a field of this type; it is what the
/// `record!` macro records in the generated field definitions.
pub trait IntoValue {
    const KIND: ValueKind;

    fn into_value(self) -> Value;
}

macro_rules! impl_into_value {
    ($ty:ty, $kind:ident, $v:ident => $body:expr) => {
        impl IntoValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn into_value(self) -> Value {
                let $v = self;
                $body
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                v.into_value()
            }
        }
    };
}

impl_into_value!(bool, Bool, v => Value::Bool(v));
impl_into_value!(i64, Integer, v => Value::Integer(v));
impl_into_value!(i32, Integer, v => Value::Integer(i64::from(v)));
impl_into_value!(u32, Integer, v => Value::Integer(i64::from(v)));
impl_into_value!(f64, Float, v => Value::Float(v));
impl_into_value!(String, Text, v => Value::Text(v));
impl_into_value!(&'static str, Text, v => Value::Text(v.to_string()));
impl_into_value!(NaiveDate, Date, v => Value::Date(v));
impl_into_value!(NaiveTime, Time, v => Value::Time(v));
impl_into_value!(NaiveDateTime, DateTime, v => Value::DateTime(v));

impl<T: IntoValue> IntoValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: IntoValue> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.into_value()
    }
}

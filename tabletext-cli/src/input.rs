//! Reading JSON records and turning them into a table
//!
//! Input is a JSON array of objects. Columns are the union of object keys
//! in order of first appearance; a key missing from an object is null.

use std::fs;
use std::io::{self, Read};

use anyhow::{anyhow, bail, Context};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value as JsonValue};
use tabletext::{FieldDef, RecordType, Row, Table, TableStyle, Value, ValueKind};

use crate::options::ColumnOptions;

pub type JsonRecord = Map<String, JsonValue>;

const DATETIME_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_PATTERN: &str = "%Y-%m-%d";
const TIME_PATTERNS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Read the whole input from `path`, or stdin when `path` is absent or `-`
pub fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}")),
    }
}

pub fn parse_records(text: &str) -> anyhow::Result<Vec<JsonRecord>> {
    let value: JsonValue = serde_json::from_str(text).context("Input is not valid JSON")?;
    let JsonValue::Array(items) = value else {
        bail!("Expected a JSON array of objects");
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            JsonValue::Object(map) => Ok(map),
            other => Err(anyhow!("Item {i} is not an object: {other}")),
        })
        .collect()
}

pub fn column_keys(records: &[JsonRecord]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Kind of a column, taken from its first non-null value.
///
/// Integer columns widen to float when any later value is fractional.
/// Strings are parsed as dates and times only when the column has a
/// format pattern. Columns with no values at all are text.
pub fn infer_kind(records: &[JsonRecord], key: &str, format: Option<&str>) -> ValueKind {
    let mut values = records
        .iter()
        .filter_map(|record| record.get(key))
        .filter(|value| !value.is_null());
    let Some(first) = values.next() else {
        return ValueKind::Text;
    };
    match first {
        JsonValue::Bool(_) => ValueKind::Bool,
        JsonValue::Number(n) if n.is_i64() => {
            if values.any(|v| v.is_number() && !v.is_i64()) {
                ValueKind::Float
            } else {
                ValueKind::Integer
            }
        }
        JsonValue::Number(_) => ValueKind::Float,
        JsonValue::String(s) if format.is_some() => {
            parse_temporal(s).map_or(ValueKind::Text, |value| value.kind())
        }
        _ => ValueKind::Text,
    }
}

/// Parse a datetime, date or time, trying them in that order
pub fn parse_temporal(s: &str) -> Option<Value> {
    let s = s.trim();
    DATETIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(s, pattern).ok())
        .map(Value::DateTime)
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_PATTERN)
                .ok()
                .map(Value::Date)
        })
        .or_else(|| {
            TIME_PATTERNS
                .iter()
                .find_map(|pattern| NaiveTime::parse_from_str(s, pattern).ok())
                .map(Value::Time)
        })
}

/// Convert one JSON value into a cell of `kind`.
///
/// Text columns accept anything and keep the JSON rendering of
/// non-strings.
pub fn to_value(json: &JsonValue, kind: ValueKind) -> anyhow::Result<Value> {
    let value = match (kind, json) {
        (_, JsonValue::Null) => Value::Null,
        (ValueKind::Bool, JsonValue::Bool(b)) => Value::Bool(*b),
        (ValueKind::Integer, JsonValue::Number(n)) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => bail!("expected integer, found {n}"),
        },
        (ValueKind::Float, JsonValue::Number(n)) => match n.as_f64() {
            Some(f) => Value::Float(f),
            None => bail!("expected float, found {n}"),
        },
        (ValueKind::Text, JsonValue::String(s)) => Value::Text(s.clone()),
        (ValueKind::Text, other) => Value::Text(other.to_string()),
        (kind, JsonValue::String(s)) if kind.is_temporal() => match parse_temporal(s) {
            Some(value) if value.kind() == kind => value,
            _ => bail!("expected {kind}, found '{s}'"),
        },
        (kind, other) => bail!("expected {kind}, found {other}"),
    };
    Ok(value)
}

/// Build a table from `records`, one column per key.
///
/// # Errors
///
/// Fails when an option names a key no record has, or when a value does
/// not fit its column's kind.
pub fn build_table(
    records: &[JsonRecord],
    options: &ColumnOptions,
    style: TableStyle,
) -> anyhow::Result<Table> {
    let mut builder = RecordType::builder("records");
    for key in column_keys(records) {
        let kind = infer_kind(records, &key, options.format(&key));
        log::debug!("column {key}: {kind}");
        builder = builder.field(options.apply(FieldDef::new(key, kind)));
    }
    let record_type = builder.build()?;

    for key in options.keys() {
        record_type.column(key)?;
    }

    let mut table = Table::with_style(&record_type, style);
    for (i, record) in records.iter().enumerate() {
        let values = record_type
            .fields()
            .iter()
            .map(|field| {
                let json = record.get(&field.key).unwrap_or(&JsonValue::Null);
                to_value(json, field.kind)
                    .with_context(|| format!("Record {i}, column {}", field.key))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        table.insert(Row::new(&record_type, values)?)?;
    }
    Ok(table)
}

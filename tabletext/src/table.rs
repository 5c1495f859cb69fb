//! Table model and layout engine.
//!
//! A [`Table`] is bound to one record type. Rows are appended one at a
//! time, and each insertion grows the running maximum display width of
//! every visible column. Widths start at the header width, so headers are
//! never cut.
//!
//! Rendering is line based:
//! 1. header line (headers aligned to column widths)
//! 2. header separator line (dense rule under the header)
//! 3. one line per row, optionally separated by row separator lines
//!
//! ## Example
//!
//! ```rust
//! use tabletext::{FieldDef, RecordType, Row, Table, ValueKind};
//!
//! let rt = RecordType::builder("Pet")
//!     .field(FieldDef::new("Name", ValueKind::Text))
//!     .field(FieldDef::new("Legs", ValueKind::Integer))
//!     .build()
//!     .unwrap();
//!
//! let mut table = Table::new(&rt);
//! table.insert(Row::new(&rt, vec!["cat".into(), 4.into()]).unwrap()).unwrap();
//! table.insert(Row::new(&rt, vec!["spider".into(), 8.into()]).unwrap()).unwrap();
//!
//! let text = table.render().unwrap();
//! assert_eq!(text, " Name  | Legs\n-------|-----\n cat   |  4  \nspider |  8  ");
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use crate::column::{ColumnDescriptor, RecordType};
use crate::error::TableError;
use crate::options::TableStyle;
use crate::record::Record;
use crate::row::Row;
use crate::sort::{sort_rows, SortSpec};
use crate::width::{display_width, pad};
use crate::Result;

/// Append-only collection of rows of one record type, with layout state.
#[derive(Debug)]
pub struct Table {
    record_type: Arc<RecordType>,
    style: TableStyle,
    rows: Vec<Row>,
    /// Widest rendered value seen per visible column, headers included
    max_widths: HashMap<String, usize>,
}

impl Table {
    /// Create an empty table with the default (ASCII) style.
    pub fn new(record_type: &Arc<RecordType>) -> Self {
        Self::with_style(record_type, TableStyle::default())
    }

    /// Create an empty table with a custom style.
    pub fn with_style(record_type: &Arc<RecordType>, style: TableStyle) -> Self {
        let max_widths = record_type
            .visible_columns()
            .map(|c| (c.key.clone(), c.header_width()))
            .collect();
        Self {
            record_type: Arc::clone(record_type),
            style,
            rows: Vec::new(),
            max_widths,
        }
    }

    /// Create an empty table for a statically declared record type.
    pub fn for_record<R: Record>() -> Self {
        Self::new(&R::record_type())
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current width of a visible column; `None` for hidden or unknown keys
    pub fn column_width(&self, key: &str) -> Option<usize> {
        self.max_widths.get(key).copied()
    }

    fn check_type(&self, row: &Row) -> Result<()> {
        if Arc::ptr_eq(row.record_type(), &self.record_type) {
            Ok(())
        } else {
            Err(TableError::TypeMismatch {
                expected: self.record_type.name().to_string(),
                found: row.record_type().name().to_string(),
            })
        }
    }

    /// Append a row and grow column widths.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TypeMismatch`] if the row belongs to another
    /// record type, and [`TableError::InvalidFormat`] if a visible column's
    /// pattern cannot format the row's value. The table is left unchanged.
    pub fn insert(&mut self, row: Row) -> Result<()> {
        self.check_type(&row)?;

        let widths = self
            .record_type
            .visible_columns()
            .map(|c| row.display_width(&c.key).map(|w| (c.key.as_str(), w)))
            .collect::<Result<Vec<_>>>()?;
        for (key, width) in widths {
            let current = self.max_widths.entry(key.to_string()).or_insert(0);
            if width > *current {
                log::trace!("column '{}' grows from {} to {}", key, current, width);
                *current = width;
            }
        }

        self.rows.push(row);
        Ok(())
    }

    /// Convert a record into a row and append it.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TypeMismatch`] if `R` is not the table's
    /// record type.
    pub fn insert_record<R: Record>(&mut self, record: R) -> Result<()> {
        self.insert(record.into_row()?)
    }

    fn visible(&self) -> impl Iterator<Item = (&ColumnDescriptor, usize)> {
        self.record_type
            .visible_columns()
            .map(|c| (c, self.max_widths.get(&c.key).copied().unwrap_or(0)))
    }

    fn cell_joiner(&self) -> String {
        format!(" {} ", self.style.column_separator)
    }

    /// Headers of visible columns, each aligned to its column width.
    pub fn render_header_line(&self) -> String {
        self.visible()
            .map(|(c, width)| pad(&c.header, width, c.alignment))
            .collect::<Vec<_>>()
            .join(&self.cell_joiner())
    }

    /// A rule line: every cell filled with `horizontal`, cells joined by
    /// `vertical`.
    ///
    /// With `dense` the fill also replaces the padding around each
    /// junction, so the rule is unbroken; otherwise the junction keeps one
    /// space on each side, like the column separator in data lines.
    pub fn render_separator_line(&self, horizontal: &str, vertical: &str, dense: bool) -> String {
        let joiner = if dense {
            format!("{h}{v}{h}", h = horizontal, v = vertical)
        } else {
            format!(" {} ", vertical)
        };
        self.visible()
            .map(|(_, width)| fill(horizontal, width))
            .collect::<Vec<_>>()
            .join(&joiner)
    }

    /// The dense rule drawn under the header.
    pub fn render_header_separator_line(&self) -> String {
        self.render_separator_line(&self.style.header_rule, &self.style.header_junction, true)
    }

    /// The line drawn between data rows, if the style defines one.
    pub fn render_row_separator_line(&self) -> Option<String> {
        self.style
            .row_separator
            .as_deref()
            .map(|glyph| self.render_separator_line(glyph, &self.style.column_separator, false))
    }

    /// One data line: rendered values aligned to column widths, with
    /// conditional formats applied to matching cells.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TypeMismatch`] for a row of another record
    /// type, and [`TableError::UnconfiguredPredicate`] if a column's rule
    /// has no target.
    pub fn render_row_line(&self, row: &Row) -> Result<String> {
        self.check_type(row)?;
        let cells = self
            .visible()
            .map(|(c, width)| {
                let text = row.rendered_value(&c.key)?;
                let cell = pad(&text, width, c.alignment);
                match &c.conditional_format {
                    Some(rule) if rule.is_match(&text)? => Ok(rule.apply_format(&cell)),
                    _ => Ok(cell),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(cells.join(&self.cell_joiner()))
    }

    /// Rows ordered by `order_by`, each key ascending unless `ascending`
    /// says otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSortSpec`] for an empty key list or a
    /// direction list of another length, and [`TableError::UnknownColumn`]
    /// for keys not declared on the record type.
    pub fn sorted_rows(&self, order_by: &[&str], ascending: Option<&[bool]>) -> Result<Vec<&Row>> {
        let spec = SortSpec::new(order_by, ascending)?;
        sort_rows(&self.record_type, &self.rows, &spec)
    }

    /// Whole table with the default insertion order.
    ///
    /// # Errors
    ///
    /// See [`Table::render_row_line`].
    pub fn render(&self) -> Result<String> {
        self.render_table(None, None)
    }

    /// Header, header separator and data lines joined by the line
    /// terminator, without a trailing terminator.
    ///
    /// Rows keep insertion order unless `order_by` is given.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSortSpec`] if `ascending` is given
    /// without `order_by`, plus every error of [`Table::sorted_rows`] and
    /// [`Table::render_row_line`]. Nothing is rendered on error.
    pub fn render_table(
        &self,
        order_by: Option<&[&str]>,
        ascending: Option<&[bool]>,
    ) -> Result<String> {
        let rows: Vec<&Row> = match SortSpec::from_options(order_by, ascending)? {
            Some(spec) => sort_rows(&self.record_type, &self.rows, &spec)?,
            None => self.rows.iter().collect(),
        };

        let row_separator = self.render_row_separator_line();
        let mut lines = vec![
            self.render_header_line(),
            self.render_header_separator_line(),
        ];
        for (i, row) in rows.into_iter().enumerate() {
            if i > 0 {
                if let Some(separator) = &row_separator {
                    lines.push(separator.clone());
                }
            }
            lines.push(self.render_row_line(row)?);
        }
        Ok(lines.join(&self.style.line_terminator))
    }

    /// Render the table to `sink`, followed by one line terminator.
    ///
    /// # Errors
    ///
    /// Everything [`Table::render_table`] returns, plus
    /// [`TableError::Io`] if writing fails.
    pub fn write_table<W: Write>(
        &self,
        sink: &mut W,
        order_by: Option<&[&str]>,
        ascending: Option<&[bool]>,
    ) -> Result<()> {
        let text = self.render_table(order_by, ascending)?;
        sink.write_all(text.as_bytes())?;
        sink.write_all(self.style.line_terminator.as_bytes())?;
        Ok(())
    }
}

/// Repeat `glyph` to fill `width` columns; a remainder the glyph cannot
/// fill is padded with spaces.
fn fill(glyph: &str, width: usize) -> String {
    let glyph_width = display_width(glyph);
    if glyph_width == 0 {
        return " ".repeat(width);
    }
    let count = width / glyph_width;
    let mut out = glyph.repeat(count);
    out.push_str(&" ".repeat(width - count * glyph_width));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Alignment, FieldDef};
    use crate::highlight::{ColorId, Contains, Decoration, Exact};
    use crate::value::{Value, ValueKind};
    use chrono::NaiveDate;

    fn staff() -> Arc<RecordType> {
        RecordType::builder("Staff")
            .field(FieldDef::new("Name", ValueKind::Text).align(Alignment::Left))
            .field(FieldDef::new("Age", ValueKind::Integer).align(Alignment::Right))
            .field(FieldDef::new("Salary", ValueKind::Integer).hidden())
            .build()
            .unwrap()
    }

    fn row(rt: &Arc<RecordType>, name: &'static str, age: i64, salary: i64) -> Row {
        Row::new(rt, vec![name.into(), age.into(), salary.into()]).unwrap()
    }

    fn staff_table() -> Table {
        let rt = staff();
        let mut table = Table::new(&rt);
        table.insert(row(&rt, "Zoe", 27, 7000)).unwrap();
        table.insert(row(&rt, "Ann", 21, 5000)).unwrap();
        table.insert(row(&rt, "Bo", 21, 6000)).unwrap();
        table
    }

    #[test]
    fn test_widths_seeded_from_headers() {
        let rt = staff();
        let table = Table::new(&rt);
        assert_eq!(table.column_width("Name"), Some(4));
        assert_eq!(table.column_width("Age"), Some(3));
        assert_eq!(table.column_width("Salary"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_widths_grow_and_never_shrink() {
        let rt = staff();
        let mut table = Table::new(&rt);
        table.insert(row(&rt, "Maximilian", 100, 1)).unwrap();
        assert_eq!(table.column_width("Name"), Some(10));
        table.insert(row(&rt, "Al", 1, 1)).unwrap();
        assert_eq!(table.column_width("Name"), Some(10));
        assert_eq!(table.column_width("Age"), Some(3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_width_covers_every_row_and_header() {
        let table = staff_table();
        for c in table.record_type().visible_columns() {
            let width = table.column_width(&c.key).unwrap();
            assert!(width >= c.header_width());
            for r in table.rows() {
                assert!(width >= r.display_width(&c.key).unwrap());
            }
        }
    }

    #[test]
    fn test_type_mismatch_rejected_without_change() {
        let mut table = staff_table();
        let other = RecordType::builder("Staff")
            .field(FieldDef::new("Name", ValueKind::Text))
            .field(FieldDef::new("Age", ValueKind::Integer))
            .field(FieldDef::new("Salary", ValueKind::Integer))
            .build()
            .unwrap();
        let stranger = Row::new(
            &other,
            vec!["Someone very long".into(), 1.into(), 1.into()],
        )
        .unwrap();
        let err = table.insert(stranger).unwrap_err();
        assert!(matches!(err, TableError::TypeMismatch { .. }));
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_width("Name"), Some(4));
    }

    #[test]
    fn test_header_line() {
        let table = staff_table();
        assert_eq!(table.render_header_line(), "Name | Age");
    }

    #[test]
    fn test_separator_lines() {
        let table = staff_table();
        assert_eq!(table.render_separator_line("=", "+", true), "=====+====");
        assert_eq!(table.render_separator_line("=", "+", false), "==== + ===");
        assert_eq!(table.render_header_separator_line(), "-----|----");
    }

    #[test]
    fn test_row_line_alignment() {
        let table = staff_table();
        let lines: Vec<String> = table
            .rows()
            .iter()
            .map(|r| table.render_row_line(r).unwrap())
            .collect();
        assert_eq!(lines, ["Zoe  |  27", "Ann  |  21", "Bo   |  21"]);
    }

    #[test]
    fn test_hidden_column_excluded_but_sortable() {
        let table = staff_table();
        let text = table.render_table(Some(&["Salary"]), Some(&[false])).unwrap();
        assert!(!text.contains("Salary"));
        assert!(!text.contains("7000"));
        let names: Vec<&str> = text.lines().skip(2).map(|l| l.split(' ').next().unwrap()).collect();
        assert_eq!(names, ["Zoe", "Bo", "Ann"]);
    }

    #[test]
    fn test_render_table_insertion_order() {
        let table = staff_table();
        assert_eq!(
            table.render().unwrap(),
            "Name | Age\n-----|----\nZoe  |  27\nAnn  |  21\nBo   |  21"
        );
    }

    #[test]
    fn test_render_table_sorted() {
        let table = staff_table();
        let text = table
            .render_table(Some(&["Age", "Name"]), Some(&[true, true]))
            .unwrap();
        assert_eq!(text, "Name | Age\n-----|----\nAnn  |  21\nBo   |  21\nZoe  |  27");
    }

    #[test]
    fn test_render_table_rejects_bad_specs() {
        let table = staff_table();
        assert!(matches!(
            table.render_table(Some(&["Unknown"]), None),
            Err(TableError::UnknownColumn(_))
        ));
        assert!(matches!(
            table.render_table(Some(&["Salary"]), Some(&[true, false])),
            Err(TableError::InvalidSortSpec(_))
        ));
        assert!(matches!(
            table.render_table(None, Some(&[true])),
            Err(TableError::InvalidSortSpec(_))
        ));
        assert!(matches!(
            table.render_table(Some(&[]), None),
            Err(TableError::InvalidSortSpec(_))
        ));
    }

    #[test]
    fn test_wide_characters_line_up() {
        let rt = RecordType::builder("Names")
            .field(FieldDef::new("Name", ValueKind::Text))
            .field(FieldDef::new("N", ValueKind::Integer))
            .build()
            .unwrap();
        let mut table = Table::new(&rt);
        table
            .insert(Row::new(&rt, vec!["张伟明".into(), 1.into()]).unwrap())
            .unwrap();
        table
            .insert(Row::new(&rt, vec!["Bob".into(), 2.into()]).unwrap())
            .unwrap();
        assert_eq!(table.column_width("Name"), Some(6));

        let text = table.render().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "张伟明 | 1");
        assert_eq!(lines[3], " Bob   | 2");
        let widths: Vec<usize> = lines.iter().map(|l| display_width(l)).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
        // The separator sits in the same terminal column on every line.
        for line in &lines[2..] {
            let before: String = line.split('|').next().unwrap().to_string();
            assert_eq!(display_width(&before), 7);
        }
    }

    #[test]
    fn test_box_style_and_row_separator() {
        let rt = staff();
        let mut table = Table::with_style(&rt, TableStyle::box_drawing().row_separator("─"));
        table.insert(row(&rt, "Zoe", 27, 7000)).unwrap();
        table.insert(row(&rt, "Ann", 21, 5000)).unwrap();
        assert_eq!(
            table.render().unwrap(),
            "Name │ Age\n─────┼────\nZoe  │  27\n──── │ ───\nAnn  │  21"
        );
    }

    #[test]
    fn test_custom_line_terminator() {
        let rt = staff();
        let mut table = Table::with_style(&rt, TableStyle::ascii().line_terminator("\r\n"));
        table.insert(row(&rt, "Zoe", 27, 7000)).unwrap();
        assert_eq!(table.render().unwrap(), "Name | Age\r\n-----|----\r\nZoe  |  27");
    }

    #[test]
    fn test_conditional_format_applied_to_padded_cell() {
        let deco = Decoration::new().foreground(ColorId::RED);
        let rt = RecordType::builder("Hl")
            .field(
                FieldDef::new("Name", ValueKind::Text)
                    .align(Alignment::Left)
                    .highlight(Exact::new("Bo", deco)),
            )
            .build()
            .unwrap();
        let mut table = Table::new(&rt);
        table.insert(Row::new(&rt, vec!["Bo".into()]).unwrap()).unwrap();
        table.insert(Row::new(&rt, vec!["Bob".into()]).unwrap()).unwrap();

        let bo = table.render_row_line(&table.rows()[0]).unwrap();
        assert_eq!(bo, deco.apply("Bo  "));
        let bob = table.render_row_line(&table.rows()[1]).unwrap();
        assert_eq!(bob, "Bob ");
    }

    #[test]
    fn test_conditional_format_matches_rendered_text() {
        let deco = Decoration::new().background(ColorId::YELLOW);
        let rt = RecordType::builder("Dates")
            .field(
                FieldDef::new("Day", ValueKind::Date)
                    .format("%b %d")
                    .highlight(Contains::new("Mar", deco)),
            )
            .build()
            .unwrap();
        let mut table = Table::new(&rt);
        let march = Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        table.insert(Row::new(&rt, vec![march]).unwrap()).unwrap();
        let line = table.render_row_line(&table.rows()[0]).unwrap();
        assert_eq!(line, deco.apply("Mar 01"));
    }

    #[test]
    fn test_unconfigured_rule_fails_render() {
        let rt = RecordType::builder("Bad")
            .field(FieldDef::new("Name", ValueKind::Text).highlight(Contains::unconfigured(Decoration::new())))
            .build()
            .unwrap();
        let mut table = Table::new(&rt);
        table.insert(Row::new(&rt, vec!["x".into()]).unwrap()).unwrap();
        assert!(matches!(
            table.render(),
            Err(TableError::UnconfiguredPredicate(_))
        ));
    }

    #[test]
    fn test_write_table_appends_terminator() {
        let table = staff_table();
        let mut out = Vec::new();
        table.write_table(&mut out, Some(&["Name"]), None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Zoe  |  27\n"));
        assert!(text.starts_with("Name | Age\n"));
    }

    #[test]
    fn test_fill_with_wide_glyph() {
        assert_eq!(fill("-", 3), "---");
        assert_eq!(fill("＝", 5), "＝＝ ");
        assert_eq!(fill("", 2), "  ");
    }
}

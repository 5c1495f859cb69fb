//! Layout options for rendered tables.
//!
//! This module contains the configuration types that control which glyphs
//! a table is drawn with and how lines are terminated.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Glyphs and line terminator used when rendering a table.
///
/// Each glyph is a short string, usually a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    /// Joins rendered lines
    pub line_terminator: String,
    /// Vertical glyph between cells of header and data lines
    pub column_separator: String,
    /// Horizontal fill of lines drawn between data rows (none by default)
    pub row_separator: Option<String>,
    /// Horizontal fill of the line under the header
    pub header_rule: String,
    /// Glyph where the header rule crosses a column boundary
    pub header_junction: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self::ascii()
    }
}

impl TableStyle {
    /// Plain ASCII: `|` between cells, `-` under the header
    pub fn ascii() -> Self {
        Self {
            line_terminator: "\n".to_string(),
            column_separator: "|".to_string(),
            row_separator: None,
            header_rule: "-".to_string(),
            header_junction: "|".to_string(),
        }
    }

    /// Unicode box drawing: `│` between cells, `─` crossed by `┼`
    pub fn box_drawing() -> Self {
        Self {
            line_terminator: "\n".to_string(),
            column_separator: "│".to_string(),
            row_separator: None,
            header_rule: "─".to_string(),
            header_junction: "┼".to_string(),
        }
    }

    /// Builder: set line terminator
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Builder: set column separator
    pub fn column_separator(mut self, glyph: impl Into<String>) -> Self {
        self.column_separator = glyph.into();
        self
    }

    /// Builder: draw a separator line between data rows
    pub fn row_separator(mut self, glyph: impl Into<String>) -> Self {
        self.row_separator = Some(glyph.into());
        self
    }

    /// Builder: set header rule fill
    pub fn header_rule(mut self, glyph: impl Into<String>) -> Self {
        self.header_rule = glyph.into();
        self
    }

    /// Builder: set header junction glyph
    pub fn header_junction(mut self, glyph: impl Into<String>) -> Self {
        self.header_junction = glyph.into();
        self
    }
}

/// Named glyph sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderPreset {
    #[default]
    Ascii,
    Box,
}

impl BorderPreset {
    pub fn style(self) -> TableStyle {
        match self {
            BorderPreset::Ascii => TableStyle::ascii(),
            BorderPreset::Box => TableStyle::box_drawing(),
        }
    }
}

impl From<BorderPreset> for TableStyle {
    fn from(preset: BorderPreset) -> Self {
        preset.style()
    }
}

impl FromStr for BorderPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" | "plain" => Ok(BorderPreset::Ascii),
            "box" | "unicode" => Ok(BorderPreset::Box),
            _ => Err(format!("Unknown border style: {}", s)),
        }
    }
}

//! Conditional cell highlighting.
//!
//! A [`ConditionalFormat`] pairs a predicate over a cell's rendered text
//! with a decoration applied to the padded cell. Two rules ship with the
//! crate, [`Contains`] and [`Exact`]; embedders can implement the trait for
//! their own predicates.
//!
//! Colours are opaque xterm-256 indices ([`ColorId`]); this module only
//! turns them into SGR escape sequences.

use std::fmt;

use console::Style;
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::Result;

/// An xterm-256 colour index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorId(pub u8);

impl ColorId {
    pub const BLACK: ColorId = ColorId(0);
    pub const RED: ColorId = ColorId(1);
    pub const GREEN: ColorId = ColorId(2);
    pub const YELLOW: ColorId = ColorId(3);
    pub const BLUE: ColorId = ColorId(4);
    pub const MAGENTA: ColorId = ColorId(5);
    pub const CYAN: ColorId = ColorId(6);
    pub const WHITE: ColorId = ColorId(7);
}

impl From<u8> for ColorId {
    fn from(v: u8) -> Self {
        ColorId(v)
    }
}

/// Foreground/background colours wrapped around highlighted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub foreground: Option<ColorId>,
    pub background: Option<ColorId>,
}

impl Decoration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set foreground colour
    pub fn foreground(mut self, color: impl Into<ColorId>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    /// Builder: set background colour
    pub fn background(mut self, color: impl Into<ColorId>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Wrap `text` in the colour escape sequences.
    ///
    /// Styling is forced on so the result does not depend on whether
    /// stdout happens to be a terminal.
    pub fn apply(&self, text: &str) -> String {
        let mut style = Style::new().force_styling(true);
        if let Some(ColorId(fg)) = self.foreground {
            style = style.color256(fg);
        }
        if let Some(ColorId(bg)) = self.background {
            style = style.on_color256(bg);
        }
        style.apply_to(text).to_string()
    }
}

/// A predicate over rendered cell text paired with a decoration.
pub trait ConditionalFormat: fmt::Debug + Send + Sync {
    /// Whether the rule applies to a cell whose rendered (unpadded) text
    /// is `text`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnconfiguredPredicate`] when the rule has
    /// nothing to match against.
    fn is_match(&self, text: &str) -> Result<bool>;

    /// Decorate the padded cell text.
    fn apply_format(&self, text: &str) -> String;
}

/// Matches cells whose text contains the target substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contains {
    target: Option<String>,
    decoration: Decoration,
}

impl Contains {
    pub fn new(target: impl Into<String>, decoration: Decoration) -> Self {
        Self {
            target: Some(target.into()),
            decoration,
        }
    }

    /// A rule with a decoration but no target yet
    pub fn unconfigured(decoration: Decoration) -> Self {
        Self {
            target: None,
            decoration,
        }
    }

    /// Builder: set match target
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl ConditionalFormat for Contains {
    fn is_match(&self, text: &str) -> Result<bool> {
        let target = self
            .target
            .as_deref()
            .ok_or(TableError::UnconfiguredPredicate("contains"))?;
        Ok(text.contains(target))
    }

    fn apply_format(&self, text: &str) -> String {
        self.decoration.apply(text)
    }
}

/// Matches cells whose text equals the target exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exact {
    target: Option<String>,
    decoration: Decoration,
}

impl Exact {
    pub fn new(target: impl Into<String>, decoration: Decoration) -> Self {
        Self {
            target: Some(target.into()),
            decoration,
        }
    }

    /// A rule with a decoration but no target yet
    pub fn unconfigured(decoration: Decoration) -> Self {
        Self {
            target: None,
            decoration,
        }
    }

    /// Builder: set match target
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl ConditionalFormat for Exact {
    fn is_match(&self, text: &str) -> Result<bool> {
        let target = self
            .target
            .as_deref()
            .ok_or(TableError::UnconfiguredPredicate("exact"))?;
        Ok(text == target)
    }

    fn apply_format(&self, text: &str) -> String {
        self.decoration.apply(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_matches_substring() {
        let rule = Contains::new("err", Decoration::new());
        assert!(rule.is_match("stderr output").unwrap());
        assert!(!rule.is_match("ok").unwrap());
    }

    #[test]
    fn test_exact_requires_whole_text() {
        let rule = Exact::new("Ann", Decoration::new());
        assert!(rule.is_match("Ann").unwrap());
        assert!(!rule.is_match("Anne").unwrap());
        assert!(!rule.is_match(" Ann").unwrap());
    }

    #[test]
    fn test_unconfigured_rules_fail() {
        let contains = Contains::unconfigured(Decoration::new());
        assert!(matches!(
            contains.is_match("x"),
            Err(TableError::UnconfiguredPredicate("contains"))
        ));
        let exact = Exact::unconfigured(Decoration::new());
        assert!(matches!(
            exact.is_match("x"),
            Err(TableError::UnconfiguredPredicate("exact"))
        ));
        assert!(exact.target("x").is_match("x").unwrap());
    }

    #[test]
    fn test_decoration_wraps_text() {
        let deco = Decoration::new().foreground(196_u8).background(ColorId::BLACK);
        let out = deco.apply(" Zoe ");
        assert!(out.contains(" Zoe "));
        assert!(out.starts_with('\u{1b}'));
        assert!(out.contains("38;5;196"));
        assert!(out.ends_with("\u{1b}[0m"));
    }

    #[test]
    fn test_empty_decoration_leaves_text_plain() {
        assert_eq!(Decoration::new().apply("abc"), "abc");
    }

    #[test]
    fn test_apply_format_uses_decoration() {
        let deco = Decoration::new().foreground(ColorId::RED);
        let rule = Contains::new("a", deco);
        assert_eq!(rule.apply_format("cat"), deco.apply("cat"));
    }
}

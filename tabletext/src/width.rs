//! Terminal display width of text.
//!
//! Wide and fullwidth characters (CJK ideographs, fullwidth forms, wide
//! emoji) occupy two terminal columns; everything else counts as one.
//! All layout math in this crate goes through [`display_width`], never
//! through `str::len` or `chars().count()`.

use unicode_width::UnicodeWidthChar;

use crate::column::Alignment;

/// Columns occupied by a single character: 2 for East Asian Wide or
/// Fullwidth, 1 otherwise.
pub fn char_width(c: char) -> usize {
    match c.width() {
        Some(2) => 2,
        _ => 1,
    }
}

/// Number of terminal columns `text` occupies.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Number of characters in `text` (not bytes, not columns).
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Pad `text` so it fills `width` terminal columns.
///
/// Fill is counted in characters: the target is
/// `width - display_width(text) + char_count(text)`, so that wide
/// characters, which take two columns but count as one character, still
/// line up. Text already wider than `width` is returned as is.
pub fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let used = display_width(text);
    if used >= width {
        return text.to_string();
    }
    let fill = width - used;
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(fill)),
        Alignment::Right => format!("{}{}", " ".repeat(fill), text),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

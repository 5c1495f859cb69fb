//! Per-column options collected from the command line

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::ArgMatches;
use tabletext::{Alignment, ColorId, ConditionalFormat, Contains, Decoration, Exact, FieldDef};

/// Options keyed by column, applied to the inferred field definitions
#[derive(Debug, Default)]
pub struct ColumnOptions {
    aliases: HashMap<String, String>,
    alignments: HashMap<String, Alignment>,
    formats: HashMap<String, String>,
    hidden: HashSet<String>,
    highlights: HashMap<String, Arc<dyn ConditionalFormat>>,
}

impl ColumnOptions {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let mut options = Self::default();

        for spec in values(matches, "alias") {
            let (key, header) = split_assignment(spec)?;
            options.aliases.insert(key.to_string(), header.to_string());
        }
        for spec in values(matches, "align") {
            let (key, align) = split_assignment(spec)?;
            let alignment = Alignment::from_str(align).map_err(|e| anyhow!(e))?;
            options.alignments.insert(key.to_string(), alignment);
        }
        for spec in values(matches, "format") {
            let (key, pattern) = split_assignment(spec)?;
            options.formats.insert(key.to_string(), pattern.to_string());
        }
        for key in values(matches, "hide") {
            options.hidden.insert(key.to_string());
        }
        for spec in values(matches, "highlight") {
            let (key, rule) = split_assignment(spec)?;
            let rule = parse_highlight(rule).with_context(|| format!("Invalid highlight: {spec}"))?;
            options.highlights.insert(key.to_string(), rule);
        }

        Ok(options)
    }

    /// Datetime pattern configured for `key`
    pub fn format(&self, key: &str) -> Option<&str> {
        self.formats.get(key).map(String::as_str)
    }

    /// Every column key mentioned by an option
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .keys()
            .chain(self.alignments.keys())
            .chain(self.formats.keys())
            .chain(self.hidden.iter())
            .chain(self.highlights.keys())
            .map(String::as_str)
    }

    /// Attach the options for the field's key
    pub fn apply(&self, mut field: FieldDef) -> FieldDef {
        if let Some(alias) = self.aliases.get(&field.key) {
            field = field.alias(alias.clone());
        }
        if let Some(alignment) = self.alignments.get(&field.key) {
            field = field.align(*alignment);
        }
        if let Some(pattern) = self.formats.get(&field.key) {
            field = field.format(pattern.clone());
        }
        if self.hidden.contains(&field.key) {
            field = field.hidden();
        }
        if let Some(rule) = self.highlights.get(&field.key) {
            field = field.highlight_shared(Arc::clone(rule));
        }
        field
    }
}

fn values<'a>(matches: &'a ArgMatches, id: &str) -> impl Iterator<Item = &'a str> {
    matches
        .get_many::<String>(id)
        .into_iter()
        .flatten()
        .map(String::as_str)
}

/// Split `KEY=VALUE` at the first `=`
pub fn split_assignment(spec: &str) -> anyhow::Result<(&str, &str)> {
    match spec.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Expected KEY=VALUE, got '{spec}'"),
    }
}

/// Parse `contains|exact[:TARGET:FG[:BG]]`.
///
/// A bare mode yields a rule without a target, which fails at render time.
pub fn parse_highlight(spec: &str) -> anyhow::Result<Arc<dyn ConditionalFormat>> {
    let parts: Vec<&str> = spec.split(':').collect();
    let (mode, target, decoration) = match parts.as_slice() {
        [mode] => (*mode, None, Decoration::new().foreground(ColorId::RED)),
        [mode, target, fg] => (*mode, Some(*target), Decoration::new().foreground(parse_color(fg)?)),
        [mode, target, fg, bg] => (
            *mode,
            Some(*target),
            Decoration::new()
                .foreground(parse_color(fg)?)
                .background(parse_color(bg)?),
        ),
        _ => bail!("Expected MODE:TARGET:FG[:BG]"),
    };

    let rule: Arc<dyn ConditionalFormat> = match (mode.to_lowercase().as_str(), target) {
        ("contains", Some(target)) => Arc::new(Contains::new(target, decoration)),
        ("contains", None) => Arc::new(Contains::unconfigured(decoration)),
        ("exact", Some(target)) => Arc::new(Exact::new(target, decoration)),
        ("exact", None) => Arc::new(Exact::unconfigured(decoration)),
        _ => bail!("Unknown highlight mode: {mode}"),
    };
    Ok(rule)
}

/// A colour name from the basic eight, or a 256-colour palette index
pub fn parse_color(s: &str) -> anyhow::Result<ColorId> {
    let color = match s.to_lowercase().as_str() {
        "black" => ColorId::BLACK,
        "red" => ColorId::RED,
        "green" => ColorId::GREEN,
        "yellow" => ColorId::YELLOW,
        "blue" => ColorId::BLUE,
        "magenta" => ColorId::MAGENTA,
        "cyan" => ColorId::CYAN,
        "white" => ColorId::WHITE,
        other => other
            .parse::<u8>()
            .map(ColorId)
            .map_err(|_| anyhow!("Unknown color: {s}"))?,
    };
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletext::ValueKind;

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("Name=Full name").unwrap(), ("Name", "Full name"));
        assert_eq!(split_assignment("expr=a=b").unwrap(), ("expr", "a=b"));
        assert!(split_assignment("Name").is_err());
        assert!(split_assignment("=x").is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red").unwrap(), ColorId::RED);
        assert_eq!(parse_color("Cyan").unwrap(), ColorId::CYAN);
        assert_eq!(parse_color("196").unwrap(), ColorId(196));
        assert!(parse_color("mauve").is_err());
        assert!(parse_color("300").is_err());
    }

    #[test]
    fn test_parse_highlight() {
        let rule = parse_highlight("contains:own:red").unwrap();
        assert!(rule.is_match("down").unwrap());
        assert!(!rule.is_match("up").unwrap());

        let rule = parse_highlight("exact:ok:green:black").unwrap();
        assert!(rule.is_match("ok").unwrap());
        assert!(!rule.is_match("okay").unwrap());

        assert!(parse_highlight("regex:x:red").is_err());
        assert!(parse_highlight("contains:x").is_err());
    }

    #[test]
    fn test_bare_mode_is_unconfigured() {
        let rule = parse_highlight("exact").unwrap();
        assert!(rule.is_match("anything").is_err());
    }

    #[test]
    fn test_apply_options() {
        let mut options = ColumnOptions::default();
        options.aliases.insert("age".into(), "Age".into());
        options.alignments.insert("age".into(), Alignment::Right);
        options.hidden.insert("id".into());

        let age = options.apply(FieldDef::new("age", ValueKind::Integer));
        assert_eq!(age.alias.as_deref(), Some("Age"));
        assert_eq!(age.alignment, Alignment::Right);
        assert!(!age.hidden);

        let id = options.apply(FieldDef::new("id", ValueKind::Integer));
        assert!(id.hidden);
        assert_eq!(id.alias, None);
    }
}

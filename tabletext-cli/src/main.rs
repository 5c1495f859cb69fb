//! # tabletext
//!
//! Render a JSON array of objects as an aligned text table.
//!
//! ## Overview
//!
//! The CLI is a thin layer over the tabletext library. Every key found in
//! the input becomes a column, in order of first appearance, and each
//! column's kind is inferred from its values. Column options, sorting and
//! glyphs are taken from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Render a file
//! tabletext staff.json
//!
//! # Read from stdin, sort by age then name, oldest first
//! cat staff.json | tabletext --order-by age,name --ascending false,true
//!
//! # Rename, align and hide columns
//! tabletext staff.json --alias name=Name --align name=left --hide salary
//!
//! # Format timestamps and colour failing services
//! tabletext incidents.json --format opened=%H:%M --highlight status=exact:down:red
//!
//! # Box drawing glyphs with a line between rows
//! tabletext staff.json --style box --row-separator ─
//! ```

mod input;
mod options;

use std::io;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::anyhow;
use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tabletext::BorderPreset;

use crate::options::ColumnOptions;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tabletext")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render JSON records as aligned, wide-character-aware text tables")
        .arg(
            Arg::new("file")
                .help("JSON file holding an array of objects (stdin when omitted or '-')"),
        )
        .arg(
            Arg::new("order-by")
                .short('o')
                .long("order-by")
                .value_delimiter(',')
                .help("Sort by these keys, first key most significant (comma-separated)"),
        )
        .arg(
            Arg::new("ascending")
                .short('a')
                .long("ascending")
                .value_delimiter(',')
                .value_parser(BoolishValueParser::new())
                .requires("order-by")
                .help("Direction per sort key (comma-separated: true,false)"),
        )
        .arg(
            Arg::new("hide")
                .long("hide")
                .action(ArgAction::Append)
                .help("Hide a column; it can still be sorted on (can be specified multiple times)"),
        )
        .arg(
            Arg::new("alias")
                .long("alias")
                .action(ArgAction::Append)
                .value_name("KEY=HEADER")
                .help("Header text for a column"),
        )
        .arg(
            Arg::new("align")
                .long("align")
                .action(ArgAction::Append)
                .value_name("KEY=left|center|right")
                .help("Alignment of a column (default center)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .action(ArgAction::Append)
                .value_name("KEY=PATTERN")
                .help("strftime pattern for a column of dates, times or datetimes"),
        )
        .arg(
            Arg::new("highlight")
                .long("highlight")
                .action(ArgAction::Append)
                .value_name("KEY=MODE:TARGET:FG[:BG]")
                .help("Colour cells that contain or exactly match TARGET (MODE is contains or exact)"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_parser(["ascii", "box"])
                .default_value("ascii")
                .help("Glyph set"),
        )
        .arg(
            Arg::new("row-separator")
                .long("row-separator")
                .value_name("GLYPH")
                .help("Draw a line of GLYPH between data rows"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging disabled: {e}");
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let options = ColumnOptions::from_matches(matches)?;

    let preset = matches
        .get_one::<String>("style")
        .map(|s| BorderPreset::from_str(s))
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();
    let mut style = preset.style();
    if let Some(glyph) = matches.get_one::<String>("row-separator") {
        style = style.row_separator(glyph.clone());
    }

    let text = input::read_input(matches.get_one::<String>("file").map(String::as_str))?;
    let records = input::parse_records(&text)?;
    if records.is_empty() {
        log::warn!("No records to render");
        return Ok(());
    }
    log::debug!("read {} records", records.len());

    let table = input::build_table(&records, &options, style)?;

    let order_by: Option<Vec<&str>> = matches
        .get_many::<String>("order-by")
        .map(|keys| keys.map(String::as_str).collect());
    let ascending: Option<Vec<bool>> = matches
        .get_many::<bool>("ascending")
        .map(|flags| flags.copied().collect());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    table.write_table(&mut out, order_by.as_deref(), ascending.as_deref())?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

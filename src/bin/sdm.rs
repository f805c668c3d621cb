// src/bin/sdm.rs

//! Driver program _sdm_ drives the [_sdmlib_].
//!
//! Matches each passed input string against the built-in format
//! definitions, or against one explicit `--format`, and prints the
//! extracted components or the converted value.
//!
//! [_sdmlib_]: sdmlib

#![allow(non_camel_case_types)]

use std::io::Write;
use std::process::ExitCode;

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use ::sdmlib::common::{Components, ValueType};
use ::sdmlib::data::components::AMBIGUOUS_YEAR_THRESHOLD_DEFAULT;
use ::sdmlib::e_err;
use ::sdmlib::parser::matcher::{parse, raw_parse, ParseOptions};
use ::sdmlib::registry::definitions::Definitions;

/// CLI enum that maps to [`ValueType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CLI_Value_Type {
    date,
    time,
    datetime,
}

impl From<CLI_Value_Type> for ValueType {
    fn from(value: CLI_Value_Type) -> ValueType {
        match value {
            CLI_Value_Type::date => ValueType::Date,
            CLI_Value_Type::time => ValueType::Time,
            CLI_Value_Type::datetime => ValueType::DateTime,
        }
    }
}

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.ColorChoice.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = "\
Format tokens:
    yyyy yy     year
    mmm mm m    month name, month
    ddd         weekday name (ignored)
    dd d        day
    hh h        hour
    nn n        minute
    ss s        second
    u           fractional second
    ampm        meridian
    zo          offset, e.g. +09:30
    _           optional blank

Without --format, each INPUT is tried against every built-in format of the
--type, in precedence order. The first match wins.

With --euro, ambiguous dates like \"01/02/2000\" are read day-first.";

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "sdm",
    version = concatcp!(
        "(Super Speedy Datetime Matcher)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Repository: ", env!("CARGO_PKG_REPOSITORY"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Strings to match.
    #[clap(required = true)]
    inputs: Vec<String>,

    /// The kind of value each input is.
    #[clap(
        short = 't',
        long = "type",
        value_enum,
        default_value_t = CLI_Value_Type::datetime,
    )]
    value_type: CLI_Value_Type,

    /// Match only this format, e.g. "dd/mm/yyyy hh:nn".
    #[clap(short = 'f', long)]
    format: Option<String>,

    /// Read ambiguous numeric dates day-first.
    #[clap(long)]
    euro: bool,

    /// Print the eight extracted components instead of a converted value.
    #[clap(long)]
    raw: bool,

    /// Two-digit years below this are placed in the current century.
    #[clap(
        short = 'y',
        long,
        default_value_t = AMBIGUOUS_YEAR_THRESHOLD_DEFAULT,
    )]
    year_threshold: u8,

    /// Choose to print to terminal using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,
}

fn components_to_string(components: &Components) -> String {
    let values: Vec<String> = components
        .iter()
        .map(|slot| match slot {
            Some(value) => value.to_string(),
            None => String::from("nil"),
        })
        .collect();

    format!("[{}]", values.join(","))
}

/// Print `input` and its `result`; a `None` result is printed in red.
fn print_result(
    stdout: &mut StandardStream,
    input: &str,
    result: Option<String>,
) -> std::io::Result<()> {
    write!(stdout, "{:?}\t", input)?;
    match result {
        Some(result) => {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(stdout, "{}", result)?;
        }
        None => {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(stdout, "no match")?;
        }
    }
    stdout.reset()?;
    writeln!(stdout)
}

pub fn main() -> ExitCode {
    defn!();
    let args = CLI_Args::parse();
    defo!("{:?}", args);

    let definitions = Definitions::new().with_ambiguous_year_threshold(args.year_threshold);
    if args.euro {
        definitions.use_euro_formats();
    }
    let value_type: ValueType = args.value_type.into();
    let options = ParseOptions {
        format: args.format.clone(),
    };
    let color_choice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut unmatched: usize = 0;
    for input in args.inputs.iter() {
        let result: Option<String> = if args.raw {
            raw_parse(&definitions, input, value_type, &options).map(|c| components_to_string(&c))
        } else {
            parse(&definitions, input, value_type, &options).map(|value| value.to_string())
        };
        if result.is_none() {
            unmatched += 1;
        }
        if let Err(err) = print_result(&mut stdout, input, result) {
            e_err!("failed to write to stdout: {}", err);
            defx!("return FAILURE");
            return ExitCode::FAILURE;
        }
    }
    defx!("unmatched {}", unmatched);

    if unmatched == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

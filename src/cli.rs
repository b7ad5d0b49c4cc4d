use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{collection::LoadOrder, loader::LoadOptions};

#[derive(Debug, Parser)]
#[command(author, version, about = "Query national CO2 emission statistics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count the rows that satisfy every filter
    Count(CountArgs),
    /// Emit the rows that satisfy every filter
    Filter(FilterArgs),
    /// Answer the fixed set of derived-metric questions
    Answer(AnswerArgs),
}

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Predicates such as `year = 1990` or `country = 'United States'`
    #[arg(long = "filter", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Predicates such as `year = 1990` or `energy_co2_emissions > 100`
    #[arg(long = "filter", required = true, action = clap::ArgAction::Append)]
    pub filters: Vec<String>,
    /// Limit number of rows emitted
    #[arg(long)]
    pub limit: Option<usize>,
    /// Render output as an aligned table to stdout
    #[arg(long = "table", conflicts_with = "output")]
    pub table: bool,
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct AnswerArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Answer a single question (1-7) instead of all of them
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub query: Option<u8>,
    /// Print answers as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Options shared by every command that loads the dataset.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Keep rows reversed from file order (default) or in file order
    #[arg(long, value_enum, default_value = "reversed")]
    pub order: LoadOrder,
}

impl SourceArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            input_encoding: self.input_encoding.clone(),
            order: self.order,
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

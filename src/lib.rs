pub mod cli;
pub mod collection;
pub mod error;
pub mod filter;
pub mod io_utils;
pub mod loader;
pub mod queries;
pub mod record;
pub mod report;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands},
    collection::RecordList,
};

pub use crate::{
    collection::LoadOrder,
    error::{QueryError, QueryResult},
    filter::{Comparator, Predicate, PredicateValue, count, filter, filter_all},
    record::{Field, Record},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("co2_stats", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Count(args) => handle_count(&args),
        Commands::Filter(args) => handle_filter(&args),
        Commands::Answer(args) => report::execute(&args),
    }
}

fn load_filtered(input: &Path, source: &cli::SourceArgs, filters: &[String]) -> Result<RecordList> {
    let predicates = filter::parse_predicates(filters).context("Parsing --filter expressions")?;
    debug!(
        "Predicates: {:?}",
        predicates.iter().map(|p| p.to_string()).collect::<Vec<_>>()
    );
    let rows = loader::load_records(input, &source.load_options())?;
    let kept = filter_all(&rows, &predicates);
    info!(
        "Kept {} of {} record(s) from {:?}",
        kept.len(),
        rows.len(),
        input
    );
    Ok(kept)
}

fn handle_count(args: &cli::CountArgs) -> Result<()> {
    let kept = load_filtered(&args.input, &args.source, &args.filters)?;
    println!("{}", count(&kept));
    Ok(())
}

fn handle_filter(args: &cli::FilterArgs) -> Result<()> {
    let kept = load_filtered(&args.input, &args.source, &args.filters)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    if args.table {
        let rows = kept.iter().take(limit).map(table::record_cells).collect::<Vec<_>>();
        table::print_table(&table::record_headers(), &rows);
        return Ok(());
    }

    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.source.delimiter);
    let mut writer = io_utils::open_csv_writer(args.output.as_deref(), delimiter)?;
    writer
        .write_record(Field::ALL.map(Field::header))
        .context("Writing header row")?;
    for record in kept.iter().take(limit) {
        writer
            .serialize(record)
            .with_context(|| format!("Writing record for '{}' {}", record.name, record.year))?;
    }
    writer.flush().context("Flushing output")?;
    if let Some(path) = &args.output {
        info!("Wrote {} record(s) to {:?}", kept.len().min(limit), path);
    }
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}

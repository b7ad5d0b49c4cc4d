//! Reads the emissions CSV into a [`RecordList`].

use std::{io::Read, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::Encoding;
use log::debug;

use crate::{
    collection::{LoadOrder, RecordList},
    io_utils,
    record::{Field, Record},
};

/// Settings that control how a source file becomes a record list.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub input_encoding: Option<String>,
    pub order: LoadOrder,
}

pub fn load_records(path: &Path, options: &LoadOptions) -> Result<RecordList> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let encoding = io_utils::resolve_encoding(options.input_encoding.as_deref())?;
    debug!(
        "Reading {:?} with delimiter '{}' and encoding {}",
        path,
        crate::printable_delimiter(delimiter),
        encoding.name()
    );
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let records = read_records(&mut reader, encoding, options.order)
        .with_context(|| format!("Loading records from {path:?}"))?;
    debug!(
        "Loaded {} record(s) from {:?} in {:?} order",
        records.len(),
        path,
        options.order
    );
    Ok(records)
}

pub fn read_records<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
    order: LoadOrder,
) -> Result<RecordList>
where
    R: Read,
{
    let headers = io_utils::reader_headers(reader, encoding)?;
    let columns = ColumnMap::resolve(&headers)?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let line = row_idx + 2;
        let record = record.with_context(|| format!("Reading row {line}"))?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        if columns.looks_like_header(&decoded) {
            debug!("Skipping repeated header on line {line}");
            continue;
        }
        let parsed = columns
            .parse_row(&decoded)
            .with_context(|| format!("Parsing row {line}"))?;
        rows.push(parsed);
    }
    Ok(RecordList::from_source_rows(rows, order))
}

/// Position of each field's column within a source row, indexed like
/// [`Field::ALL`].
struct ColumnMap {
    indices: [usize; 8],
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self> {
        let mut indices = [0usize; 8];
        for (slot, field) in indices.iter_mut().zip(Field::ALL) {
            *slot = headers
                .iter()
                .position(|h| h.trim().parse::<Field>().ok() == Some(field))
                .ok_or_else(|| anyhow!("Missing required column '{}'", field.header()))?;
        }
        Ok(ColumnMap { indices })
    }

    fn cell<'a>(&self, row: &'a [String], field: Field) -> &'a str {
        row.get(self.indices[field as usize])
            .map(|s| s.trim())
            .unwrap_or("")
    }

    fn looks_like_header(&self, row: &[String]) -> bool {
        self.cell(row, Field::Name).eq_ignore_ascii_case(Field::Name.header())
    }

    fn parse_row(&self, row: &[String]) -> Result<Record> {
        let name = self.cell(row, Field::Name);
        if name.is_empty() {
            bail!("Column '{}' is empty", Field::Name.header());
        }
        let raw_year = self.cell(row, Field::Year);
        let year: i64 = raw_year
            .parse()
            .with_context(|| format!("Failed to parse '{raw_year}' as integer year"))?;

        let mut record = Record::new(name, year);
        for field in Field::EMISSIONS {
            let value = parse_optional_float(self.cell(row, field))
                .with_context(|| format!("Column '{field}'"))?;
            record = record.with_emission(field, value);
        }
        Ok(record)
    }
}

fn parse_optional_float(value: &str) -> Result<Option<f64>> {
    if value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let parsed: f64 = value
        .parse()
        .with_context(|| format!("Failed to parse '{value}' as float"))?;
    if !parsed.is_finite() {
        bail!("Value '{value}' is not a finite number");
    }
    Ok(Some(parsed))
}

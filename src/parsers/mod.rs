//! Parser trait and implementations for the marketplace CSV files

mod listings;
mod market;
mod metadata;

pub use listings::ListingsParser;
pub use market::MarketPriceParser;
pub use metadata::MetadataParser;

use crate::types::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Records parsed from one file plus the number of rows that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: T,
    pub skipped: usize,
}

/// Trait for parsing one of the marketplace CSV datasets
pub trait CsvParser: Send + Sync {
    /// Collection produced by this parser
    type Output: Send;

    /// Dataset name used in logs and warnings (e.g., "listings")
    fn name(&self) -> &str;

    /// Parse CSV content (header row first) from any reader
    fn parse_reader<R: Read>(&self, reader: R) -> Result<Parsed<Self::Output>>;

    /// Parse a CSV file from disk
    fn parse_file(&self, path: &Path) -> Result<Parsed<Self::Output>> {
        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// Parse CSV content held in memory
    fn parse_str(&self, content: &str) -> Result<Parsed<Self::Output>> {
        self.parse_reader(content.as_bytes())
    }
}

/// Reader settings shared by all parsers: header row, ragged rows allowed, cells trimmed
fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Index of the last header matching `pred` (compared lowercased)
fn find_column(headers: &StringRecord, pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| pred(h.to_lowercase().as_str()))
        .map(|(idx, _)| idx)
        .last()
}

/// Line number of a record for log messages (0 when unknown)
fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Unwrap a row result: I/O failures abort the file, malformed rows are skipped
fn next_row(
    dataset: &str,
    result: std::result::Result<StringRecord, csv::Error>,
    skipped: &mut usize,
) -> Result<Option<StringRecord>> {
    match result {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_io_error() => Err(e.into()),
        Err(e) => {
            tracing::warn!(dataset, error = %e, "skipping unreadable row");
            *skipped += 1;
            Ok(None)
        }
    }
}

//! Book metadata CSV parser
//!
//! Columns are located by header name: `isbn`, `title`/`name`, `author`/`authors`.

use std::io::Read;

use super::{csv_reader, find_column, line_of, next_row, CsvParser, Parsed};
use crate::services::normalizer::normalize_isbn;
use crate::types::{BookMetadata, MetadataIndex, Result};

/// Parser for `book_metadata.csv`
#[derive(Debug, Default)]
pub struct MetadataParser;

impl MetadataParser {
    pub fn new() -> Self {
        Self
    }
}

impl CsvParser for MetadataParser {
    type Output = MetadataIndex;

    fn name(&self) -> &str {
        "metadata"
    }

    fn parse_reader<R: Read>(&self, reader: R) -> Result<Parsed<MetadataIndex>> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();

        let isbn_idx = find_column(&headers, |h| h == "isbn");
        let title_idx = find_column(&headers, |h| h == "title" || h == "name");
        let author_idx = find_column(&headers, |h| h == "author" || h == "authors");

        if isbn_idx.is_none() && !headers.is_empty() {
            tracing::warn!(
                headers = ?headers.iter().collect::<Vec<_>>(),
                "metadata has no isbn column"
            );
        }

        let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
            idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
        };

        let mut metadata = MetadataIndex::new();
        let mut skipped = 0;

        for result in reader.records() {
            let Some(record) = next_row(self.name(), result, &mut skipped)? else {
                continue;
            };

            let raw_isbn = cell(&record, isbn_idx);
            if raw_isbn.is_empty() {
                tracing::debug!(line = line_of(&record), "skipping metadata row without isbn");
                skipped += 1;
                continue;
            }

            metadata.insert(
                normalize_isbn(&raw_isbn),
                BookMetadata {
                    title: cell(&record, title_idx),
                    author: cell(&record, author_idx),
                },
            );
        }

        tracing::debug!(count = metadata.len(), skipped, "parsed metadata");
        Ok(Parsed {
            records: metadata,
            skipped,
        })
    }
}

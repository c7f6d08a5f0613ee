//! Market price CSV parser
//!
//! Locates the ISBN column (header contains `isbn`) and the price column
//! (header contains `price` or `market`), then averages every observation
//! per normalized ISBN.

use std::collections::HashMap;
use std::io::Read;
use std::sync::LazyLock;

use regex::Regex;

use super::{csv_reader, find_column, line_of, next_row, CsvParser, Parsed};
use crate::services::normalizer::normalize_isbn;
use crate::types::{MarketPrices, Result};

/// Anything that cannot be part of a plain decimal number ("$", ",", "USD", ...)
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("valid regex"));

/// Strip currency symbols and thousands separators, then parse
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parser for `market_prices.csv`
#[derive(Debug, Default)]
pub struct MarketPriceParser;

impl MarketPriceParser {
    pub fn new() -> Self {
        Self
    }
}

impl CsvParser for MarketPriceParser {
    type Output = MarketPrices;

    fn name(&self) -> &str {
        "market"
    }

    fn parse_reader<R: Read>(&self, reader: R) -> Result<Parsed<MarketPrices>> {
        let mut reader = csv_reader(reader);
        let headers = reader.headers()?.clone();

        let isbn_idx = find_column(&headers, |h| h.contains("isbn"));
        let price_idx = find_column(&headers, |h| h.contains("price") || h.contains("market"));

        let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
        let mut skipped = 0;

        for result in reader.records() {
            let Some(record) = next_row(self.name(), result, &mut skipped)? else {
                continue;
            };

            let raw_isbn = isbn_idx.and_then(|i| record.get(i)).unwrap_or("");
            let price = price_idx.and_then(|i| record.get(i)).and_then(parse_price);

            let (isbn, price) = match (raw_isbn.is_empty(), price) {
                (false, Some(price)) => (normalize_isbn(raw_isbn), price),
                _ => {
                    tracing::debug!(line = line_of(&record), "skipping market row");
                    skipped += 1;
                    continue;
                }
            };

            let (sum, count) = totals.entry(isbn).or_insert((0.0, 0));
            *sum += price;
            *count += 1;
        }

        let prices: MarketPrices = totals
            .into_iter()
            .map(|(isbn, (sum, count))| (isbn, sum / count as f64))
            .collect();

        tracing::debug!(count = prices.len(), skipped, "parsed market prices");
        Ok(Parsed {
            records: prices,
            skipped,
        })
    }
}

//! Data loading service for CLI and menu
//!
//! Loads the three marketplace CSV files into a `Dataset`. A file that
//! cannot be read degrades to an empty collection plus a warning, so
//! loading as a whole never fails.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::parsers::{CsvParser, ListingsParser, MarketPriceParser, MetadataParser};
use crate::types::{Dataset, LoadWarning};

/// Default listings file name inside the data directory
pub const LISTINGS_FILE: &str = "student_listings.csv";
/// Default metadata file name inside the data directory
pub const METADATA_FILE: &str = "book_metadata.csv";
/// Default market price file name inside the data directory
pub const MARKET_FILE: &str = "market_prices.csv";

/// Result of loading all datasets
#[derive(Debug)]
pub struct LoadResult {
    pub dataset: Dataset,
    /// Unavailable files and skipped-row counts, in listings/metadata/market order
    pub warnings: Vec<LoadWarning>,
}

/// Loader for the listings, metadata and market price files
#[derive(Debug, Clone)]
pub struct DataLoaderService {
    listings_path: PathBuf,
    metadata_path: PathBuf,
    market_path: PathBuf,
}

impl DataLoaderService {
    /// Create a loader reading the default file names from `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            listings_path: data_dir.join(LISTINGS_FILE),
            metadata_path: data_dir.join(METADATA_FILE),
            market_path: data_dir.join(MARKET_FILE),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            listings_path: config.listings_path(),
            metadata_path: config.metadata_path(),
            market_path: config.market_path(),
        }
    }

    /// Parse the three files in parallel and collect warnings
    pub fn load(&self) -> LoadResult {
        let (listings, (metadata, market)) = rayon::join(
            || load_one(&ListingsParser::new(), &self.listings_path),
            || {
                rayon::join(
                    || load_one(&MetadataParser::new(), &self.metadata_path),
                    || load_one(&MarketPriceParser::new(), &self.market_path),
                )
            },
        );

        let mut warnings = Vec::new();
        let listings = listings.collect_into(&mut warnings);
        let metadata = metadata.collect_into(&mut warnings);
        let market = market.collect_into(&mut warnings);

        tracing::info!(
            listings = listings.len(),
            metadata = metadata.len(),
            market = market.len(),
            warnings = warnings.len(),
            "datasets loaded"
        );

        LoadResult {
            dataset: Dataset::new(listings, metadata, market),
            warnings,
        }
    }
}

/// Output of one parser plus the warning it produced, if any
struct Loaded<T> {
    records: T,
    warning: Option<LoadWarning>,
}

impl<T> Loaded<T> {
    fn collect_into(self, warnings: &mut Vec<LoadWarning>) -> T {
        warnings.extend(self.warning);
        self.records
    }
}

fn load_one<P>(parser: &P, path: &Path) -> Loaded<P::Output>
where
    P: CsvParser,
    P::Output: Default,
{
    match parser.parse_file(path) {
        Ok(parsed) => {
            let warning = (parsed.skipped > 0).then(|| LoadWarning::RowsSkipped {
                dataset: parser.name().to_string(),
                count: parsed.skipped,
            });
            Loaded {
                records: parsed.records,
                warning,
            }
        }
        Err(e) => {
            tracing::debug!(
                dataset = parser.name(),
                path = %path.display(),
                error = %e,
                "failed to load dataset"
            );
            Loaded {
                records: P::Output::default(),
                warning: Some(LoadWarning::FileUnavailable {
                    dataset: parser.name().to_string(),
                    reason: e.to_string(),
                }),
            }
        }
    }
}

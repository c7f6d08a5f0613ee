//! Services for data loading and aggregation

pub mod aggregator;
pub mod data_loader;
pub mod normalizer;

pub use aggregator::MarketAggregator;
pub use data_loader::{DataLoaderService, LoadResult};
pub use normalizer::normalize_isbn;

use thiserror::Error;

/// shelfswap error types
#[derive(Error, Debug)]
pub enum ShelfswapError {
    /// Failed to read or decode a CSV file
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a value (number, JSON, ...)
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for shelfswap
pub type Result<T> = std::result::Result<T, ShelfswapError>;

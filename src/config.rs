//! Application configuration
//!
//! Read from `~/.shelfswap/config.json` (or an explicit `--config` path).
//! Every field is optional; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::services::aggregator::DEFAULT_FAIRNESS_TOLERANCE;
use crate::services::data_loader::{LISTINGS_FILE, MARKET_FILE, METADATA_FILE};
use crate::types::{Result, ShelfswapError};

/// Number of books shown by the demand index unless overridden
pub const DEFAULT_DEMAND_TOP_N: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the three CSV files
    pub data_dir: PathBuf,
    pub listings_file: String,
    pub metadata_file: String,
    pub market_file: String,
    pub demand_top_n: usize,
    /// Relative deviation from market price counted as fair (0.10 = 10%)
    pub fairness_tolerance: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            listings_file: LISTINGS_FILE.to_string(),
            metadata_file: METADATA_FILE.to_string(),
            market_file: MARKET_FILE.to_string(),
            demand_top_n: DEFAULT_DEMAND_TOP_N,
            fairness_tolerance: DEFAULT_FAIRNESS_TOLERANCE,
        }
    }
}

impl AppConfig {
    /// `~/.shelfswap/config.json`, if the home directory is known
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|d| d.home_dir().join(".shelfswap").join("config.json"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and be valid. The default path is optional:
    /// when it is absent or broken, defaults are used (broken files are logged).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path().filter(|p| p.exists()) {
            Some(path) => Self::from_file(&path).or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Ok(Self::default())
            }),
            None => Ok(Self::default()),
        }
    }

    /// Read and validate a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ShelfswapError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ShelfswapError::Config(format!("invalid {}: {}", path.display(), e))
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fairness_tolerance.is_finite() || self.fairness_tolerance < 0.0 {
            return Err(ShelfswapError::Config(format!(
                "fairness_tolerance must be a non-negative number, got {}",
                self.fairness_tolerance
            )));
        }
        Ok(())
    }

    pub fn listings_path(&self) -> PathBuf {
        self.data_dir.join(&self.listings_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join(&self.metadata_file)
    }

    pub fn market_path(&self) -> PathBuf {
        self.data_dir.join(&self.market_file)
    }
}

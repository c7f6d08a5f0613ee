//! Input record types for the marketplace datasets

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single student textbook listing (one row of the listings CSV)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub isbn: String,
    pub title: String,
    pub edition: i32,
    /// Free-form condition ("Good", "like new", ...); a blank cell loads as `Some("")`
    pub condition: Option<String>,
    pub price: f64,
    pub course_number: String,
    pub seller_id: String,
    pub accepts_barter: bool,
}

/// Title and author for a book, keyed elsewhere by normalized ISBN
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
}

/// Normalized ISBN → book metadata
pub type MetadataIndex = HashMap<String, BookMetadata>;

/// Normalized ISBN → average observed market price
pub type MarketPrices = HashMap<String, f64>;

/// The three loaded collections. Built once at startup and only borrowed afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub listings: Vec<Listing>,
    pub metadata: MetadataIndex,
    pub market: MarketPrices,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>, metadata: MetadataIndex, market: MarketPrices) -> Self {
        Self {
            listings,
            metadata,
            market,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty() && self.metadata.is_empty() && self.market.is_empty()
    }
}

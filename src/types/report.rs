//! Query result types produced by the aggregator

use indexmap::IndexMap;
use serde::Serialize;

use super::Listing;

/// Average asking price for one course number
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseSummary {
    pub course: String,
    pub average_price: f64,
    pub count: usize,
}

/// Student asking prices vs. market price for one normalized ISBN
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarketComparison {
    pub isbn: String,
    pub title: String,
    pub student_avg: f64,
    pub market_avg: Option<f64>,
    pub count: usize,
}

impl MarketComparison {
    /// Student average minus market average (`None` without market data)
    pub fn difference(&self) -> Option<f64> {
        self.market_avg.map(|market| self.student_avg - market)
    }

    /// Difference as a percentage of the market average.
    /// A zero market average reports 0 instead of dividing by zero.
    pub fn percent_difference(&self) -> Option<f64> {
        let market = self.market_avg?;
        if market == 0.0 {
            return Some(0.0);
        }
        Some((self.student_avg - market) / market * 100.0)
    }
}

/// How many comparable listings sit within tolerance of the market price
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct FairnessScore {
    pub comparable: usize,
    pub within_tolerance: usize,
    pub percent_within: f64,
}

/// Barter-eligible listing and its trade candidates, closest price first
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarterMatch<'a> {
    pub listing: &'a Listing,
    pub candidates: Vec<&'a Listing>,
}

/// Number of listings for one normalized ISBN
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemandEntry {
    pub isbn: String,
    pub title: String,
    pub listings: usize,
}

/// Lowercased condition → cheapest listing, in first-seen condition order
pub type CheapestByCondition<'a> = IndexMap<String, &'a Listing>;

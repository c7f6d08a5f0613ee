//! Aggregator service for marketplace queries
//!
//! Every query recomputes its grouping from the borrowed collections,
//! so calls are pure and can run in any order.

use std::collections::{BTreeMap, HashMap};

use indexmap::map::Entry;

use crate::services::normalizer::normalize_isbn;
use crate::types::{
    BarterMatch, CheapestByCondition, CourseSummary, Dataset, DemandEntry, FairnessScore,
    Listing, MarketComparison, MarketPrices, MetadataIndex,
};

/// Course label for listings without a course number
pub const UNKNOWN_COURSE: &str = "<unknown>";

/// Title shown when metadata is missing or has an empty title
pub const UNKNOWN_TITLE: &str = "(unknown)";

/// Condition label for listings without a condition
pub const UNKNOWN_CONDITION: &str = "unknown";

/// Maximum relative deviation from market price that still counts as fair
pub const DEFAULT_FAIRNESS_TOLERANCE: f64 = 0.10;

/// Aggregator for computing marketplace statistics over loaded datasets
#[derive(Debug, Clone, Copy)]
pub struct MarketAggregator<'a> {
    listings: &'a [Listing],
    metadata: &'a MetadataIndex,
    market: &'a MarketPrices,
    tolerance: f64,
}

impl<'a> MarketAggregator<'a> {
    pub fn new(
        listings: &'a [Listing],
        metadata: &'a MetadataIndex,
        market: &'a MarketPrices,
    ) -> Self {
        Self {
            listings,
            metadata,
            market,
            tolerance: DEFAULT_FAIRNESS_TOLERANCE,
        }
    }

    pub fn from_dataset(dataset: &'a Dataset) -> Self {
        Self::new(&dataset.listings, &dataset.metadata, &dataset.market)
    }

    /// Override the fairness tolerance (relative, e.g. 0.10 for 10%)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn total_listings_count(&self) -> usize {
        self.listings.len()
    }

    /// Mean asking price per course number (sorted by course ascending).
    /// Course numbers are grouped by exact string; empty → `<unknown>`.
    pub fn average_price_by_course(&self) -> Vec<CourseSummary> {
        let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

        for listing in self.listings {
            let course = if listing.course_number.is_empty() {
                UNKNOWN_COURSE
            } else {
                listing.course_number.as_str()
            };
            let (sum, count) = groups.entry(course).or_insert((0.0, 0));
            *sum += listing.price;
            *count += 1;
        }

        groups
            .into_iter()
            .map(|(course, (sum, count))| CourseSummary {
                course: course.to_string(),
                average_price: sum / count as f64,
                count,
            })
            .collect()
    }

    /// Mean student price vs. market price per normalized ISBN (sorted by ISBN ascending)
    pub fn student_vs_market_comparison(&self) -> Vec<MarketComparison> {
        let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for listing in self.listings {
            let (sum, count) = groups
                .entry(normalize_isbn(&listing.isbn))
                .or_insert((0.0, 0));
            *sum += listing.price;
            *count += 1;
        }

        groups
            .into_iter()
            .map(|(isbn, (sum, count))| MarketComparison {
                title: self.title_for(&isbn),
                market_avg: self.market.get(&isbn).copied(),
                student_avg: sum / count as f64,
                count,
                isbn,
            })
            .collect()
    }

    /// Cheapest listing per lowercased condition. Ties keep the earlier listing.
    pub fn cheapest_listing_by_condition(&self) -> CheapestByCondition<'a> {
        let mut best = CheapestByCondition::new();

        for listing in self.listings {
            let condition = listing
                .condition
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

            match best.entry(condition) {
                Entry::Occupied(mut slot) => {
                    if listing.price < slot.get().price {
                        slot.insert(listing);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(listing);
                }
            }
        }

        best
    }

    /// Share of comparable listings priced within tolerance of the market price.
    /// Listings without a market price, or with a zero market price, are not comparable.
    pub fn market_fairness_score(&self) -> FairnessScore {
        let mut score = FairnessScore::default();

        for listing in self.listings {
            let market = match self.market.get(&normalize_isbn(&listing.isbn)) {
                Some(&price) if price != 0.0 => price,
                _ => continue,
            };

            score.comparable += 1;
            let deviation = (listing.price - market).abs() / market;
            if deviation <= self.tolerance {
                score.within_tolerance += 1;
            }
        }

        if score.comparable > 0 {
            score.percent_within = score.within_tolerance as f64 * 100.0 / score.comparable as f64;
        }
        score
    }

    /// Trade candidates for every barter-eligible listing, in listing order.
    ///
    /// Candidates come from other sellers with the same normalized ISBN; when
    /// there are none, from other sellers listing for the same course number.
    /// Closest asking price first; equal gaps keep listing order.
    pub fn barter_compatibility_finder(&self) -> Vec<BarterMatch<'a>> {
        let mut by_isbn: HashMap<String, Vec<&'a Listing>> = HashMap::new();
        let mut by_course: HashMap<&'a str, Vec<&'a Listing>> = HashMap::new();

        for listing in self.listings {
            by_isbn
                .entry(normalize_isbn(&listing.isbn))
                .or_default()
                .push(listing);
            by_course
                .entry(listing.course_number.as_str())
                .or_default()
                .push(listing);
        }

        self.listings
            .iter()
            .filter(|listing| listing.accepts_barter)
            .map(|listing| {
                let isbn = normalize_isbn(&listing.isbn);
                let mut candidates = other_sellers(listing, by_isbn.get(&isbn));
                if candidates.is_empty() {
                    candidates =
                        other_sellers(listing, by_course.get(listing.course_number.as_str()));
                }

                let gap = |c: &Listing| (c.price - listing.price).abs();
                candidates.sort_by(|a, b| gap(*a).total_cmp(&gap(*b)));

                BarterMatch {
                    listing,
                    candidates,
                }
            })
            .collect()
    }

    /// Most-listed books: count per normalized ISBN, highest first.
    /// Equal counts are ordered by ISBN ascending.
    pub fn demand_index(&self, top_n: usize) -> Vec<DemandEntry> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for listing in self.listings {
            *counts.entry(normalize_isbn(&listing.isbn)).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(isbn, listings)| DemandEntry {
                title: self.title_for(&isbn),
                isbn,
                listings,
            })
            .collect()
    }

    /// Display title for a normalized ISBN (`(unknown)` when missing or empty)
    fn title_for(&self, isbn: &str) -> String {
        self.metadata
            .get(isbn)
            .map(|m| m.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string()
    }
}

/// Listings in `pool` from a different seller than `listing`
fn other_sellers<'a>(listing: &Listing, pool: Option<&Vec<&'a Listing>>) -> Vec<&'a Listing> {
    pool.map(|pool| {
        pool.iter()
            .copied()
            .filter(|c| c.seller_id != listing.seller_id)
            .collect()
    })
    .unwrap_or_default()
}

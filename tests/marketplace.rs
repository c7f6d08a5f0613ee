//! End-to-end checks: load the fixture CSVs and run every query

use std::path::PathBuf;

use shelfswap::cli::Report;
use shelfswap::services::aggregator::{UNKNOWN_COURSE, UNKNOWN_TITLE};
use shelfswap::services::{DataLoaderService, LoadResult, MarketAggregator};

fn load_fixtures() -> LoadResult {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    DataLoaderService::new(&dir).load()
}

#[test]
fn test_total_listings() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);
    assert_eq!(agg.total_listings_count(), 6);
}

#[test]
fn test_average_price_by_course() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    let summaries = agg.average_price_by_course();

    let courses: Vec<&str> = summaries.iter().map(|s| s.course.as_str()).collect();
    assert_eq!(courses, vec![UNKNOWN_COURSE, "CS101", "CS201", "MATH200"]);
    assert!((summaries[1].average_price - 145.0 / 3.0).abs() < 1e-9);
    assert_eq!(summaries[1].count, 3);
    let total: usize = summaries.iter().map(|s| s.count).sum();
    assert_eq!(total, 6);
}

#[test]
fn test_student_vs_market() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    let comparisons = agg.student_vs_market_comparison();

    let isbns: Vec<&str> = comparisons.iter().map(|c| c.isbn.as_str()).collect();
    assert_eq!(
        isbns,
        vec!["030640615X", "111222", "9780134685991", "9780262033848"]
    );

    // Empty metadata title and zero market price
    assert_eq!(comparisons[0].title, UNKNOWN_TITLE);
    assert_eq!(comparisons[0].market_avg, Some(0.0));
    assert_eq!(comparisons[0].percent_difference(), Some(0.0));

    // No metadata, no market data
    assert_eq!(comparisons[1].title, UNKNOWN_TITLE);
    assert!(comparisons[1].market_avg.is_none());

    let java = &comparisons[2];
    assert_eq!(java.title, "Effective Java");
    assert_eq!(java.count, 3);
    assert_eq!(java.market_avg, Some(55.0));
    assert!((java.student_avg - 145.0 / 3.0).abs() < 1e-9);

    assert_eq!(comparisons[3].title, "Introduction to Algorithms");
    assert_eq!(comparisons[3].market_avg, Some(1000.0));
}

#[test]
fn test_cheapest_by_condition() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    let cheapest = agg.cheapest_listing_by_condition();

    let conditions: Vec<&str> = cheapest.keys().map(String::as_str).collect();
    // Blank condition cell groups under its own empty key
    assert_eq!(conditions, vec!["good", "fair", "like new", "poor", ""]);
    assert_eq!(cheapest["good"].seller_id, "s1");
    assert!((cheapest["good"].price - 50.0).abs() < f64::EPSILON);
    assert_eq!(cheapest[""].seller_id, "s5");
}

#[test]
fn test_market_fairness() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    let score = agg.market_fairness_score();

    // 50 and 60 vs 55 are within 10%; 35 vs 55 and 70 vs 1000 are not; zero market skipped
    assert_eq!(score.comparable, 4);
    assert_eq!(score.within_tolerance, 2);
    assert!((score.percent_within - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_barter_compatibility() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    let matches = agg.barter_compatibility_finder();

    let sellers: Vec<&str> = matches
        .iter()
        .map(|m| m.listing.seller_id.as_str())
        .collect();
    assert_eq!(sellers, vec!["s1", "s3", "s4"]);

    // s1's other Effective Java listing is excluded as same seller
    assert_eq!(matches[0].candidates.len(), 1);
    assert_eq!(matches[0].candidates[0].seller_id, "s2");
    assert!(matches[1].candidates.is_empty());
    assert!(matches[2].candidates.is_empty());
}

#[test]
fn test_demand_index() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    let demand = agg.demand_index(2);

    assert_eq!(demand.len(), 2);
    assert_eq!(demand[0].isbn, "9780134685991");
    assert_eq!(demand[0].title, "Effective Java");
    assert_eq!(demand[0].listings, 3);
    assert_eq!(demand[1].isbn, "030640615X");
    assert_eq!(demand[1].listings, 1);

    assert_eq!(agg.demand_index(100).len(), 4);
}

#[test]
fn test_every_report_renders() {
    let loaded = load_fixtures();
    let agg = MarketAggregator::from_dataset(&loaded.dataset);

    for choice in 1..=7 {
        let report = Report::from_menu_choice(choice, 10).unwrap();
        for json in [false, true] {
            let mut out = Vec::new();
            report.render(&agg, json, &mut out).unwrap();
            assert!(!out.is_empty(), "{} rendered nothing", report.key());
        }
    }
}

//! Criterion benchmarks for MarketAggregator

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use shelfswap::services::MarketAggregator;
use shelfswap::types::{BookMetadata, Dataset, Listing, MarketPrices, MetadataIndex};

const CONDITIONS: [&str; 4] = ["New", "Like New", "Good", "Fair"];

/// Synthetic marketplace: `books` distinct ISBNs, several listings each
fn build_dataset(listings: usize, books: usize) -> Dataset {
    let isbn = |i: usize| format!("978-0-{:05}-{:03}-{}", i % books, i % 997, i % 10);

    let listings: Vec<Listing> = (0..listings)
        .map(|i| Listing {
            isbn: isbn(i % books),
            title: format!("Book {}", i % books),
            edition: (i % 5) as i32 + 1,
            condition: Some(CONDITIONS[i % CONDITIONS.len()].to_string()),
            price: 10.0 + (i % 90) as f64,
            course_number: format!("CS{}", 100 + i % 40),
            seller_id: format!("seller-{}", i % 250),
            accepts_barter: i % 3 == 0,
        })
        .collect();

    let mut metadata = MetadataIndex::new();
    let mut market = MarketPrices::new();
    for b in 0..books {
        let key = shelfswap::services::normalize_isbn(&isbn(b));
        metadata.insert(
            key.clone(),
            BookMetadata {
                title: format!("Book {}", b),
                author: "Author".to_string(),
            },
        );
        market.insert(key, 20.0 + (b % 60) as f64);
    }

    Dataset::new(listings, metadata, market)
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator");

    for size in [1_000usize, 10_000] {
        let dataset = build_dataset(size, size / 8);
        let agg = MarketAggregator::from_dataset(&dataset);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("by_course", size), &agg, |b, agg| {
            b.iter(|| black_box(agg.average_price_by_course()));
        });
        group.bench_with_input(BenchmarkId::new("vs_market", size), &agg, |b, agg| {
            b.iter(|| black_box(agg.student_vs_market_comparison()));
        });
        group.bench_with_input(BenchmarkId::new("fairness", size), &agg, |b, agg| {
            b.iter(|| black_box(agg.market_fairness_score()));
        });
        group.bench_with_input(BenchmarkId::new("demand", size), &agg, |b, agg| {
            b.iter(|| black_box(agg.demand_index(10)));
        });
    }

    group.finish();
}

fn bench_barter(c: &mut Criterion) {
    let dataset = build_dataset(2_000, 400);
    let agg = MarketAggregator::from_dataset(&dataset);

    c.bench_function("aggregator/barter_2000", |b| {
        b.iter(|| black_box(agg.barter_compatibility_finder()));
    });
}

criterion_group!(benches, bench_queries, bench_barter);
criterion_main!(benches);

//! Report rendering for the seven marketplace queries
//!
//! Text output formats prices with two fraction digits and percentages
//! with one. JSON output wraps the query result in a small envelope.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::MarketAggregator;
use crate::types::{Result, ShelfswapError};

const RULE: &str = "-------------------------";

/// One of the queries offered by the menu and subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    TotalListings,
    AveragePriceByCourse,
    StudentVsMarket,
    CheapestByCondition,
    MarketFairness,
    BarterCompatibility,
    DemandIndex { top_n: usize },
}

#[derive(Serialize)]
struct JsonEnvelope<'r, T: Serialize> {
    report: &'r str,
    generated_at: DateTime<Utc>,
    data: T,
}

#[derive(Serialize)]
struct TotalListings {
    total_listings: usize,
}

impl Report {
    /// Map a menu number (1-7) to its report
    pub fn from_menu_choice(choice: i64, demand_top_n: usize) -> Option<Self> {
        match choice {
            1 => Some(Report::TotalListings),
            2 => Some(Report::AveragePriceByCourse),
            3 => Some(Report::StudentVsMarket),
            4 => Some(Report::CheapestByCondition),
            5 => Some(Report::MarketFairness),
            6 => Some(Report::BarterCompatibility),
            7 => Some(Report::DemandIndex {
                top_n: demand_top_n,
            }),
            _ => None,
        }
    }

    /// Stable identifier used in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Report::TotalListings => "total_listings",
            Report::AveragePriceByCourse => "average_price_by_course",
            Report::StudentVsMarket => "student_vs_market",
            Report::CheapestByCondition => "cheapest_by_condition",
            Report::MarketFairness => "market_fairness",
            Report::BarterCompatibility => "barter_compatibility",
            Report::DemandIndex { .. } => "demand_index",
        }
    }

    /// Human-readable heading (also the menu label)
    pub fn title(&self) -> &'static str {
        match self {
            Report::TotalListings => "Total Listings Count",
            Report::AveragePriceByCourse => "Average Asking Price by Course",
            Report::StudentVsMarket => "Student vs. Market Price Comparison",
            Report::CheapestByCondition => "Cheapest Listing by Condition",
            Report::MarketFairness => "Market Fairness Score",
            Report::BarterCompatibility => "Barter Compatibility Finder",
            Report::DemandIndex { .. } => "Book Demand Index",
        }
    }

    pub fn render(
        &self,
        agg: &MarketAggregator<'_>,
        json: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        if json {
            self.render_json(agg, out)
        } else {
            self.render_text(agg, out)
        }
    }

    pub fn render_text(&self, agg: &MarketAggregator<'_>, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        writeln!(out, ">> {}", self.title())?;
        writeln!(out, "{}", RULE)?;

        match *self {
            Report::TotalListings => {
                writeln!(
                    out,
                    "Total valid textbook listings: {}",
                    agg.total_listings_count()
                )?;
            }
            Report::AveragePriceByCourse => {
                let summaries = agg.average_price_by_course();
                if summaries.is_empty() {
                    writeln!(out, "No listings loaded.")?;
                }
                for s in summaries {
                    writeln!(
                        out,
                        "{:<12} avg {:>10}  ({} listing{})",
                        s.course,
                        format_price(s.average_price),
                        s.count,
                        plural(s.count)
                    )?;
                }
            }
            Report::StudentVsMarket => {
                let comparisons = agg.student_vs_market_comparison();
                if comparisons.is_empty() {
                    writeln!(out, "No listings loaded.")?;
                }
                for c in comparisons {
                    writeln!(
                        out,
                        "{} - {} ({} listing{})",
                        c.isbn,
                        c.title,
                        c.count,
                        plural(c.count)
                    )?;
                    match (c.market_avg, c.difference(), c.percent_difference()) {
                        (Some(market), Some(diff), Some(pct)) => writeln!(
                            out,
                            "    student {}  market {}  diff {} ({})",
                            format_price(c.student_avg),
                            format_price(market),
                            format_signed_price(diff),
                            format_percent(pct)
                        )?,
                        _ => writeln!(
                            out,
                            "    student {}  market n/a",
                            format_price(c.student_avg)
                        )?,
                    }
                }
            }
            Report::CheapestByCondition => {
                let cheapest = agg.cheapest_listing_by_condition();
                if cheapest.is_empty() {
                    writeln!(out, "No listings loaded.")?;
                }
                for (condition, listing) in cheapest {
                    writeln!(
                        out,
                        "{:<10} {:>10}  {} [{}] seller {}",
                        condition,
                        format_price(listing.price),
                        listing.title,
                        listing.isbn,
                        listing.seller_id
                    )?;
                }
            }
            Report::MarketFairness => {
                let score = agg.market_fairness_score();
                writeln!(
                    out,
                    "{}/{} comparable listings within {} of market price -> {}",
                    score.within_tolerance,
                    score.comparable,
                    format_percent_unsigned(agg.tolerance() * 100.0),
                    format_percent_unsigned(score.percent_within)
                )?;
            }
            Report::BarterCompatibility => {
                let matches = agg.barter_compatibility_finder();
                if matches.is_empty() {
                    writeln!(out, "No listings accept barter.")?;
                }
                for m in matches {
                    writeln!(
                        out,
                        "{} [{}] {} seller {}",
                        m.listing.title,
                        m.listing.isbn,
                        format_price(m.listing.price),
                        m.listing.seller_id
                    )?;
                    if m.candidates.is_empty() {
                        writeln!(out, "    no compatible listings")?;
                    }
                    for c in m.candidates {
                        writeln!(
                            out,
                            "    -> {} [{}] {} seller {} (gap {})",
                            c.title,
                            c.isbn,
                            format_price(c.price),
                            c.seller_id,
                            format_price((c.price - m.listing.price).abs())
                        )?;
                    }
                }
            }
            Report::DemandIndex { top_n } => {
                let entries = agg.demand_index(top_n);
                if entries.is_empty() {
                    writeln!(out, "No listings loaded.")?;
                }
                for (rank, e) in entries.iter().enumerate() {
                    writeln!(
                        out,
                        "{:>2}. {} - {} ({} listing{})",
                        rank + 1,
                        e.isbn,
                        e.title,
                        e.listings,
                        plural(e.listings)
                    )?;
                }
            }
        }

        Ok(())
    }

    pub fn render_json(&self, agg: &MarketAggregator<'_>, out: &mut impl Write) -> Result<()> {
        match *self {
            Report::TotalListings => self.write_json(
                out,
                TotalListings {
                    total_listings: agg.total_listings_count(),
                },
            ),
            Report::AveragePriceByCourse => self.write_json(out, agg.average_price_by_course()),
            Report::StudentVsMarket => self.write_json(out, agg.student_vs_market_comparison()),
            Report::CheapestByCondition => {
                self.write_json(out, agg.cheapest_listing_by_condition())
            }
            Report::MarketFairness => self.write_json(out, agg.market_fairness_score()),
            Report::BarterCompatibility => self.write_json(out, agg.barter_compatibility_finder()),
            Report::DemandIndex { top_n } => self.write_json(out, agg.demand_index(top_n)),
        }
    }

    fn write_json<T: Serialize>(&self, out: &mut impl Write, data: T) -> Result<()> {
        let envelope = JsonEnvelope {
            report: self.key(),
            generated_at: Utc::now(),
            data,
        };
        serde_json::to_writer_pretty(&mut *out, &envelope)
            .map_err(|e| ShelfswapError::Parse(e.to_string()))?;
        writeln!(out)?;
        Ok(())
    }
}

/// `$12.30`, `-$4.00` for negatives
pub fn format_price(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// Always signed: `+$1.50`, `-$6.67`
pub fn format_signed_price(value: f64) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    format!("{}${:.2}", sign, value.abs())
}

/// Always signed, one fraction digit: `+12.5%`
pub fn format_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

fn format_percent_unsigned(value: f64) -> String {
    format!("{:.1}%", value)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

mod menu;
mod report;

pub use menu::Menu;
pub use report::Report;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::services::{DataLoaderService, MarketAggregator};

/// Textbook marketplace analytics
#[derive(Parser)]
#[command(name = "shelfswap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the CSV files (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (default: ~/.shelfswap/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive menu (default)
    Menu,

    /// Show total listings count
    Count {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show average asking price by course
    Courses {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare student asking prices with market prices
    Compare {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the cheapest listing per condition
    Cheapest {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how many listings are priced close to market
    Fairness {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find trade candidates for listings that accept barter
    Barter {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most-listed books
    Demand {
        /// Number of books to show (default from config)
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(self) -> anyhow::Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }

        let loaded = DataLoaderService::from_config(&config).load();
        for warning in &loaded.warnings {
            tracing::warn!("{}", warning);
        }

        let aggregator = MarketAggregator::from_dataset(&loaded.dataset)
            .with_tolerance(config.fairness_tolerance);

        let stdout = io::stdout();
        let mut out = stdout.lock();

        let (report, json) = match self.command {
            None | Some(Commands::Menu) => {
                let stdin = io::stdin();
                Menu::new(aggregator, config.demand_top_n).run(stdin.lock(), &mut out)?;
                return Ok(());
            }
            Some(Commands::Count { json }) => (Report::TotalListings, json),
            Some(Commands::Courses { json }) => (Report::AveragePriceByCourse, json),
            Some(Commands::Compare { json }) => (Report::StudentVsMarket, json),
            Some(Commands::Cheapest { json }) => (Report::CheapestByCondition, json),
            Some(Commands::Fairness { json }) => (Report::MarketFairness, json),
            Some(Commands::Barter { json }) => (Report::BarterCompatibility, json),
            Some(Commands::Demand { top, json }) => (
                Report::DemandIndex {
                    top_n: top.unwrap_or(config.demand_top_n),
                },
                json,
            ),
        };

        report.render(&aggregator, json, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

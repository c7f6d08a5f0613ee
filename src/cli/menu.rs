//! Interactive numbered menu over the marketplace reports

use std::io::{BufRead, Write};

use super::report::Report;
use crate::services::MarketAggregator;
use crate::types::Result;

/// Highest menu option number
const MAX_OPTION: i64 = 7;

/// Line-oriented menu loop: prints the options, reads a choice, renders a report
pub struct Menu<'a> {
    aggregator: MarketAggregator<'a>,
    demand_top_n: usize,
}

impl<'a> Menu<'a> {
    pub fn new(aggregator: MarketAggregator<'a>, demand_top_n: usize) -> Self {
        Self {
            aggregator,
            demand_top_n,
        }
    }

    /// Run until the user picks 0 or input ends
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<()> {
        let mut lines = input.lines();

        loop {
            self.print_menu(out)?;
            write!(out, "Select an option (0 to exit): ")?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    writeln!(out)?;
                    break;
                }
            };

            let choice = match line.trim().parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(
                        out,
                        "Invalid input. Please enter a number between 0 and {}.",
                        MAX_OPTION
                    )?;
                    continue;
                }
            };

            if choice == 0 {
                break;
            }

            match Report::from_menu_choice(choice, self.demand_top_n) {
                Some(report) => {
                    tracing::debug!(report = report.key(), "menu selection");
                    report.render_text(&self.aggregator, out)?;
                }
                None => writeln!(out, "Unknown option. Please choose 0-{}.", MAX_OPTION)?,
            }
        }

        writeln!(out, "Exiting. Goodbye.")?;
        Ok(())
    }

    fn print_menu<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "===== TEXTBOOK MARKETPLACE =====")?;
        for choice in 1..=MAX_OPTION {
            if let Some(report) = Report::from_menu_choice(choice, self.demand_top_n) {
                writeln!(out, "{}. {}", choice, report.title())?;
            }
        }
        writeln!(out, "0. Exit")?;
        Ok(())
    }
}

use anyhow::Result;
use chrono::Datelike;
use clap::Subcommand;

use super::{month_parser, year_parser};
use crate::db::Database;
use crate::reports;
use crate::ui::{render, theme};

#[derive(Subcommand, Debug)]
pub(crate) enum ReportsCommand {
    /// Budget against spending for every month of a year
    Year {
        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,
    },

    /// Budget status of one month, with a forecast for the current month
    Month {
        #[arg(long, short, value_parser = month_parser())]
        month: Option<u32>,

        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,
    },

    /// Spending habits by day of the week
    Weekday,

    /// Spread of transaction amounts and the largest outliers
    Volatility {
        /// Limit to one year (default: all time)
        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,
    },

    /// Payees ranked by total spending
    Payees {
        /// Limit to one year (default: all time)
        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,

        #[arg(long, short, default_value_t = 10)]
        limit: usize,
    },

    /// Find transactions by receiver or description
    Search {
        /// Keyword to look for
        query: String,

        #[arg(long, short, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
}

pub(super) fn execute(command: ReportsCommand, db: &Database) -> Result<()> {
    match command {
        ReportsCommand::Year { year } => {
            let year = year.unwrap_or_else(super::current_year);
            let months = reports::yearly_report(db, year)?;
            println!("{}", render::year_report(year, &months));
        }

        ReportsCommand::Month { month, year } => {
            let today = super::today();
            let report = reports::monthly_report(
                db,
                year.unwrap_or_else(|| today.year()),
                month.unwrap_or_else(|| today.month()),
                today,
            )?;
            println!("{}", render::month_report(&report));
        }

        ReportsCommand::Weekday => {
            let days = reports::weekday_report(db)?;
            if days.is_empty() {
                println!("{}", theme::warning("No transactions found."));
                return Ok(());
            }
            println!("{}", render::weekday_report(&days));
        }

        ReportsCommand::Volatility { year } => {
            let label = year.map_or_else(|| "All Time".to_string(), |y| y.to_string());
            match reports::volatility_report(db, year)? {
                Some(report) => println!("{}", render::volatility_report(&label, &report)),
                None => println!(
                    "{}",
                    theme::warning(&format!("No transactions found for {label}."))
                ),
            }
        }

        ReportsCommand::Payees { year, limit } => {
            let payees = reports::top_payees(db, year, limit)?;
            if payees.is_empty() {
                println!("{}", theme::warning("No transactions found."));
                return Ok(());
            }
            println!("{}", render::payee_ranking(&payees));
        }

        ReportsCommand::Search { query, limit } => {
            let mut results = db.search_transactions(&query, limit)?;
            if results.is_empty() {
                println!(
                    "{}",
                    theme::warning(&format!("No transactions found matching '{query}'."))
                );
                return Ok(());
            }

            let mut title = format!("Search Results: '{query}'");
            if results.len() == limit as usize {
                title.push_str(&format!(" (Showing latest {limit})"));
            }
            results.reverse();
            println!("{}", render::transaction_list(&title, &results));
        }
    }
    Ok(())
}

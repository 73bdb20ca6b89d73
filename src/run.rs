mod budgets;
mod categories;
mod reports;
mod transactions;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::builder::RangedI64ValueParser;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::calendar::{MAX_YEAR, MIN_YEAR};
use crate::db::Database;

use budgets::BudgetsCommand;
use categories::CategoriesCommand;
use reports::ReportsCommand;
use transactions::TransactionsCommand;

#[derive(Parser, Debug)]
#[command(
    name = "budy",
    version,
    about = "budy - local personal finance ledger with budget suggestions"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Add, list and import transactions
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommand,
    },

    /// Set, list and generate monthly budgets
    Budgets {
        #[command(subcommand)]
        command: BudgetsCommand,
    },

    /// Spending reports
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },

    /// Manage categories and auto-categorization rules
    Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    },
}

pub(crate) fn execute(command: Command, db: &mut Database) -> Result<()> {
    match command {
        Command::Transactions { command } => transactions::execute(command, db),
        Command::Budgets { command } => budgets::execute(command, db),
        Command::Reports { command } => reports::execute(command, db),
        Command::Categories { command } => categories::execute(command, db),
    }
}

// ── Shared argument parsing ──────────────────────────────────

fn month_parser() -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=12)
}

fn year_parser() -> RangedI64ValueParser<i32> {
    clap::value_parser!(i32).range(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn current_year() -> i32 {
    today().year()
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parses(args: &[&str]) -> bool {
        Cli::try_parse_from(std::iter::once("budy").chain(args.iter().copied())).is_ok()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli =
            Cli::try_parse_from(["budy", "budgets", "generate", "--year", "2025", "--yes"]).unwrap();
        match cli.command {
            Command::Budgets {
                command: BudgetsCommand::Generate { year, force, yes },
            } => {
                assert_eq!(year, Some(2025));
                assert!(!force);
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_month_and_year_are_range_checked() {
        assert!(!parses(&["budgets", "add", "--amount", "10", "--month", "13"]));
        assert!(!parses(&["budgets", "add", "--amount", "10", "--month", "0"]));
        assert!(!parses(&["budgets", "generate", "--year", "1899"]));
        assert!(!parses(&["budgets", "generate", "--year", "2101"]));
        assert!(parses(&["reports", "month", "--month", "12", "--year", "2100"]));
        assert!(parses(&["budgets", "list", "--year", "1900"]));
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from([
            "budy",
            "transactions",
            "import",
            "--bank",
            "swedbank",
            "--file",
            "statement.csv",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Command::Transactions {
                command: TransactionsCommand::Import { bank, file, dry_run },
            } => {
                assert_eq!(bank, crate::import::Bank::Swedbank);
                assert_eq!(file, std::path::PathBuf::from("statement.csv"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!parses(&["transactions", "import", "--bank", "nordea", "--file", "x.csv"]));
    }

    #[test]
    fn test_parse_transaction_amount_and_date() {
        let cli = Cli::try_parse_from([
            "budy",
            "transactions",
            "add",
            "--amount",
            "12.50",
            "--date",
            "2024-02-29",
        ])
        .unwrap();
        match cli.command {
            Command::Transactions {
                command: TransactionsCommand::Add { amount, date, .. },
            } => {
                assert_eq!(amount.to_string(), "12.50");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!parses(&["transactions", "add", "--amount", "ten"]));
        assert!(!parses(&["transactions", "add", "--amount", "1", "--date", "2023-02-30"]));
    }
}

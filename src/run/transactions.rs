use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::db::Database;
use crate::import::{self, Bank};
use crate::ledger;
use crate::ui::{render, theme, util::format_cents};

#[derive(Subcommand, Debug)]
pub(crate) enum TransactionsCommand {
    /// Record an expense
    Add {
        /// Amount in major units, e.g. 12.50
        #[arg(long, short)]
        amount: Decimal,

        /// Date of the expense, YYYY-MM-DD (default: today)
        #[arg(long, short)]
        date: Option<NaiveDate>,

        /// Who was paid
        #[arg(long, short)]
        receiver: Option<String>,

        /// Free-text note
        #[arg(long)]
        description: Option<String>,
    },

    /// Show transactions day by day
    List {
        /// Days to skip back from today
        #[arg(long, short, default_value_t = 0)]
        offset: u32,

        /// Number of days to show
        #[arg(long, short, default_value_t = ledger::DEFAULT_DAY_WINDOW)]
        limit: u32,
    },

    /// Import expenses from a bank CSV statement
    Import {
        /// Bank the statement comes from
        #[arg(long, short, value_enum)]
        bank: Bank,

        /// Path to the CSV file
        #[arg(long, short)]
        file: PathBuf,

        /// Parse and categorize without saving
        #[arg(long)]
        dry_run: bool,
    },
}

pub(super) fn execute(command: TransactionsCommand, db: &mut Database) -> Result<()> {
    match command {
        TransactionsCommand::Add {
            amount,
            date,
            receiver,
            description,
        } => {
            let entry_date = date.unwrap_or_else(super::today);
            let txn = ledger::record_transaction(db, amount, entry_date, receiver, description)?;
            println!(
                "{}",
                theme::success(&format!("Added! Transaction #{}", txn.id.unwrap_or(0)))
            );
            println!(
                "{} on {}",
                theme::header(format_cents(txn.amount)),
                txn.entry_date.format("%B %d, %Y")
            );
        }

        TransactionsCommand::List { offset, limit } => {
            let days = ledger::daily_transactions(db, super::today(), offset, limit)?;
            if days.iter().all(|(_, txns)| txns.is_empty()) {
                println!(
                    "{}",
                    theme::warning("No transactions found for the selected dates.")
                );
                return Ok(());
            }
            let categories = db.get_categories()?;
            println!("{}", render::daily_transactions(&days, &categories));
        }

        TransactionsCommand::Import {
            bank,
            file,
            dry_run,
        } => {
            let name = file
                .file_name()
                .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
            println!("Parsing {} using {} importer...", theme::header(name.as_str()), bank);

            let transactions = import::import_transactions(db, bank, &file, dry_run)?;
            if transactions.is_empty() {
                println!(
                    "{}",
                    theme::warning(&format!("No valid expenses found in {name}."))
                );
                return Ok(());
            }

            let total: i64 = transactions.iter().map(|t| t.amount).sum();
            let categorized = transactions.iter().filter(|t| t.category_id.is_some()).count();
            println!(
                "Found {} transactions totaling {} ({categorized} auto-categorized).",
                transactions.len(),
                theme::good(format_cents(total))
            );
            if dry_run {
                println!(
                    "{}",
                    theme::caution("Dry run active. No changes made to database.")
                );
            } else {
                println!(
                    "{}",
                    theme::success(&format!(
                        "Successfully imported {} transactions!",
                        transactions.len()
                    ))
                );
            }
        }
    }
    Ok(())
}

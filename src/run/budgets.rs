use anyhow::Result;
use chrono::Datelike;
use clap::Subcommand;
use rust_decimal::Decimal;

use super::{month_parser, year_parser};
use crate::calendar;
use crate::db::Database;
use crate::ledger::{self, BudgetOutcome};
use crate::money::to_cents;
use crate::suggest;
use crate::ui::{render, theme, util::format_cents};

#[derive(Subcommand, Debug)]
pub(crate) enum BudgetsCommand {
    /// Set the budget for a month, asking before overwriting
    Add {
        /// Amount in major units
        #[arg(long, short)]
        amount: Decimal,

        /// Target month (default: current month)
        #[arg(long, short, value_parser = month_parser())]
        month: Option<u32>,

        /// Target year (default: current year)
        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,
    },

    /// Show the budgets of a year
    List {
        /// Year to show (default: current year)
        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,

        /// Months to skip
        #[arg(long, short, default_value_t = 0)]
        offset: usize,

        /// Months to show
        #[arg(long, short, default_value_t = 12)]
        limit: usize,
    },

    /// Suggest budgets for a year from spending history
    Generate {
        /// Target year (default: current year)
        #[arg(long, short, value_parser = year_parser())]
        year: Option<i32>,

        /// Also suggest months that already have a budget
        #[arg(long, short)]
        force: bool,

        /// Save without asking
        #[arg(long)]
        yes: bool,
    },
}

pub(super) fn execute(command: BudgetsCommand, db: &mut Database) -> Result<()> {
    match command {
        BudgetsCommand::Add {
            amount,
            month,
            year,
        } => add(db, amount, month, year),
        BudgetsCommand::List {
            year,
            offset,
            limit,
        } => {
            let year = year.unwrap_or_else(super::current_year);
            let slots = ledger::budget_slots(db, year, offset, limit)?;
            if slots.iter().all(|(_, budget)| budget.is_none()) {
                println!(
                    "{}",
                    theme::warning(&format!("No budgets found for {year}."))
                );
                return Ok(());
            }
            println!("{}", render::budget_list(year, &slots));
            Ok(())
        }
        BudgetsCommand::Generate { year, force, yes } => {
            generate(db, year.unwrap_or_else(super::current_year), force, yes)
        }
    }
}

fn add(db: &Database, amount: Decimal, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let today = super::today();
    let month = month.unwrap_or_else(|| today.month());
    let year = year.unwrap_or_else(|| today.year());
    let cents = to_cents(amount)?;
    if cents <= 0 {
        anyhow::bail!("Budget amount must be positive, got {amount}");
    }
    let target = format!("{} {year}", calendar::month_name(month));

    let outcome = ledger::set_budget(db, cents, month, year, |existing| {
        println!(
            "{}",
            theme::warning(&format!(
                "A budget of {} already exists for {target}.",
                format_cents(existing.amount)
            ))
        );
        super::confirm("Overwrite?")
    })?;

    match outcome {
        BudgetOutcome::Created(budget) => println!(
            "{} Budget for {} set to {}",
            theme::success("✓ Added!"),
            theme::header(target),
            theme::good(format_cents(budget.amount))
        ),
        BudgetOutcome::Updated { old, new } => println!(
            "{} {target}: {} -> {}",
            theme::success("✓ Updated!"),
            theme::dim(format_cents(old)),
            theme::good(format_cents(new))
        ),
        BudgetOutcome::Cancelled => println!("{}", theme::dim("Operation cancelled.")),
    }
    Ok(())
}

fn generate(db: &mut Database, year: i32, force: bool, yes: bool) -> Result<()> {
    println!(
        "Analyzing spending history to generate budgets for {}...",
        theme::header(year.to_string())
    );

    let suggestions = suggest::generate_suggestions(db, year, force)?;
    if suggestions.is_empty() {
        println!(
            "{}",
            theme::warning(&format!("No suggestions found for {year}."))
        );
        return Ok(());
    }

    println!("{}", render::suggestions(year, &suggestions));

    if !yes && !super::confirm("Save these budgets?")? {
        println!("{}", theme::dim("Operation cancelled."));
        return Ok(());
    }

    let count = suggest::apply(db, &suggestions)?;
    println!(
        "{}",
        theme::success(&format!("Successfully saved {count} budgets."))
    );
    Ok(())
}

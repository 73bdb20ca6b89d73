//! Budget and transaction bookkeeping behind the CLI commands.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{Budget, Category, Transaction};
use crate::money::to_cents;

pub(crate) const DEFAULT_DAY_WINDOW: u32 = 7;

/// What `set_budget` did to the (year, month) slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BudgetOutcome {
    Created(Budget),
    Updated { old: i64, new: i64 },
    Cancelled,
}

/// Sets the budget for one month. When the slot already has a budget,
/// `confirm_overwrite` is asked first and can cancel the change.
pub(crate) fn set_budget<F>(
    db: &Database,
    amount: i64,
    month: u32,
    year: i32,
    confirm_overwrite: F,
) -> Result<BudgetOutcome>
where
    F: FnOnce(&Budget) -> Result<bool>,
{
    match db.budget_for(year, month)? {
        Some(existing) => {
            if !confirm_overwrite(&existing)? {
                return Ok(BudgetOutcome::Cancelled);
            }
            let id = existing
                .id
                .context("Stored budget is missing its id")?;
            db.update_budget_amount(id, amount)?;
            tracing::info!(year, month, old = existing.amount, new = amount, "budget updated");
            Ok(BudgetOutcome::Updated {
                old: existing.amount,
                new: amount,
            })
        }
        None => {
            let mut budget = Budget::new(amount, month, year);
            budget.id = Some(db.insert_budget(&budget)?);
            tracing::info!(year, month, amount, "budget created");
            Ok(BudgetOutcome::Created(budget))
        }
    }
}

/// The months of `year` with their budget, skipping `offset` months and
/// returning at most `limit`.
pub(crate) fn budget_slots(
    db: &Database,
    year: i32,
    offset: usize,
    limit: usize,
) -> Result<Vec<(u32, Option<Budget>)>> {
    let mut budgets = db.budgets_for_year(year)?;
    Ok((1..=12)
        .map(|month| {
            let pos = budgets.iter().position(|b| b.target_month == month);
            (month, pos.map(|i| budgets.swap_remove(i)))
        })
        .skip(offset)
        .take(limit)
        .collect())
}

/// Records a manually entered expense given in major units.
pub(crate) fn record_transaction(
    db: &Database,
    amount: Decimal,
    entry_date: NaiveDate,
    receiver: Option<String>,
    description: Option<String>,
) -> Result<Transaction> {
    let cents = to_cents(amount)?;
    if cents <= 0 {
        anyhow::bail!("Amount must be positive, got {amount}");
    }

    let mut txn = Transaction::new(cents, entry_date);
    if let Some(receiver) = receiver.filter(|r| !r.trim().is_empty()) {
        txn = txn.with_receiver(receiver);
    }
    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        txn = txn.with_description(description);
    }
    let id = db.insert_transaction(&txn)?;
    db.get_transaction(id)?
        .with_context(|| format!("Transaction #{id} vanished after insert"))
}

/// `limit` consecutive days ending `offset` days before `today`, oldest
/// first, each paired with that day's transactions.
pub(crate) fn daily_transactions(
    db: &Database,
    today: NaiveDate,
    offset: u32,
    limit: u32,
) -> Result<Vec<(NaiveDate, Vec<Transaction>)>> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let last = today
        .checked_sub_days(Days::new(u64::from(offset)))
        .context("Offset reaches before the start of the calendar")?;
    let first = last
        .checked_sub_days(Days::new(u64::from(limit - 1)))
        .context("Window reaches before the start of the calendar")?;
    let end = last
        .succ_opt()
        .context("Window reaches past the end of the calendar")?;

    let mut transactions = db.transactions_between(first, end)?.into_iter().peekable();
    let mut days = Vec::with_capacity(limit as usize);
    for day in first.iter_days().take(limit as usize) {
        let mut on_day = Vec::new();
        while let Some(t) = transactions.next_if(|t| t.entry_date == day) {
            on_day.push(t);
        }
        days.push((day, on_day));
    }
    Ok(days)
}

/// Adds a category, refusing names that already exist in any letter case.
pub(crate) fn add_category(db: &Database, name: &str, color: &str) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Category name cannot be empty");
    }
    if Category::find_by_name(&db.get_categories()?, name).is_some() {
        anyhow::bail!("Category '{name}' already exists");
    }
    let mut category = Category::new(name.to_string(), color.to_string());
    category.id = Some(db.insert_category(&category)?);
    Ok(category)
}

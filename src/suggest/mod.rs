//! Budget suggestions from spending history.
//!
//! A month's suggestion averages two signals: the median monthly total over
//! the six calendar months before it (trend) and the median of the same
//! month's totals in the three previous years (seasonal).

pub(crate) mod stats;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap};

use crate::calendar;
use crate::db::Database;
use crate::models::Budget;

const TREND_MONTHS: u32 = 6;
const SEASONAL_YEARS: i32 = 3;

/// A proposed budget for one (year, month), with whatever budget already
/// occupies that slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Suggestion {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) month_name: &'static str,
    pub(crate) amount: i64,
    pub(crate) existing: Option<Budget>,
}

/// Sums transaction amounts in `[start, end)` per calendar (year, month).
pub(crate) fn monthly_totals(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<(i32, u32), i64>> {
    let mut totals = BTreeMap::new();
    for txn in db.transactions_between(start, end)? {
        *totals.entry(calendar::year_month(txn.entry_date)).or_insert(0) += txn.amount;
    }
    Ok(totals)
}

/// Median monthly total over the six months before the target month.
pub(crate) fn trend(db: &Database, year: i32, month: u32) -> Result<Option<Decimal>> {
    let (start_year, start_month) = calendar::months_back(year, month, TREND_MONTHS);
    let Some(trend_start) = calendar::first_of_month(start_year, start_month) else {
        return Ok(None);
    };
    let Some(target_date) = calendar::first_of_month(year, month) else {
        return Ok(None);
    };

    let totals = monthly_totals(db, trend_start, target_date)?;
    let values: Vec<i64> = totals.into_values().collect();
    Ok(stats::median(&values))
}

/// Median of the target month's totals across the three previous years.
pub(crate) fn seasonal(db: &Database, year: i32, month: u32) -> Result<Option<Decimal>> {
    let mut values = Vec::new();
    for offset in 1..=SEASONAL_YEARS {
        let Some((start, end)) = calendar::month_range(year - offset, month) else {
            continue;
        };
        values.extend(monthly_totals(db, start, end)?.into_values());
    }
    Ok(stats::median(&values))
}

/// Mean of the available signals in cents, rounded half to even. Zero when
/// there is no signal at all.
pub(crate) fn combine(trend: Option<Decimal>, seasonal: Option<Decimal>) -> i64 {
    let signals: Vec<Decimal> = [trend, seasonal].into_iter().flatten().collect();
    stats::mean(&signals)
        .map(|m| m.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
        .and_then(|m| m.to_i64())
        .unwrap_or(0)
}

/// Suggested budget for one month, or zero when history is empty.
pub(crate) fn suggest_amount(db: &Database, year: i32, month: u32) -> Result<i64> {
    let trend_value = trend(db, year, month)?;
    let seasonal_value = seasonal(db, year, month)?;
    let amount = combine(trend_value, seasonal_value);
    tracing::debug!(
        year,
        month,
        trend = ?trend_value,
        seasonal = ?seasonal_value,
        amount,
        "computed budget suggestion"
    );
    Ok(amount)
}

/// Suggestions for the months of `year` in ascending order. Months that
/// already have a budget are left alone unless `force` is set; months without
/// any history produce nothing.
pub(crate) fn generate_suggestions(db: &Database, year: i32, force: bool) -> Result<Vec<Suggestion>> {
    let existing: HashMap<u32, Budget> = db
        .budgets_for_year(year)
        .with_context(|| format!("Failed to load budgets for {year}"))?
        .into_iter()
        .map(|b| (b.target_month, b))
        .collect();

    let mut suggestions = Vec::new();
    for month in 1..=12 {
        let current = existing.get(&month);
        if current.is_some() && !force {
            tracing::debug!(year, month, "budget exists, skipping");
            continue;
        }

        let amount = suggest_amount(db, year, month)?;
        if amount <= 0 {
            tracing::debug!(year, month, "no spending history, skipping");
            continue;
        }

        suggestions.push(Suggestion {
            year,
            month,
            month_name: calendar::month_name(month),
            amount,
            existing: current.cloned(),
        });
    }

    tracing::info!(year, force, count = suggestions.len(), "generated budget suggestions");
    Ok(suggestions)
}

/// Persists suggestions as one unit: existing budgets are updated, the rest
/// inserted. Returns the number of budgets written.
pub(crate) fn apply(db: &mut Database, suggestions: &[Suggestion]) -> Result<usize> {
    let budgets: Vec<Budget> = suggestions
        .iter()
        .map(|s| Budget {
            id: s.existing.as_ref().and_then(|b| b.id),
            amount: s.amount,
            target_month: s.month,
            target_year: s.year,
        })
        .collect();

    let count = db
        .upsert_budgets_batch(&budgets)
        .context("Budget suggestions were not saved")?;
    tracing::info!(count, "saved budget suggestions");
    Ok(count)
}

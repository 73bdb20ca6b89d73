//! Read-only analytics over the ledger.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::calendar;
use crate::db::Database;
use crate::models::{Budget, Transaction};
use crate::suggest::stats;

const OUTLIER_COUNT: usize = 5;

#[derive(Debug, Clone)]
pub(crate) struct MonthStatus {
    pub(crate) year: i32,
    pub(crate) month_name: &'static str,
    pub(crate) budget: Option<Budget>,
    pub(crate) total_spent: i64,
}

impl MonthStatus {
    /// Budget minus spending; negative when over budget.
    pub(crate) fn remaining(&self) -> Option<i64> {
        self.budget.as_ref().map(|b| b.amount - self.total_spent)
    }
}

/// End-of-month projection from the spending pace so far. Amounts in cents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Forecast {
    pub(crate) avg_per_day: Decimal,
    pub(crate) projected_total: Decimal,
    pub(crate) projected_overage: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub(crate) struct MonthlyReport {
    pub(crate) status: MonthStatus,
    pub(crate) forecast: Option<Forecast>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WeekdaySpending {
    pub(crate) weekday: Weekday,
    pub(crate) count: usize,
    pub(crate) total: i64,
    pub(crate) average: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Volatility {
    Low,
    Moderate,
    High,
}

impl Volatility {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low Volatility",
            Self::Moderate => "Moderate Volatility",
            Self::High => "High Volatility",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct VolatilityReport {
    pub(crate) count: usize,
    pub(crate) mean: Decimal,
    pub(crate) stdev: f64,
    pub(crate) outliers: Vec<Transaction>,
}

impl VolatilityReport {
    /// Coefficient of variation, stdev relative to the mean.
    pub(crate) fn coefficient_of_variation(&self) -> f64 {
        let mean = self.mean.to_f64().unwrap_or(0.0);
        if mean == 0.0 {
            0.0
        } else {
            self.stdev / mean
        }
    }

    pub(crate) fn level(&self) -> Volatility {
        let cv = self.coefficient_of_variation();
        if cv > 1.5 {
            Volatility::High
        } else if cv < 0.5 {
            Volatility::Low
        } else {
            Volatility::Moderate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PayeeSummary {
    pub(crate) name: String,
    pub(crate) count: usize,
    pub(crate) total: i64,
    pub(crate) average: i64,
}

fn month_status(db: &Database, year: i32, month: u32) -> Result<MonthStatus> {
    let total_spent = match calendar::month_range(year, month) {
        Some((start, end)) => db.total_spent_between(start, end)?,
        None => 0,
    };
    Ok(MonthStatus {
        year,
        month_name: calendar::month_name(month),
        budget: db.budget_for(year, month)?,
        total_spent,
    })
}

/// Budget and spending for each month of `year`.
pub(crate) fn yearly_report(db: &Database, year: i32) -> Result<Vec<MonthStatus>> {
    (1..=12).map(|month| month_status(db, year, month)).collect()
}

/// Budget status for one month. When `today` falls inside that month the
/// report also projects month-end spending from the daily average so far.
pub(crate) fn monthly_report(
    db: &Database,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthlyReport> {
    let status = month_status(db, year, month)?;
    let forecast = (today.year() == year && today.month() == month)
        .then(|| forecast(&status, today.day(), calendar::days_in_month(year, month)));
    Ok(MonthlyReport { status, forecast })
}

fn forecast(status: &MonthStatus, days_passed: u32, days_in_month: u32) -> Forecast {
    let avg_per_day = Decimal::from(status.total_spent) / Decimal::from(days_passed.max(1));
    let projected_total = avg_per_day * Decimal::from(days_in_month);
    let projected_overage = status
        .budget
        .as_ref()
        .map(|b| projected_total - Decimal::from(b.amount));
    Forecast {
        avg_per_day,
        projected_total,
        projected_overage,
    }
}

/// Spending per day of the week, Monday first. Empty when there are no
/// transactions at all.
pub(crate) fn weekday_report(db: &Database) -> Result<Vec<WeekdaySpending>> {
    let transactions = db.all_transactions()?;
    if transactions.is_empty() {
        return Ok(Vec::new());
    }

    let mut buckets: HashMap<Weekday, Vec<i64>> = HashMap::new();
    for t in &transactions {
        buckets.entry(t.entry_date.weekday()).or_default().push(t.amount);
    }

    let days = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    Ok(days
        .into_iter()
        .map(|weekday| {
            let amounts = buckets.remove(&weekday).unwrap_or_default();
            let total: i64 = amounts.iter().sum();
            let average = if amounts.is_empty() {
                Decimal::ZERO
            } else {
                Decimal::from(total) / Decimal::from(amounts.len())
            };
            WeekdaySpending {
                weekday,
                count: amounts.len(),
                total,
                average,
            }
        })
        .collect())
}

/// Spread of transaction amounts for one year or all time, with the largest
/// transactions as outliers. `None` when there is nothing to analyze.
pub(crate) fn volatility_report(db: &Database, year: Option<i32>) -> Result<Option<VolatilityReport>> {
    let range = year.and_then(calendar::year_range);
    let transactions = db.transactions_by_amount(range)?;
    if transactions.is_empty() {
        return Ok(None);
    }

    let amounts: Vec<i64> = transactions.iter().map(|t| t.amount).collect();
    let total: i64 = amounts.iter().sum();
    Ok(Some(VolatilityReport {
        count: amounts.len(),
        mean: Decimal::from(total) / Decimal::from(amounts.len()),
        stdev: stats::sample_stdev(&amounts),
        outliers: transactions.into_iter().take(OUTLIER_COUNT).collect(),
    }))
}

/// Payees ranked by total spending, highest first.
pub(crate) fn top_payees(db: &Database, year: Option<i32>, limit: usize) -> Result<Vec<PayeeSummary>> {
    let transactions = match year.and_then(calendar::year_range) {
        Some((start, end)) => db.transactions_between(start, end)?,
        None => db.all_transactions()?,
    };

    let mut grouped: HashMap<String, Vec<i64>> = HashMap::new();
    for t in &transactions {
        grouped.entry(t.payee_name()).or_default().push(t.amount);
    }

    let mut summary: Vec<PayeeSummary> = grouped
        .into_iter()
        .map(|(name, amounts)| {
            let total: i64 = amounts.iter().sum();
            let count = amounts.len();
            PayeeSummary {
                name,
                count,
                total,
                average: total / count as i64,
            }
        })
        .collect();

    summary.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    summary.truncate(limit);
    Ok(summary)
}

#[cfg(test)]
mod tests;

//! Plain-text tables for the CLI. Every function returns the finished table so
//! callers decide where it goes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::theme;
use super::util::{fit, format_amount, format_cents};
use crate::calendar;
use crate::models::{Budget, Category, CategoryRule, Transaction};
use crate::reports::{
    MonthStatus, MonthlyReport, PayeeSummary, Volatility, VolatilityReport, WeekdaySpending,
};
use crate::suggest::Suggestion;

fn rule(width: usize) -> String {
    theme::dim("─".repeat(width)).to_string()
}

fn budget_cell(budget: Option<&Budget>) -> String {
    budget.map_or_else(|| "-".to_string(), |b| format_cents(b.amount))
}

// ── Budgets ──────────────────────────────────────────────────

/// Month / Current / Suggested preview shown before suggestions are saved.
pub(crate) fn suggestions(year: i32, items: &[Suggestion]) -> String {
    let mut lines = vec![
        theme::title(format!("Suggested Budgets ({year})")).to_string(),
        theme::header(format!("{:<12} {:>14} {:>14}", "Month", "Current", "Suggested")).to_string(),
        rule(42),
    ];
    for s in items {
        lines.push(format!(
            "{:<12} {} {}",
            s.month_name,
            theme::dim(format!("{:>14}", budget_cell(s.existing.as_ref()))),
            theme::good(format!("{:>14}", format_cents(s.amount))),
        ));
    }
    lines.join("\n")
}

pub(crate) fn budget_list(year: i32, slots: &[(u32, Option<Budget>)]) -> String {
    let mut lines = vec![
        theme::title(format!("Budgets for {year}")).to_string(),
        theme::header(format!("{:<12} {:>14}", "Month", "Amount")).to_string(),
        rule(27),
    ];
    for (month, budget) in slots {
        let amount = format!("{:>14}", budget_cell(budget.as_ref()));
        let amount = match budget {
            Some(_) => theme::good(amount),
            None => theme::dim(amount),
        };
        lines.push(format!("{:<12} {amount}", calendar::month_name(*month)));
    }
    lines.join("\n")
}

// ── Reports ──────────────────────────────────────────────────

fn remaining_cell(status: &MonthStatus) -> String {
    match status.remaining() {
        Some(left) if left < 0 => theme::bad(format!("{:>14}", format_cents(left))).to_string(),
        Some(left) => theme::good(format!("{:>14}", format_cents(left))).to_string(),
        None => theme::dim(format!("{:>14}", "-")).to_string(),
    }
}

pub(crate) fn year_report(year: i32, months: &[MonthStatus]) -> String {
    let mut lines = vec![
        theme::title(format!("Budget Report {year}")).to_string(),
        theme::header(format!(
            "{:<12} {:>14} {:>14} {:>14}",
            "Month", "Budget", "Spent", "Remaining"
        ))
        .to_string(),
        rule(57),
    ];
    for m in months {
        lines.push(format!(
            "{:<12} {:>14} {:>14} {}",
            m.month_name,
            budget_cell(m.budget.as_ref()),
            format_cents(m.total_spent),
            remaining_cell(m),
        ));
    }
    let spent: i64 = months.iter().map(|m| m.total_spent).sum();
    let budgeted: i64 = months.iter().filter_map(|m| m.budget.as_ref()).map(|b| b.amount).sum();
    lines.push(rule(57));
    lines.push(format!(
        "{:<12} {:>14} {:>14}",
        "Total",
        format_cents(budgeted),
        format_cents(spent)
    ));
    lines.join("\n")
}

pub(crate) fn month_report(report: &MonthlyReport) -> String {
    let status = &report.status;
    let mut lines = vec![
        theme::title(format!("{} {}", status.month_name, status.year)).to_string(),
        format!("{:<20} {:>14}", "Budget:", budget_cell(status.budget.as_ref())),
        format!("{:<20} {:>14}", "Spent:", format_cents(status.total_spent)),
        format!("{:<20} {}", "Remaining:", remaining_cell(status)),
    ];

    match &report.forecast {
        Some(forecast) => {
            lines.push(String::new());
            lines.push(theme::header("Forecast").to_string());
            lines.push(format!(
                "{:<20} {:>14}",
                "Average per day:",
                format_amount(forecast.avg_per_day / Decimal::ONE_HUNDRED)
            ));
            lines.push(format!(
                "{:<20} {:>14}",
                "Projected total:",
                format_amount(forecast.projected_total / Decimal::ONE_HUNDRED)
            ));
            if let Some(overage) = forecast.projected_overage {
                let text = format!("{:>14}", format_amount(overage / Decimal::ONE_HUNDRED));
                let cell = if overage > Decimal::ZERO {
                    theme::bad(text)
                } else {
                    theme::good(text)
                };
                lines.push(format!("{:<20} {cell}", "Projected overage:"));
            }
        }
        None => {
            if status.budget.is_none() {
                lines.push(theme::warning("No budget set for this month.").to_string());
            }
        }
    }
    lines.join("\n")
}

pub(crate) fn weekday_report(days: &[WeekdaySpending]) -> String {
    let mut lines = vec![
        theme::title("Spending by Weekday").to_string(),
        theme::header(format!(
            "{:<12} {:>8} {:>14} {:>14}",
            "Day", "Count", "Average", "Total"
        ))
        .to_string(),
        rule(51),
    ];
    for d in days {
        lines.push(format!(
            "{:<12} {:>8} {:>14} {:>14}",
            calendar::weekday_name(d.weekday),
            d.count,
            format_amount(d.average / Decimal::ONE_HUNDRED),
            format_cents(d.total),
        ));
    }
    let total: i64 = days.iter().map(|d| d.total).sum();
    lines.push(rule(51));
    lines.push(format!("{:<12} {:>8} {:>14} {:>14}", "Total", "", "", format_cents(total)));
    lines.join("\n")
}

pub(crate) fn volatility_report(label: &str, report: &VolatilityReport) -> String {
    let level = report.level();
    let verdict = match level {
        Volatility::High => theme::bad(level.as_str()),
        Volatility::Moderate => theme::caution(level.as_str()),
        Volatility::Low => theme::good(level.as_str()),
    };
    let stdev = Decimal::try_from(report.stdev).unwrap_or_default();
    let lines = vec![
        theme::title(format!("Spending Volatility ({label})")).to_string(),
        format!("{:<22} {:>14}", "Transactions:", report.count),
        format!(
            "{:<22} {:>14}",
            "Average Amount:",
            format_amount(report.mean / Decimal::ONE_HUNDRED)
        ),
        format!(
            "{:<22} {:>14}",
            "Standard Deviation:",
            format_amount(stdev / Decimal::ONE_HUNDRED)
        ),
        format!(
            "{:<22} {:>14.2}",
            "Variation (cv):",
            report.coefficient_of_variation()
        ),
        format!("{:<22} {verdict}", "Verdict:"),
        String::new(),
        transaction_list("Largest Transactions", &report.outliers),
    ];
    lines.join("\n")
}

pub(crate) fn payee_ranking(payees: &[PayeeSummary]) -> String {
    let mut lines = vec![
        theme::title("Top Payees").to_string(),
        theme::header(format!(
            "{:<4} {:<30} {:>6} {:>14} {:>14}",
            "#", "Payee", "Count", "Total", "Average"
        ))
        .to_string(),
        rule(72),
    ];
    for (rank, p) in payees.iter().enumerate() {
        lines.push(format!(
            "{:<4} {} {:>6} {:>14} {:>14}",
            rank + 1,
            fit(&p.name, 30),
            p.count,
            format_cents(p.total),
            format_cents(p.average),
        ));
    }
    lines.join("\n")
}

// ── Transactions ─────────────────────────────────────────────

/// Flat list of transactions, for search results and outliers.
pub(crate) fn transaction_list(title: &str, transactions: &[Transaction]) -> String {
    let mut lines = vec![
        theme::title(title).to_string(),
        theme::header(format!(
            "{:<14} {:<24} {:<30} {:>14}",
            "Date", "Receiver", "Description", "Amount"
        ))
        .to_string(),
        rule(85),
    ];
    for t in transactions {
        lines.push(format!(
            "{:<14} {} {} {}",
            t.entry_date.format("%b %d, %Y"),
            fit(t.receiver.as_deref().unwrap_or("-"), 24),
            theme::dim(fit(t.description.as_deref().unwrap_or(""), 30)),
            theme::bad(format!("{:>14}", format_cents(t.amount))),
        ));
    }
    let total: i64 = transactions.iter().map(|t| t.amount).sum();
    lines.push(rule(85));
    lines.push(format!("{:<70} {:>14}", "Total", format_cents(total)));
    lines.join("\n")
}

/// Transactions grouped by day, with the category each one was filed under.
pub(crate) fn daily_transactions(
    days: &[(NaiveDate, Vec<Transaction>)],
    categories: &[Category],
) -> String {
    let mut lines = vec![
        theme::title("Transaction History").to_string(),
        theme::header(format!(
            "{:>6} {:<8} {:<40} {:<16} {:>14}",
            "ID", "Date", "Receiver / Description", "Category", "Amount"
        ))
        .to_string(),
        rule(88),
    ];
    for (day, transactions) in days {
        let date = day.format("%b %d").to_string();
        if transactions.is_empty() {
            lines.push(format!(
                "{:>6} {date:<8} {}",
                "-",
                theme::dim("Nothing to show")
            ));
            continue;
        }
        for t in transactions {
            let details = match (&t.receiver, &t.description) {
                (Some(r), Some(d)) => format!("{r} · {d}"),
                (Some(r), None) => r.clone(),
                (None, Some(d)) => d.clone(),
                (None, None) => "-".to_string(),
            };
            let category = t
                .category_id
                .and_then(|id| Category::find_by_id(categories, id))
                .map_or("-", |c| c.name.as_str());
            lines.push(format!(
                "{:>6} {date:<8} {} {} {}",
                t.id.unwrap_or(0),
                fit(&details, 40),
                fit(category, 16),
                theme::good(format!("{:>14}", format_cents(t.amount))),
            ));
        }
    }
    let total: i64 = days.iter().flat_map(|(_, ts)| ts).map(|t| t.amount).sum();
    lines.push(rule(88));
    lines.push(format!("{:<73} {:>14}", "Page Total", format_cents(total)));
    lines.join("\n")
}

// ── Categories ───────────────────────────────────────────────

pub(crate) fn category_list(categories: &[Category]) -> String {
    let mut lines = vec![
        theme::header(format!("{:>4} {:<24} {}", "ID", "Name", "Color")).to_string(),
        rule(40),
    ];
    for c in categories {
        lines.push(format!("{:>4} {:<24} {}", c.id.unwrap_or(0), c.name, c.color));
    }
    lines.join("\n")
}

pub(crate) fn rule_list(rules: &[(CategoryRule, String)]) -> String {
    let mut lines = vec![
        theme::header(format!(
            "{:>4} {:<30} {:<8} {}",
            "ID", "Pattern", "Kind", "Category"
        ))
        .to_string(),
        rule(60),
    ];
    for (r, category) in rules {
        let kind = if r.is_regex { "regex" } else { "keyword" };
        lines.push(format!(
            "{:>4} {} {kind:<8} {category} (#{})",
            r.id.unwrap_or(0),
            fit(&r.pattern, 30),
            r.category_id,
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::BankProfile;
use crate::money::to_cents;
use crate::models::Transaction;

struct ColumnMap {
    date: usize,
    amount: usize,
    debit_credit: usize,
    payee: Option<usize>,
    description: Option<usize>,
}

/// Reads a bank statement and returns its debit rows as expenses in cents.
///
/// Rows that are credits, or whose date or amount cannot be parsed, are
/// dropped. A header row missing any required column is an error.
pub(crate) fn read_statement(path: &Path, profile: &BankProfile) -> Result<Vec<Transaction>> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(profile.delimiter)
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let columns = map_columns(&headers, profile)?;

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV record {}", i + 1))?;
        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

        if cell(columns.debit_credit).to_uppercase() != profile.debit_marker {
            continue;
        }

        let Some(entry_date) = parse_date(cell(columns.date), profile.date_format) else {
            tracing::debug!(row = i + 1, "dropping row with unparseable date");
            continue;
        };
        let amount = match parse_cents(cell(columns.amount), profile.decimal_separator) {
            Ok(cents) if cents > 0 => cents,
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!(row = i + 1, %err, "dropping row with unparseable amount");
                continue;
            }
        };

        let optional = |idx: Option<usize>| {
            idx.map(cell)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        transactions.push(Transaction {
            id: None,
            amount,
            entry_date,
            receiver: optional(columns.payee),
            description: optional(columns.description),
            category_id: None,
        });
    }

    Ok(transactions)
}

fn map_columns(headers: &[String], profile: &BankProfile) -> Result<ColumnMap> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<&str> = profile
        .required_columns()
        .into_iter()
        .filter(|c| find(*c).is_none())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("CSV missing required columns: {}", missing.join(", "));
    }

    Ok(ColumnMap {
        date: find(profile.date_column).unwrap_or_default(),
        amount: find(profile.amount_column).unwrap_or_default(),
        debit_credit: find(profile.debit_credit_column).unwrap_or_default(),
        payee: profile.payee_column.and_then(find),
        description: profile.description_column.and_then(find),
    })
}

fn parse_date(s: &str, fmt: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, fmt).ok()
}

/// Parses a bank amount into absolute cents, rounding half away from zero.
///
/// The other separator is only accepted as a thousands separator between
/// groups of exactly three digits, so `12.50` under a decimal comma fails
/// instead of reading as 1250.
fn parse_cents(s: &str, decimal_separator: char) -> Result<i64> {
    let thousands_separator = if decimal_separator == ',' { '.' } else { ',' };
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.is_empty() {
        anyhow::bail!("empty amount");
    }

    let (whole, fraction) = match compact.split_once(decimal_separator) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (compact.as_str(), None),
    };
    let well_grouped = whole
        .split(thousands_separator)
        .skip(1)
        .all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()));
    if !well_grouped {
        anyhow::bail!("Misplaced '{thousands_separator}' in amount '{s}'");
    }

    let digits = whole.replace(thousands_separator, "");
    let normalized = match fraction {
        Some(fraction) => format!("{digits}.{fraction}"),
        None => digits,
    };
    let value = Decimal::from_str(&normalized)
        .with_context(|| format!("Failed to parse '{s}' as decimal"))?;
    to_cents(value.abs())
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;

mod bank;
mod csv_import;

use anyhow::{Context, Result};
use std::path::Path;

pub(crate) use bank::{Bank, BankProfile};
pub(crate) use csv_import::read_statement;

use crate::categorize::Categorizer;
use crate::db::Database;
use crate::models::Transaction;

/// Parses a bank statement, auto-categorizes it with the stored rules and,
/// unless `dry_run`, stores every parsed transaction in one batch.
pub(crate) fn import_transactions(
    db: &mut Database,
    bank: Bank,
    path: &Path,
    dry_run: bool,
) -> Result<Vec<Transaction>> {
    let mut transactions = read_statement(path, bank.profile())
        .with_context(|| format!("Error parsing {bank} statement {}", path.display()))?;
    tracing::info!(%bank, count = transactions.len(), "parsed statement");

    let rules = db.get_category_rules()?;
    let (categorizer, bad_patterns) = Categorizer::new(&rules);
    if !bad_patterns.is_empty() {
        tracing::warn!(patterns = ?bad_patterns, "invalid regex rules skipped");
    }
    if !categorizer.is_empty() {
        let categorized = categorizer.categorize_batch(&mut transactions);
        tracing::info!(categorized, "auto-categorized transactions");
    }

    if !dry_run && !transactions.is_empty() {
        db.insert_transactions_batch(&transactions)?;
    }
    Ok(transactions)
}

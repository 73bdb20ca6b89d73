mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

use crate::models::*;

const TRANSACTION_COLUMNS: &str = "id, amount, entry_date, receiver, description, category_id";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        conn.busy_timeout(Duration::from_secs(5))
            .context("Failed to set busy timeout")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "opened ledger database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            tracing::info!(version = schema::CURRENT_VERSION, "creating ledger schema");
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying schema migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO transactions (amount, entry_date, receiver, description, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    txn.amount,
                    txn.entry_date,
                    txn.receiver,
                    txn.description,
                    txn.category_id,
                ],
            )
            .context("Failed to insert transaction")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts every transaction or none of them.
    pub(crate) fn insert_transactions_batch(&mut self, txns: &[Transaction]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions (amount, entry_date, receiver, description, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for txn in txns {
                stmt.execute(params![
                    txn.amount,
                    txn.entry_date,
                    txn.receiver,
                    txn.description,
                    txn.category_id,
                ])?;
            }
        }
        tx.commit().context("Failed to commit imported transactions")?;
        Ok(txns.len())
    }

    pub(crate) fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![id], row_to_transaction)
            .optional()?)
    }

    /// Transactions with `start <= entry_date < end`, oldest first.
    pub(crate) fn transactions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE entry_date >= ?1 AND entry_date < ?2
             ORDER BY entry_date ASC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![start, end], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY entry_date ASC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Transactions in an optional half-open date range, largest amount first.
    pub(crate) fn transactions_by_amount(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Transaction>> {
        let rows = match range {
            Some((start, end)) => {
                let sql = format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM transactions
                     WHERE entry_date >= ?1 AND entry_date < ?2
                     ORDER BY amount DESC, id ASC"
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![start, end], row_to_transaction)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY amount DESC, id ASC"
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_transaction)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    /// Case-insensitive keyword search over receiver and description, newest first.
    pub(crate) fn search_transactions(&self, query: &str, limit: u32) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE receiver LIKE ?1 OR description LIKE ?1
             ORDER BY entry_date DESC, id DESC
             LIMIT ?2"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![format!("%{query}%"), limit], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Sum of amounts with `start <= entry_date < end`.
    pub(crate) fn total_spent_between(&self, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions
             WHERE entry_date >= ?1 AND entry_date < ?2",
            params![start, end],
            |row| row.get(0),
        )?)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn budgets_for_year(&self, year: i32) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, target_month, target_year FROM budgets
             WHERE target_year = ?1 ORDER BY target_month ASC",
        )?;
        let rows = stmt.query_map(params![year], row_to_budget)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn budget_for(&self, year: i32, month: u32) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, amount, target_month, target_year FROM budgets
                 WHERE target_year = ?1 AND target_month = ?2",
                params![year, month],
                row_to_budget,
            )
            .optional()?)
    }

    pub(crate) fn insert_budget(&self, budget: &Budget) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO budgets (amount, target_month, target_year) VALUES (?1, ?2, ?3)",
                params![budget.amount, budget.target_month, budget.target_year],
            )
            .with_context(|| {
                format!(
                    "Failed to insert budget for {}-{:02}",
                    budget.target_year, budget.target_month
                )
            })?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_budget_amount(&self, id: i64, amount: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE budgets SET amount = ?1 WHERE id = ?2",
            params![amount, id],
        )?;
        Ok(())
    }

    /// Writes a batch of budgets in one immediate transaction.
    ///
    /// Budgets carrying an id are updated in place; the rest, and any whose
    /// row has vanished in the meantime, are inserted, falling back to an
    /// update when another writer already owns the (year, month) slot. On
    /// error nothing of the batch is kept.
    pub(crate) fn upsert_budgets_batch(&mut self, budgets: &[Budget]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start budget transaction")?;
        for budget in budgets {
            let updated = match budget.id {
                Some(id) => tx.execute(
                    "UPDATE budgets SET amount = ?1 WHERE id = ?2",
                    params![budget.amount, id],
                )?,
                None => 0,
            };
            if updated == 0 {
                tx.execute(
                    "INSERT INTO budgets (amount, target_month, target_year) VALUES (?1, ?2, ?3)
                     ON CONFLICT(target_year, target_month) DO UPDATE SET amount = excluded.amount",
                    params![budget.amount, budget.target_month, budget.target_year],
                )
                .with_context(|| {
                    format!(
                        "Failed to write budget for {}-{:02}",
                        budget.target_year, budget.target_month
                    )
                })?;
            }
        }
        tx.commit().context("Failed to commit budgets")?;
        Ok(budgets.len())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                color: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO categories (name, color) VALUES (?1, ?2)",
                params![cat.name, cat.color],
            )
            .with_context(|| format!("Failed to add category '{}'", cat.name))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns false when no category had that id.
    pub(crate) fn delete_category(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // ── Category Rules ────────────────────────────────────────

    pub(crate) fn get_category_rules(&self) -> Result<Vec<CategoryRule>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, pattern, category_id, is_regex FROM category_rules ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryRule {
                id: Some(row.get(0)?),
                pattern: row.get(1)?,
                category_id: row.get(2)?,
                is_regex: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Rules paired with the name of the category they assign.
    pub(crate) fn get_category_rules_named(&self) -> Result<Vec<(CategoryRule, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.pattern, r.category_id, r.is_regex, c.name
             FROM category_rules r JOIN categories c ON r.category_id = c.id
             ORDER BY r.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                CategoryRule {
                    id: Some(row.get(0)?),
                    pattern: row.get(1)?,
                    category_id: row.get(2)?,
                    is_regex: row.get(3)?,
                },
                row.get(4)?,
            ))
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_category_rule(&self, rule: &CategoryRule) -> Result<i64> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            params![rule.category_id],
            |row| row.get(0),
        )?;
        if !exists {
            anyhow::bail!("Category #{} not found", rule.category_id);
        }
        self.conn.execute(
            "INSERT INTO category_rules (pattern, category_id, is_regex) VALUES (?1, ?2, ?3)",
            params![rule.pattern, rule.category_id, rule.is_regex],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns false when no rule had that id.
    pub(crate) fn delete_category_rule(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM category_rules WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        amount: row.get(1)?,
        entry_date: row.get(2)?,
        receiver: row.get(3)?,
        description: row.get(4)?,
        category_id: row.get(5)?,
    })
}

fn row_to_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: Some(row.get(0)?),
        amount: row.get(1)?,
        target_month: row.get(2)?,
        target_year: row.get(3)?,
    })
}

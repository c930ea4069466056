mod schema;

pub(crate) mod ledgers;
pub(crate) mod profiles;
pub(crate) mod templates;

use anyhow::Context;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Category, MonthKey};

/// How long a writer waits for another writer's lock before giving up with
/// a transaction conflict.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Self::open_with_timeout(path, BUSY_TIMEOUT)
    }

    /// Like [`Database::open`], but waiting `busy_timeout` for another
    /// writer's lock before reporting a transaction conflict.
    pub fn open_with_timeout(path: &Path, busy_timeout: Duration) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.busy_timeout(busy_timeout)
            .context("Failed to set busy timeout")?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Bring the schema up to `CURRENT_VERSION` under the write lock, so two
    /// processes opening a fresh file cannot both create it.
    fn migrate(&mut self) -> rusqlite::Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match stored_version(&tx)? {
            None => {
                tx.execute_batch(schema::SCHEMA_V1)?;
                tx.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(version) if version < schema::CURRENT_VERSION => {
                let pending = schema::MIGRATIONS
                    .iter()
                    .filter(|(from_version, _)| version <= *from_version);
                for &(_, sql) in pending {
                    tx.execute_batch(sql)?;
                }
                tx.execute(
                    "UPDATE schema_version SET version = ?1",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(_) => {}
        }
        tx.commit()
    }

    /// Plain connection for read-only queries.
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside one `BEGIN IMMEDIATE` transaction. The write lock is taken
    /// up front so concurrent read-modify-write cycles serialize instead of
    /// losing updates. Any error from `f` rolls the whole transaction back.
    pub(crate) fn write<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let out = f(&*tx)?;
        tx.commit()?;
        Ok(out)
    }
}

/// `None` for a database that has never been migrated.
fn stored_version(conn: &Connection) -> rusqlite::Result<Option<i32>> {
    let has_version_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_version_table {
        return Ok(None);
    }
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .optional()?;
    Ok(Some(version.unwrap_or(0)))
}

// ── Column helpers ────────────────────────────────────────────

pub(crate) fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

pub(crate) fn category_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Category> {
    let raw: String = row.get(idx)?;
    Category::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown category '{raw}'").into(),
        )
    })
}

pub(crate) fn month_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<MonthKey> {
    let raw: String = row.get(idx)?;
    MonthKey::parse(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

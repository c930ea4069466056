use rusqlite::Connection;
use tracing::{debug, info};

use super::template_store;
use crate::db::{self, ledgers, Database};
use crate::error::{BudgetError, Entity, Result};
use crate::models::{Excess, MonthKey, MonthlyLedger};

/// Monthly ledgers, materialized from the template the first time a month is opened.
pub struct LedgerStore<'a> {
    db: &'a Database,
}

impl<'a> LedgerStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Return the month's ledger, creating it from the template if it has
    /// never been opened. Repeated and concurrent calls converge on the one
    /// stored ledger: creation is an insert-if-absent under the write lock.
    pub fn get_or_create(&self, template_id: &str, month: MonthKey) -> Result<MonthlyLedger> {
        if let Some(existing) = ledgers::get(self.db.conn(), template_id, &month)? {
            return Ok(existing);
        }
        self.db.write(|conn| materialize_in(conn, template_id, month))
    }

    /// An already-materialized ledger.
    pub fn get(&self, template_id: &str, month: MonthKey) -> Result<MonthlyLedger> {
        get_in(self.db.conn(), template_id, &month)
    }

    /// Every materialized ledger for the template, newest month first.
    pub fn list(&self, template_id: &str) -> Result<Vec<MonthlyLedger>> {
        Ok(ledgers::list(self.db.conn(), template_id)?)
    }
}

pub(crate) fn get_in(conn: &Connection, template_id: &str, month: &MonthKey) -> Result<MonthlyLedger> {
    ledgers::get(conn, template_id, month)?
        .ok_or_else(|| BudgetError::not_found(Entity::Ledger, format!("{template_id}/{month}")))
}

pub(crate) fn materialize_in(
    conn: &Connection,
    template_id: &str,
    month: MonthKey,
) -> Result<MonthlyLedger> {
    let template = template_store::get_in(conn, template_id)?;
    let allocations = template.recurring.clone();
    let excess = Excess::compute(template.net_monthly_income, &template.split, &allocations)?;
    let ledger = MonthlyLedger {
        template_id: template.id,
        month,
        net_monthly_income: template.net_monthly_income,
        split: template.split,
        allocations,
        excess,
        created_at: db::now_rfc3339(),
    };

    if ledgers::insert_if_absent(conn, &ledger)? {
        info!(
            template_id,
            %month,
            seeded = ledger.allocations.len(),
            "Opened new monthly ledger"
        );
        Ok(ledger)
    } else {
        // another writer got there first; theirs is the ledger
        debug!(template_id, %month, "Ledger already materialized");
        get_in(conn, template_id, &month)
    }
}

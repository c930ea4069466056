use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{category_at, decimal_at, month_at};
use crate::models::{Allocation, AllocationId, Excess, MonthKey, MonthlyLedger, Split};

const LEDGER_COLUMNS: &str = "template_id, month_key, net_monthly_income, need_pct, want_pct, save_pct,
     excess_need, excess_want, excess_save, created_at";

fn ledger_from_row(row: &Row<'_>) -> rusqlite::Result<MonthlyLedger> {
    Ok(MonthlyLedger {
        template_id: row.get(0)?,
        month: month_at(row, 1)?,
        net_monthly_income: decimal_at(row, 2)?,
        split: Split::new(decimal_at(row, 3)?, decimal_at(row, 4)?, decimal_at(row, 5)?),
        allocations: Vec::new(),
        excess: Excess {
            need: decimal_at(row, 6)?,
            want: decimal_at(row, 7)?,
            save: decimal_at(row, 8)?,
        },
        created_at: row.get(9)?,
    })
}

/// Create-if-absent. Returns false when a ledger for the key already existed,
/// in which case nothing is written.
pub(crate) fn insert_if_absent(conn: &Connection, ledger: &MonthlyLedger) -> rusqlite::Result<bool> {
    let inserted = conn.execute(
        "INSERT INTO ledgers (template_id, month_key, year, month, net_monthly_income,
                              need_pct, want_pct, save_pct, excess_need, excess_want, excess_save, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(template_id, month_key) DO NOTHING",
        params![
            ledger.template_id,
            ledger.month.to_string(),
            ledger.month.year(),
            ledger.month.month(),
            ledger.net_monthly_income.to_string(),
            ledger.split.need.to_string(),
            ledger.split.want.to_string(),
            ledger.split.save.to_string(),
            ledger.excess.need.to_string(),
            ledger.excess.want.to_string(),
            ledger.excess.save.to_string(),
            ledger.created_at,
        ],
    )?;
    if inserted == 0 {
        return Ok(false);
    }
    insert_allocations(conn, &ledger.template_id, &ledger.month, &ledger.allocations)?;
    Ok(true)
}

pub(crate) fn get(
    conn: &Connection,
    template_id: &str,
    month: &MonthKey,
) -> rusqlite::Result<Option<MonthlyLedger>> {
    let head = conn
        .query_row(
            &format!("SELECT {LEDGER_COLUMNS} FROM ledgers WHERE template_id = ?1 AND month_key = ?2"),
            params![template_id, month.to_string()],
            ledger_from_row,
        )
        .optional()?;

    match head {
        Some(mut ledger) => {
            ledger.allocations = allocations(conn, template_id, month)?;
            Ok(Some(ledger))
        }
        None => Ok(None),
    }
}

/// All ledgers of a template, newest month first.
pub(crate) fn list(conn: &Connection, template_id: &str) -> rusqlite::Result<Vec<MonthlyLedger>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LEDGER_COLUMNS} FROM ledgers WHERE template_id = ?1
         ORDER BY year DESC, month DESC"
    ))?;
    let mut ledgers = stmt
        .query_map(params![template_id], ledger_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    for ledger in &mut ledgers {
        ledger.allocations = allocations(conn, template_id, &ledger.month)?;
    }
    Ok(ledgers)
}

pub(crate) fn allocations(
    conn: &Connection,
    template_id: &str,
    month: &MonthKey,
) -> rusqlite::Result<Vec<Allocation>> {
    let mut stmt = conn.prepare(
        "SELECT allocation_id, category, description, amount, recurs
         FROM ledger_allocations WHERE template_id = ?1 AND month_key = ?2
         ORDER BY position",
    )?;
    let rows = stmt.query_map(params![template_id, month.to_string()], |row| {
        Ok(Allocation {
            id: AllocationId::new(row.get::<_, String>(0)?),
            category: category_at(row, 1)?,
            description: row.get(2)?,
            amount: decimal_at(row, 3)?,
            recurs: row.get(4)?,
        })
    })?;
    rows.collect()
}

/// Overwrite the allocation list and excess of an existing ledger.
/// The income/split snapshot is never rewritten.
pub(crate) fn save(conn: &Connection, ledger: &MonthlyLedger) -> rusqlite::Result<()> {
    let month_key = ledger.month.to_string();
    conn.execute(
        "UPDATE ledgers SET excess_need = ?3, excess_want = ?4, excess_save = ?5
         WHERE template_id = ?1 AND month_key = ?2",
        params![
            ledger.template_id,
            month_key,
            ledger.excess.need.to_string(),
            ledger.excess.want.to_string(),
            ledger.excess.save.to_string(),
        ],
    )?;
    conn.execute(
        "DELETE FROM ledger_allocations WHERE template_id = ?1 AND month_key = ?2",
        params![ledger.template_id, month_key],
    )?;
    insert_allocations(conn, &ledger.template_id, &ledger.month, &ledger.allocations)
}

fn insert_allocations(
    conn: &Connection,
    template_id: &str,
    month: &MonthKey,
    allocations: &[Allocation],
) -> rusqlite::Result<()> {
    let month_key = month.to_string();
    let mut stmt = conn.prepare(
        "INSERT INTO ledger_allocations
             (template_id, month_key, allocation_id, position, category, description, amount, recurs)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for (position, alloc) in allocations.iter().enumerate() {
        stmt.execute(params![
            template_id,
            month_key,
            alloc.id.as_str(),
            position as i64,
            alloc.category.as_str(),
            alloc.description,
            alloc.amount.to_string(),
            alloc.recurs,
        ])?;
    }
    Ok(())
}

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::{category_at, decimal_at};
use crate::models::{Allocation, AllocationId, BudgetTemplate, Split};

pub(crate) fn insert(conn: &Connection, template: &BudgetTemplate) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO templates (id, net_monthly_income, need_pct, want_pct, save_pct, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            template.id,
            template.net_monthly_income.to_string(),
            template.split.need.to_string(),
            template.split.want.to_string(),
            template.split.save.to_string(),
            template.created_at,
        ],
    )?;
    for alloc in &template.recurring {
        insert_recurring(conn, &template.id, alloc)?;
    }
    Ok(())
}

pub(crate) fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<BudgetTemplate>> {
    let head = conn
        .query_row(
            "SELECT id, net_monthly_income, need_pct, want_pct, save_pct, created_at
             FROM templates WHERE id = ?1",
            params![id],
            |row| {
                Ok(BudgetTemplate {
                    id: row.get(0)?,
                    net_monthly_income: decimal_at(row, 1)?,
                    split: Split::new(decimal_at(row, 2)?, decimal_at(row, 3)?, decimal_at(row, 4)?),
                    recurring: Vec::new(),
                    created_at: row.get(5)?,
                })
            },
        )
        .optional()?;

    match head {
        Some(mut template) => {
            template.recurring = recurring(conn, id)?;
            Ok(Some(template))
        }
        None => Ok(None),
    }
}

pub(crate) fn exists(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM templates WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )
}

pub(crate) fn recurring(conn: &Connection, template_id: &str) -> rusqlite::Result<Vec<Allocation>> {
    let mut stmt = conn.prepare(
        "SELECT allocation_id, category, description, amount
         FROM template_allocations WHERE template_id = ?1
         ORDER BY position",
    )?;
    let rows = stmt.query_map(params![template_id], |row| {
        Ok(Allocation {
            id: AllocationId::new(row.get::<_, String>(0)?),
            category: category_at(row, 1)?,
            description: row.get(2)?,
            amount: decimal_at(row, 3)?,
            recurs: true,
        })
    })?;
    rows.collect()
}

pub(crate) fn has_recurring(
    conn: &Connection,
    template_id: &str,
    allocation_id: &AllocationId,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM template_allocations WHERE template_id = ?1 AND allocation_id = ?2)",
        params![template_id, allocation_id.as_str()],
        |row| row.get(0),
    )
}

/// Append at the end of the template's recurring list.
pub(crate) fn insert_recurring(
    conn: &Connection,
    template_id: &str,
    alloc: &Allocation,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO template_allocations (template_id, allocation_id, position, category, description, amount)
         VALUES (?1, ?2,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM template_allocations WHERE template_id = ?1),
                 ?3, ?4, ?5)",
        params![
            template_id,
            alloc.id.as_str(),
            alloc.category.as_str(),
            alloc.description,
            alloc.amount.to_string(),
        ],
    )?;
    Ok(())
}

/// Replace in place, keeping its position. Returns rows changed.
pub(crate) fn update_recurring(
    conn: &Connection,
    template_id: &str,
    alloc: &Allocation,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE template_allocations SET category = ?3, description = ?4, amount = ?5
         WHERE template_id = ?1 AND allocation_id = ?2",
        params![
            template_id,
            alloc.id.as_str(),
            alloc.category.as_str(),
            alloc.description,
            alloc.amount.to_string(),
        ],
    )
}

pub(crate) fn delete_recurring(
    conn: &Connection,
    template_id: &str,
    allocation_id: &AllocationId,
) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM template_allocations WHERE template_id = ?1 AND allocation_id = ?2",
        params![template_id, allocation_id.as_str()],
    )
}

pub(crate) fn update_split(conn: &Connection, id: &str, split: &Split) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE templates SET need_pct = ?2, want_pct = ?3, save_pct = ?4 WHERE id = ?1",
        params![
            id,
            split.need.to_string(),
            split.want.to_string(),
            split.save.to_string(),
        ],
    )
}

pub(crate) fn update_income(conn: &Connection, id: &str, income: Decimal) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE templates SET net_monthly_income = ?2 WHERE id = ?1",
        params![id, income.to_string()],
    )
}

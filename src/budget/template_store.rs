use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::IdGenerator;
use crate::db::{self, templates, Database};
use crate::error::{BudgetError, Entity, Result};
use crate::models::{
    validate_amount, validate_income, Allocation, AllocationId, BudgetTemplate, NewTemplate, Split,
};

/// Base budgets: the income/split every new month starts from and the
/// recurring allocations it is seeded with.
pub struct TemplateStore<'a> {
    db: &'a Database,
    ids: &'a dyn IdGenerator,
}

impl<'a> TemplateStore<'a> {
    pub fn new(db: &'a Database, ids: &'a dyn IdGenerator) -> Self {
        Self { db, ids }
    }

    /// Validate and store a new template, returning its id.
    pub fn create(&self, template: NewTemplate) -> Result<String> {
        self.db.write(|conn| create_in(conn, self.ids, template))
    }

    pub fn get(&self, id: &str) -> Result<BudgetTemplate> {
        get_in(self.db.conn(), id)
    }

    /// Fails if the template is missing or already has a definition with this id.
    pub fn append_recurring(&self, template_id: &str, alloc: Allocation) -> Result<()> {
        self.db.write(|conn| {
            ensure_exists(conn, template_id)?;
            validate_amount(alloc.amount)?;
            if templates::has_recurring(conn, template_id, &alloc.id)? {
                return Err(BudgetError::validation(format!(
                    "recurring allocation {} already exists",
                    alloc.id
                )));
            }
            templates::insert_recurring(conn, template_id, &alloc)?;
            Ok(())
        })
    }

    /// Replace the definition with the same id.
    pub fn replace_recurring(&self, template_id: &str, alloc: Allocation) -> Result<()> {
        self.db.write(|conn| {
            ensure_exists(conn, template_id)?;
            validate_amount(alloc.amount)?;
            if templates::update_recurring(conn, template_id, &alloc)? == 0 {
                return Err(BudgetError::not_found(Entity::Allocation, &alloc.id));
            }
            Ok(())
        })
    }

    pub fn upsert_recurring(&self, template_id: &str, alloc: Allocation) -> Result<()> {
        self.db.write(|conn| upsert_recurring_in(conn, template_id, &alloc))
    }

    /// Stop a definition from seeding future months. Existing ledgers keep their copy.
    pub fn remove_recurring(&self, template_id: &str, allocation_id: &AllocationId) -> Result<()> {
        self.db.write(|conn| {
            ensure_exists(conn, template_id)?;
            if templates::delete_recurring(conn, template_id, allocation_id)? == 0 {
                return Err(BudgetError::not_found(Entity::Allocation, allocation_id));
            }
            info!(template_id, %allocation_id, "Removed recurring allocation");
            Ok(())
        })
    }

    /// Change the split used by months opened from now on.
    pub fn update_split(&self, template_id: &str, split: Split) -> Result<()> {
        split.validate()?;
        self.db.write(|conn| {
            if templates::update_split(conn, template_id, &split)? == 0 {
                return Err(BudgetError::not_found(Entity::Template, template_id));
            }
            info!(template_id, %split, "Updated template split");
            Ok(())
        })
    }

    pub fn update_income(&self, template_id: &str, income: Decimal) -> Result<()> {
        validate_income(income)?;
        self.db.write(|conn| {
            if templates::update_income(conn, template_id, income)? == 0 {
                return Err(BudgetError::not_found(Entity::Template, template_id));
            }
            info!(template_id, %income, "Updated template income");
            Ok(())
        })
    }
}

pub(crate) fn create_in(
    conn: &Connection,
    ids: &dyn IdGenerator,
    template: NewTemplate,
) -> Result<String> {
    template.validate()?;
    let stored = BudgetTemplate {
        id: ids.next_id(),
        net_monthly_income: template.net_monthly_income,
        split: template.split,
        recurring: template
            .recurring
            .into_iter()
            .map(|a| Allocation { recurs: true, ..a })
            .collect(),
        created_at: db::now_rfc3339(),
    };
    templates::insert(conn, &stored)?;
    info!(template_id = %stored.id, split = %stored.split, "Created budget template");
    Ok(stored.id)
}

pub(crate) fn get_in(conn: &Connection, id: &str) -> Result<BudgetTemplate> {
    templates::get(conn, id)?.ok_or_else(|| BudgetError::not_found(Entity::Template, id))
}

/// Append the definition, or replace it if the id is already recurring.
pub(crate) fn upsert_recurring_in(conn: &Connection, template_id: &str, alloc: &Allocation) -> Result<()> {
    ensure_exists(conn, template_id)?;
    validate_amount(alloc.amount)?;
    if templates::update_recurring(conn, template_id, alloc)? == 0 {
        templates::insert_recurring(conn, template_id, alloc)?;
        debug!(template_id, allocation_id = %alloc.id, "Appended recurring allocation");
    } else {
        debug!(template_id, allocation_id = %alloc.id, "Replaced recurring allocation");
    }
    Ok(())
}

fn ensure_exists(conn: &Connection, template_id: &str) -> Result<()> {
    if !templates::exists(conn, template_id)? {
        return Err(BudgetError::not_found(Entity::Template, template_id));
    }
    Ok(())
}

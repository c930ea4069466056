use rusqlite::Connection;
use tracing::{debug, info};

use super::{ledger_store, template_store, IdGenerator};
use crate::db::{ledgers, Database};
use crate::error::{BudgetError, Entity, Result};
use crate::models::{validate_amount, Allocation, AllocationId, MonthKey, MonthlyLedger, NewAllocation};

/// One change to a month's allocation list.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationOp {
    /// Append with a freshly generated id.
    Add(NewAllocation),
    /// Replace the allocation with the same id.
    Update(Allocation),
    Delete(AllocationId),
}

impl AllocationOp {
    fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }
}

/// Applies allocation changes to a monthly ledger.
///
/// Each call is one read-modify-write transaction: the ledger is loaded,
/// changed, its excess recomputed from the ledger's own income/split snapshot,
/// and written back. Recurring allocations that are added or edited are
/// upserted into the template inside the same transaction, so the ledger and
/// the template never disagree about an edit that half-happened.
///
/// Over-allocation is not rejected here; see [`super::guard`] for the
/// advisory headroom check.
pub struct AllocationEngine<'a> {
    db: &'a Database,
    ids: &'a dyn IdGenerator,
}

impl<'a> AllocationEngine<'a> {
    pub fn new(db: &'a Database, ids: &'a dyn IdGenerator) -> Self {
        Self { db, ids }
    }

    /// Apply `op` to the ledger for (`template_id`, `month`) and return the
    /// updated ledger. The ledger must already exist.
    pub fn apply(&self, template_id: &str, month: MonthKey, op: AllocationOp) -> Result<MonthlyLedger> {
        let op_name = op.name();
        let ledger = self
            .db
            .write(|conn| apply_in(conn, self.ids, template_id, month, op))?;
        info!(
            template_id,
            %month,
            op = op_name,
            excess_need = %ledger.excess.need,
            excess_want = %ledger.excess.want,
            excess_save = %ledger.excess.save,
            "Applied allocation change"
        );
        Ok(ledger)
    }

    pub fn add(&self, template_id: &str, month: MonthKey, alloc: NewAllocation) -> Result<MonthlyLedger> {
        self.apply(template_id, month, AllocationOp::Add(alloc))
    }

    pub fn update(&self, template_id: &str, month: MonthKey, alloc: Allocation) -> Result<MonthlyLedger> {
        self.apply(template_id, month, AllocationOp::Update(alloc))
    }

    pub fn delete(&self, template_id: &str, month: MonthKey, id: AllocationId) -> Result<MonthlyLedger> {
        self.apply(template_id, month, AllocationOp::Delete(id))
    }
}

fn apply_in(
    conn: &Connection,
    ids: &dyn IdGenerator,
    template_id: &str,
    month: MonthKey,
    op: AllocationOp,
) -> Result<MonthlyLedger> {
    let mut ledger = ledger_store::get_in(conn, template_id, &month)?;

    let propagate = match op {
        AllocationOp::Add(new) => {
            validate_amount(new.amount)?;
            let alloc = new.with_id(AllocationId::new(ids.next_id()));
            if ledger.find(&alloc.id).is_some() {
                return Err(BudgetError::validation(format!(
                    "allocation id {} is already in use",
                    alloc.id
                )));
            }
            let propagate = alloc.recurs.then(|| alloc.clone());
            ledger.allocations.push(alloc);
            propagate
        }
        AllocationOp::Update(updated) => {
            validate_amount(updated.amount)?;
            let slot = ledger
                .allocations
                .iter_mut()
                .find(|a| a.id == updated.id)
                .ok_or_else(|| BudgetError::not_found(Entity::Allocation, &updated.id))?;
            *slot = updated.clone();
            updated.recurs.then_some(updated)
        }
        AllocationOp::Delete(id) => {
            let pos = ledger
                .allocations
                .iter()
                .position(|a| a.id == id)
                .ok_or_else(|| BudgetError::not_found(Entity::Allocation, &id))?;
            ledger.allocations.remove(pos);
            None
        }
    };

    ledger.refresh_excess()?;
    ledgers::save(conn, &ledger)?;

    if let Some(definition) = propagate {
        template_store::upsert_recurring_in(conn, template_id, &definition)?;
        debug!(template_id, allocation_id = %definition.id, "Propagated recurring allocation to template");
    }

    Ok(ledger)
}

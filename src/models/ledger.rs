use rust_decimal::Decimal;

use super::template::too_large;
use crate::error::Result;

use super::{total_for, Allocation, AllocationId, Category, MonthKey, Split};

/// Unallocated money per category. Negative means overspent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Excess {
    pub need: Decimal,
    pub want: Decimal,
    pub save: Decimal,
}

impl Excess {
    /// `income * pct / 100 - sum(amounts)` for each category. Fails with a
    /// validation error when any of it, or the grand total, would overflow.
    pub fn compute(income: Decimal, split: &Split, allocations: &[Allocation]) -> Result<Self> {
        let excess_for = |c: Category| -> Result<Decimal> {
            split
                .allotment(income, c)?
                .checked_sub(total_for(allocations, c)?)
                .ok_or_else(too_large)
        };
        let excess = Self {
            need: excess_for(Category::Need)?,
            want: excess_for(Category::Want)?,
            save: excess_for(Category::Save)?,
        };
        excess
            .need
            .checked_add(excess.want)
            .and_then(|v| v.checked_add(excess.save))
            .ok_or_else(too_large)?;
        Ok(excess)
    }

    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Need => self.need,
            Category::Want => self.want,
            Category::Save => self.save,
        }
    }

    pub fn total(&self) -> Decimal {
        self.need + self.want + self.save
    }
}

/// One month of a budget: a snapshot of the template's income and split taken
/// when the month was first opened, plus that month's allocations.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyLedger {
    pub template_id: String,
    pub month: MonthKey,
    pub net_monthly_income: Decimal,
    pub split: Split,
    pub allocations: Vec<Allocation>,
    pub excess: Excess,
    pub created_at: String,
}

impl MonthlyLedger {
    pub fn allotment(&self, category: Category) -> Result<Decimal> {
        self.split.allotment(self.net_monthly_income, category)
    }

    pub fn allocated(&self, category: Category) -> Result<Decimal> {
        total_for(&self.allocations, category)
    }

    pub fn find(&self, id: &AllocationId) -> Option<&Allocation> {
        self.allocations.iter().find(|a| &a.id == id)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(move |a| a.category == category)
    }

    /// Recompute `excess` from the ledger's own snapshot.
    pub fn refresh_excess(&mut self) -> Result<()> {
        self.excess = Excess::compute(self.net_monthly_income, &self.split, &self.allocations)?;
        Ok(())
    }
}

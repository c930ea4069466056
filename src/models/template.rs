use rust_decimal::Decimal;

use super::{Allocation, Category, Excess};
use crate::error::{BudgetError, Result};

/// Percentage split of net income across the three categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub need: Decimal,
    pub want: Decimal,
    pub save: Decimal,
}

impl Split {
    pub fn new(need: Decimal, want: Decimal, save: Decimal) -> Self {
        Self { need, want, save }
    }

    /// The 50/30/20 split offered during onboarding.
    pub fn default_split() -> Self {
        Self {
            need: Decimal::from(50),
            want: Decimal::from(30),
            save: Decimal::from(20),
        }
    }

    pub fn percent(&self, category: Category) -> Decimal {
        match category {
            Category::Need => self.need,
            Category::Want => self.want,
            Category::Save => self.save,
        }
    }

    fn percent_mut(&mut self, category: Category) -> &mut Decimal {
        match category {
            Category::Need => &mut self.need,
            Category::Want => &mut self.want,
            Category::Save => &mut self.save,
        }
    }

    pub fn total(&self) -> Decimal {
        self.need + self.want + self.save
    }

    /// Every percentage non-negative and the three summing to exactly 100.
    pub fn validate(&self) -> Result<()> {
        for &c in Category::all() {
            if self.percent(c) < Decimal::ZERO {
                return Err(BudgetError::validation(format!(
                    "{} percentage cannot be negative",
                    c.label()
                )));
            }
        }
        if self.total() != Decimal::ONE_HUNDRED {
            return Err(BudgetError::validation(format!(
                "percentages must add up to 100, got {}",
                self.total()
            )));
        }
        Ok(())
    }

    /// Amount of `income` available to `category` under this split.
    pub fn allotment(&self, income: Decimal, category: Category) -> Result<Decimal> {
        income
            .checked_mul(self.percent(category))
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(too_large)
    }

    /// Set one category to `value` and pull any overflow past 100 out of the
    /// other two, in need/want/save order, never taking one below 1%.
    pub fn rebalance(&self, category: Category, value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO || value >= Decimal::ONE_HUNDRED {
            return Err(BudgetError::validation(
                "value must be between 1 and 99",
            ));
        }
        let mut next = *self;
        *next.percent_mut(category) = value;

        let mut overflow = next.total() - Decimal::ONE_HUNDRED;
        if overflow <= Decimal::ZERO {
            return Ok(next);
        }
        for &other in Category::all().iter().filter(|&&c| c != category) {
            if overflow <= Decimal::ZERO {
                break;
            }
            let current = next.percent(other);
            let available = (current - Decimal::ONE).max(Decimal::ZERO);
            let deduction = available.min(overflow);
            *next.percent_mut(other) = current - deduction;
            overflow -= deduction;
        }
        Ok(next)
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.need, self.want, self.save)
    }
}

/// The user's base budget: income, split and recurring allocation definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTemplate {
    pub id: String,
    pub net_monthly_income: Decimal,
    pub split: Split,
    pub recurring: Vec<Allocation>,
    pub created_at: String,
}

impl BudgetTemplate {
    pub fn find_recurring(&self, id: &super::AllocationId) -> Option<&Allocation> {
        self.recurring.iter().find(|a| &a.id == id)
    }
}

/// A template before it has been stored and given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub net_monthly_income: Decimal,
    pub split: Split,
    pub recurring: Vec<Allocation>,
}

impl NewTemplate {
    pub fn new(net_monthly_income: Decimal, split: Split) -> Self {
        Self {
            net_monthly_income,
            split,
            recurring: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.split.validate()?;
        validate_income(self.net_monthly_income)?;
        let mut seen = std::collections::HashSet::new();
        for alloc in &self.recurring {
            validate_amount(alloc.amount)?;
            if !seen.insert(&alloc.id) {
                return Err(BudgetError::validation(format!(
                    "duplicate recurring allocation id {}",
                    alloc.id
                )));
            }
        }
        // the first month opened from this template must be computable
        Excess::compute(self.net_monthly_income, &self.split, &self.recurring)?;
        Ok(())
    }
}

/// Income must be non-negative and small enough that any split of it,
/// up to 100%, can be computed.
pub fn validate_income(income: Decimal) -> Result<()> {
    if income < Decimal::ZERO {
        return Err(BudgetError::validation("net monthly income cannot be negative"));
    }
    if income.checked_mul(Decimal::ONE_HUNDRED).is_none() {
        return Err(BudgetError::validation("net monthly income is too large"));
    }
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(BudgetError::validation("allocation amount cannot be negative"));
    }
    Ok(())
}

pub(crate) fn too_large() -> BudgetError {
    BudgetError::validation("amount too large")
}

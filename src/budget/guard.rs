//! Input checks for allocation forms.
//!
//! These mirror what the entry form refuses before it ever calls the engine:
//! an amount larger than what is left in its category, or larger than the
//! whole income. The engine itself accepts over-allocation and simply lets
//! the category's excess go negative.

use rust_decimal::Decimal;

use crate::error::{BudgetError, Result};
use crate::models::{AllocationId, Category, MonthlyLedger};

/// Money still free in `category`. When editing, the allocation being
/// replaced gives its amount back first.
pub fn headroom(ledger: &MonthlyLedger, category: Category, replacing: Option<&AllocationId>) -> Decimal {
    let returned = replacing
        .and_then(|id| ledger.find(id))
        .filter(|a| a.category == category)
        .map(|a| a.amount)
        .unwrap_or(Decimal::ZERO);
    ledger.excess.get(category) + returned
}

pub fn check_amount(
    ledger: &MonthlyLedger,
    category: Category,
    amount: Decimal,
    replacing: Option<&AllocationId>,
) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(BudgetError::validation("amount cannot be negative"));
    }
    if amount > ledger.net_monthly_income {
        return Err(BudgetError::validation(format!(
            "amount {amount} exceeds net monthly income {}",
            ledger.net_monthly_income
        )));
    }
    let available = headroom(ledger, category, replacing);
    if amount > available {
        return Err(BudgetError::validation(format!(
            "amount {amount} exceeds the {available} left in {}",
            category.label()
        )));
    }
    Ok(())
}

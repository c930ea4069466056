use rust_decimal::Decimal;

use super::template::too_large;
use super::Category;
use crate::error::Result;

/// Client-generated allocation identifier (32 lowercase hex chars when random).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllocationId(String);

impl AllocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AllocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AllocationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An itemized expense or savings entry. The same shape is used for the
/// template's recurring definitions and for a month's ledger entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub id: AllocationId,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    /// Mirrored into the template so future months inherit it.
    pub recurs: bool,
}

/// An allocation that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAllocation {
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub recurs: bool,
}

impl NewAllocation {
    pub fn new(category: Category, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category,
            description: description.into(),
            amount,
            recurs: false,
        }
    }

    pub fn recurring(mut self) -> Self {
        self.recurs = true;
        self
    }

    pub fn with_id(self, id: AllocationId) -> Allocation {
        Allocation {
            id,
            category: self.category,
            description: self.description,
            amount: self.amount,
            recurs: self.recurs,
        }
    }
}

/// Sum of amounts in one category.
pub fn total_for(allocations: &[Allocation], category: Category) -> Result<Decimal> {
    allocations
        .iter()
        .filter(|a| a.category == category)
        .try_fold(Decimal::ZERO, |sum, a| sum.checked_add(a.amount))
        .ok_or_else(too_large)
}

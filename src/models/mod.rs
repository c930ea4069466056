mod allocation;
mod category;
mod ledger;
mod month;
mod profile;
mod template;

pub use allocation::{total_for, Allocation, AllocationId, NewAllocation};
pub use category::Category;
pub use ledger::{Excess, MonthlyLedger};
pub use month::MonthKey;
pub use profile::UserProfile;
pub use template::{validate_amount, validate_income, BudgetTemplate, NewTemplate, Split};

#[cfg(test)]
mod tests;

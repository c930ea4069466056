//! SplitBudget: monthly Need/Want/Save budgeting.
//!
//! A [`models::BudgetTemplate`] holds the user's income, percentage split and
//! recurring allocations. Each calendar month gets a [`models::MonthlyLedger`]
//! copied from the template the first time it is opened; allocations are then
//! added, edited and removed through [`budget::AllocationEngine`], which keeps
//! every category's excess (unallocated money) current.

pub mod budget;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod util;

pub use error::{BudgetError, Result};

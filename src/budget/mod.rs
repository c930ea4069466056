//! The allocation engine and the services around it.
//!
//! Every service borrows an explicitly opened [`Database`](crate::db::Database);
//! there is no global state. A typical request looks like:
//!
//! ```text
//! Onboarding::load_existing(user)      -> template id
//! LedgerStore::get_or_create(id, month) -> ledger (seeded from the template)
//! AllocationEngine::apply(id, month, op) -> updated ledger (+ template, if recurring)
//! Analysis::monthly_surplus_series(...)  -> trend
//! ```

mod analysis;
mod engine;
pub mod guard;
mod ids;
mod ledger_store;
mod onboarding;
mod template_store;

pub use analysis::{Analysis, SurplusPoint, Window};
pub use engine::{AllocationEngine, AllocationOp};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use ledger_store::LedgerStore;
pub use onboarding::{Onboarding, OnboardingInput};
pub use template_store::TemplateStore;

use rust_decimal::Decimal;

use crate::db::{ledgers, Database};
use crate::error::Result;
use crate::models::MonthKey;

/// How far back a trend looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Months strictly closer than `n` calendar months to "now".
    Months(u32),
    AllTime,
}

impl Window {
    fn contains(&self, month: &MonthKey, now: &MonthKey) -> bool {
        match self {
            Self::AllTime => true,
            Self::Months(n) => month.months_until(now) < i64::from(*n),
        }
    }
}

/// One point of the surplus trend.
#[derive(Debug, Clone, PartialEq)]
pub struct SurplusPoint {
    pub month: MonthKey,
    pub period_label: String,
    /// Unallocated money across all three categories.
    pub value: Decimal,
}

pub struct Analysis<'a> {
    db: &'a Database,
}

impl<'a> Analysis<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Total monthly surplus for each materialized month inside `window`,
    /// newest month first.
    pub fn monthly_surplus_series(
        &self,
        template_id: &str,
        window: Window,
        now: MonthKey,
    ) -> Result<Vec<SurplusPoint>> {
        let ledgers = ledgers::list(self.db.conn(), template_id)?;
        Ok(ledgers
            .into_iter()
            .filter(|l| window.contains(&l.month, &now))
            .map(|l| SurplusPoint {
                month: l.month,
                period_label: l.month.display_label(),
                value: l.excess.total(),
            })
            .collect())
    }

    /// [`Self::monthly_surplus_series`] relative to the current local month.
    pub fn monthly_surplus_series_now(&self, template_id: &str, window: Window) -> Result<Vec<SurplusPoint>> {
        self.monthly_surplus_series(template_id, window, MonthKey::current())
    }
}

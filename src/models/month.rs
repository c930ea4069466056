use chrono::{Datelike, NaiveDate};

use crate::error::{BudgetError, Result};

/// A calendar month. Displayed and stored as zero-padded `MM-YYYY`.
///
/// Ordering is chronological (year first), so `12-2023 < 01-2024` even though
/// the string forms sort the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::validation(format!(
                "month must be 1-12, got {month}"
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(BudgetError::validation(format!(
                "year must be 1-9999, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parse `MM-YYYY`. A single-digit month (`6-2024`) is accepted.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || BudgetError::validation(format!("expected MM-YYYY, got '{s}'"));
        let (m, y) = s.trim().split_once('-').ok_or_else(invalid)?;
        if m.is_empty() || m.len() > 2 || y.len() != 4 {
            return Err(invalid());
        }
        let month: u32 = m.parse().map_err(|_| invalid())?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        Self::new(month, year)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Whole calendar months from `self` to `later`. Negative when `later` is earlier.
    pub fn months_until(&self, later: &MonthKey) -> i64 {
        later.ordinal() - self.ordinal()
    }

    /// Short human label, e.g. `Jun 2024`.
    pub fn display_label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

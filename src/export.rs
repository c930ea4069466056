use std::path::Path;

use crate::error::Result;
use crate::models::MonthlyLedger;

/// Write a month's allocations as CSV. Returns the number of rows written.
pub fn export_ledger_csv(ledger: &MonthlyLedger, path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["month", "id", "category", "description", "amount", "recurring"])?;
    let month = ledger.month.to_string();
    for alloc in &ledger.allocations {
        wtr.write_record([
            month.as_str(),
            alloc.id.as_str(),
            alloc.category.as_str(),
            alloc.description.as_str(),
            alloc.amount.to_string().as_str(),
            if alloc.recurs { "yes" } else { "no" },
        ])?;
    }
    wtr.flush()?;
    Ok(ledger.allocations.len())
}

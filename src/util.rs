use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{BudgetError, Result};

/// Dollar amount rounded to cents with thousands grouped, e.g. `-$1,234.50`.
pub fn format_amount(val: Decimal) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (units, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Parse a user-typed amount. Currency symbols and thousand separators are
/// ignored, so `$1,234.50` parses as `1234.50`.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(BudgetError::validation("amount is empty"));
    }
    Decimal::from_str(cleaned)
        .map_err(|_| BudgetError::validation(format!("'{s}' is not a valid amount")))
}

/// At most `max` characters, the last one replaced by "…" when `s` is cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.char_indices().nth(max).is_none() {
        return s.to_string();
    }
    match max.checked_sub(1).and_then(|keep| s.char_indices().nth(keep)) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => String::new(),
    }
}

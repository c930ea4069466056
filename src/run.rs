mod cli;

pub(crate) use cli::{as_cli, print_usage};

use anyhow::{Context, Result};
use splitbudget::models::{Category, MonthKey};
use splitbudget::util::parse_amount;
use rust_decimal::Decimal;

/// Flags that take a value; their values are not positional arguments.
const VALUE_FLAGS: &[&str] = &[
    "--month",
    "--amount",
    "--description",
    "--category",
    "--name",
    "--email",
    "--split",
];

pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

pub(crate) fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither flags nor flag values.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn month_arg(args: &[String]) -> Result<MonthKey> {
    match flag_value(args, "--month") {
        Some(m) => Ok(MonthKey::parse(m)?),
        None => Ok(MonthKey::current()),
    }
}

pub(crate) fn category_arg(s: &str) -> Result<Category> {
    Category::parse(s).with_context(|| format!("Unknown category '{s}' (expected need, want or save)"))
}

pub(crate) fn amount_arg(s: &str) -> Result<Decimal> {
    Ok(parse_amount(s)?)
}

/// `50/30/20` style split.
pub(crate) fn split_arg(s: &str) -> Result<(Decimal, Decimal, Decimal)> {
    let parts: Vec<&str> = s.split('/').collect();
    match parts.as_slice() {
        [need, want, save] => Ok((amount_arg(need)?, amount_arg(want)?, amount_arg(save)?)),
        _ => anyhow::bail!("Expected a split like 50/30/20, got '{s}'"),
    }
}

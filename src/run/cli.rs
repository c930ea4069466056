use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;

use splitbudget::budget::{
    guard, AllocationEngine, Analysis, LedgerStore, Onboarding, OnboardingInput, RandomIds,
    TemplateStore, Window,
};
use splitbudget::config::Config;
use splitbudget::db::Database;
use splitbudget::export::export_ledger_csv;
use splitbudget::models::{
    AllocationId, BudgetTemplate, Category, MonthKey, MonthlyLedger, NewAllocation, NewTemplate,
    Split, UserProfile,
};
use splitbudget::util::{format_amount, truncate};

use super::{amount_arg, category_arg, flag_value, has_flag, month_arg, positionals, split_arg};

/// How many hex characters of an allocation id are shown and accepted.
const SHORT_ID: usize = 8;

pub(crate) fn as_cli(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "init" => cli_init(rest, db, config),
        "show" | "s" => cli_show(rest, db, config),
        "add" | "a" => cli_add(rest, db, config),
        "update" | "edit" => cli_update(rest, db, config),
        "delete" | "rm" => cli_delete(rest, db, config),
        "trend" => cli_trend(rest, db, config),
        "split" => cli_split(rest, db, config),
        "rebalance" => cli_rebalance(rest, db, config),
        "income" => cli_income(rest, db, config),
        "recurring" => cli_recurring(rest, db, config),
        "export" => cli_export(rest, db, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("splitbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("SplitBudget: Need/Want/Save monthly budgeting");
    println!();
    println!("Usage: splitbudget <command>");
    println!();
    println!("Commands:");
    println!("  init <income> [need want save]  Set up your budget");
    println!("    --split <N/W/S>               Percentages (default 50/30/20)");
    println!("    --name <name> --email <addr>  Profile details");
    println!("  show [MM-YYYY]                  Show a month (opens it if new)");
    println!("  add <category> <amount> <desc>  Add an allocation");
    println!("    --recurring                   Repeat it in future months");
    println!("  update <id>                     Edit an allocation");
    println!("    --amount <x> --description <d> --category <c> --recurring|--once");
    println!("  delete <id>                     Remove an allocation");
    println!("  trend [months|all]              Monthly surplus (default 6 months)");
    println!("  split <need> <want> <save>      Change the split for new months");
    println!("  rebalance <category> <value>    Set one category, shrink the others");
    println!("  income <amount>                 Change income for new months");
    println!("  recurring [remove <id>]         List or remove recurring allocations");
    println!("  export [path]                   Export a month to CSV");
    println!();
    println!("  --month <MM-YYYY>               Month to act on (default: current)");
    println!("  --force                         Skip the over-budget check");
    println!();
    println!("Environment: SPLITBUDGET_DB, SPLITBUDGET_USER, SPLITBUDGET_LOG");
}

// ── Onboarding ────────────────────────────────────────────────

fn cli_init(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let income = pos
        .first()
        .context("Usage: splitbudget init <income> [--split 50/30/20]")?;
    let income = amount_arg(income)?;
    let split = match (flag_value(args, "--split"), &pos[1..]) {
        (Some(s), _) => {
            let (need, want, save) = split_arg(s)?;
            Split::new(need, want, save)
        }
        (None, [need, want, save]) => {
            Split::new(amount_arg(need)?, amount_arg(want)?, amount_arg(save)?)
        }
        (None, []) => Split::default_split(),
        _ => anyhow::bail!("Give the split as three numbers or --split 50/30/20"),
    };

    let ids = RandomIds;
    let profile = Onboarding::new(db, &ids).initialize_from_onboarding(OnboardingInput {
        user_id: config.user_id.clone(),
        display_name: flag_value(args, "--name").unwrap_or_default().to_string(),
        email: flag_value(args, "--email").map(str::to_string),
        template: NewTemplate::new(income, split),
        start_month: MonthKey::current(),
    })?;

    println!(
        "Budget created: {} net income, split {} (need/want/save)",
        format_amount(income),
        split
    );
    println!("Starting month: {}", profile.start_month.display_label());
    Ok(())
}

fn load_profile(db: &Database, config: &Config) -> Result<(UserProfile, BudgetTemplate)> {
    let ids = RandomIds;
    Onboarding::new(db, &ids)
        .load_existing(&config.user_id)
        .with_context(|| {
            format!(
                "No budget for user '{}'. Run `splitbudget init <income>` first.",
                config.user_id
            )
        })
}

// ── Monthly ledger ────────────────────────────────────────────

fn cli_show(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let (_, template) = load_profile(db, config)?;
    let month = match positionals(args).first() {
        Some(m) => MonthKey::parse(m)?,
        None => month_arg(args)?,
    };
    let ledger = LedgerStore::new(db).get_or_create(&template.id, month)?;
    print_ledger(&ledger)
}

fn print_ledger(ledger: &MonthlyLedger) -> Result<()> {
    println!("SplitBudget: {} ({})", ledger.month.display_label(), ledger.month);
    println!("{}", "─".repeat(56));
    println!(
        "  Income: {}   Split: {}",
        format_amount(ledger.net_monthly_income),
        ledger.split
    );

    for &category in Category::all() {
        println!();
        println!(
            "{:<8} {:>12} of {:>12}  ({} left)",
            category.label().to_uppercase(),
            format_amount(ledger.allocated(category)?),
            format_amount(ledger.allotment(category)?),
            format_amount(ledger.excess.get(category)),
        );
        for alloc in ledger.in_category(category) {
            println!(
                "  {:<8}  {:<28} {:>12}{}",
                short_id(&alloc.id),
                truncate(&alloc.description, 28),
                format_amount(alloc.amount),
                if alloc.recurs { "  ↻" } else { "" },
            );
        }
    }

    println!();
    println!("  Unallocated: {}", format_amount(ledger.excess.total()));
    Ok(())
}

fn short_id(id: &AllocationId) -> String {
    id.as_str().chars().take(SHORT_ID).collect()
}

/// Find the allocation whose id starts with `prefix`.
fn resolve_id(ledger: &MonthlyLedger, prefix: &str) -> Result<AllocationId> {
    let matches: Vec<&AllocationId> = ledger
        .allocations
        .iter()
        .map(|a| &a.id)
        .filter(|id| id.as_str().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => anyhow::bail!("No allocation '{prefix}' in {}", ledger.month),
        _ => anyhow::bail!("'{prefix}' matches {} allocations; use more characters", matches.len()),
    }
}

fn cli_add(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 3 {
        anyhow::bail!("Usage: splitbudget add <need|want|save> <amount> <description> [--recurring]");
    }
    let category = category_arg(pos[0])?;
    let amount = amount_arg(pos[1])?;
    let description = pos[2..].join(" ");

    let (_, template) = load_profile(db, config)?;
    let month = month_arg(args)?;
    let ledger = LedgerStore::new(db).get_or_create(&template.id, month)?;
    if !has_flag(args, "--force") {
        guard::check_amount(&ledger, category, amount, None)?;
    }

    let mut alloc = NewAllocation::new(category, description, amount);
    if has_flag(args, "--recurring") {
        alloc = alloc.recurring();
    }
    let ids = RandomIds;
    let ledger = AllocationEngine::new(db, &ids).add(&template.id, month, alloc)?;

    println!(
        "Added to {}. {} left in {}.",
        ledger.month,
        format_amount(ledger.excess.get(category)),
        category.label()
    );
    Ok(())
}

fn cli_update(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let prefix = pos
        .first()
        .context("Usage: splitbudget update <id> [--amount X] [--description D] [--category C]")?;

    let (_, template) = load_profile(db, config)?;
    let month = month_arg(args)?;
    let ledger = LedgerStore::new(db).get_or_create(&template.id, month)?;
    let id = resolve_id(&ledger, prefix)?;
    let mut alloc = ledger
        .find(&id)
        .cloned()
        .with_context(|| format!("Allocation {id} disappeared"))?;

    if let Some(a) = flag_value(args, "--amount") {
        alloc.amount = amount_arg(a)?;
    }
    if let Some(d) = flag_value(args, "--description") {
        alloc.description = d.to_string();
    }
    if let Some(c) = flag_value(args, "--category") {
        alloc.category = category_arg(c)?;
    }
    if has_flag(args, "--recurring") {
        alloc.recurs = true;
    } else if has_flag(args, "--once") {
        alloc.recurs = false;
    }

    if !has_flag(args, "--force") {
        guard::check_amount(&ledger, alloc.category, alloc.amount, Some(&id))?;
    }
    let category = alloc.category;
    let recurs = alloc.recurs;
    let ids = RandomIds;
    let ledger = AllocationEngine::new(db, &ids).update(&template.id, month, alloc)?;

    println!(
        "Updated {}. {} left in {}.{}",
        short_id(&id),
        format_amount(ledger.excess.get(category)),
        category.label(),
        if recurs { " Future months will use this too." } else { "" }
    );
    Ok(())
}

fn cli_delete(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let prefix = pos.first().context("Usage: splitbudget delete <id>")?;

    let (_, template) = load_profile(db, config)?;
    let month = month_arg(args)?;
    let ledger = LedgerStore::new(db).get_or_create(&template.id, month)?;
    let id = resolve_id(&ledger, prefix)?;

    let ids = RandomIds;
    let ledger = AllocationEngine::new(db, &ids).delete(&template.id, month, id.clone())?;
    println!(
        "Deleted {} from {}. Unallocated: {}",
        short_id(&id),
        ledger.month,
        format_amount(ledger.excess.total())
    );
    Ok(())
}

// ── Analysis ──────────────────────────────────────────────────

fn cli_trend(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let window = match positionals(args).first() {
        Some(&"all") => Window::AllTime,
        Some(n) => Window::Months(
            n.parse()
                .with_context(|| format!("Expected a number of months or 'all', got '{n}'"))?,
        ),
        None => Window::Months(6),
    };
    let (_, template) = load_profile(db, config)?;
    let series = Analysis::new(db).monthly_surplus_series_now(&template.id, window)?;

    if series.is_empty() {
        println!("No months recorded yet");
        return Ok(());
    }
    println!("{:<10} {:>14}", "Month", "Surplus");
    println!("{}", "─".repeat(25));
    for point in &series {
        println!("{:<10} {:>14}", point.period_label, format_amount(point.value));
    }
    let total: Decimal = series.iter().map(|p| p.value).sum();
    println!("{}", "─".repeat(25));
    println!("{:<10} {:>14}", "Total", format_amount(total));
    Ok(())
}

// ── Template ──────────────────────────────────────────────────

fn cli_split(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let split = match pos.as_slice() {
        [need, want, save] => Split::new(amount_arg(need)?, amount_arg(want)?, amount_arg(save)?),
        [combined] => {
            let (need, want, save) = split_arg(combined)?;
            Split::new(need, want, save)
        }
        _ => anyhow::bail!("Usage: splitbudget split <need> <want> <save>"),
    };
    let (_, template) = load_profile(db, config)?;
    let ids = RandomIds;
    TemplateStore::new(db, &ids).update_split(&template.id, split)?;
    println!("Split is now {split}. Months already opened keep their split.");
    Ok(())
}

fn cli_rebalance(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let [category, value] = pos.as_slice() else {
        anyhow::bail!("Usage: splitbudget rebalance <category> <value>");
    };
    let category = category_arg(category)?;
    let value = amount_arg(value)?;

    let (_, template) = load_profile(db, config)?;
    let split = template.split.rebalance(category, value)?;
    println!("Rebalanced split: {split}");
    if let Err(e) = split.validate() {
        anyhow::bail!("Not saved: {e}");
    }
    let ids = RandomIds;
    TemplateStore::new(db, &ids).update_split(&template.id, split)?;
    println!("Saved. Months already opened keep their split.");
    Ok(())
}

fn cli_income(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let income = pos.first().context("Usage: splitbudget income <amount>")?;
    let income = amount_arg(income)?;
    let (_, template) = load_profile(db, config)?;
    let ids = RandomIds;
    TemplateStore::new(db, &ids).update_income(&template.id, income)?;
    println!(
        "Net income is now {}. Months already opened keep their income.",
        format_amount(income)
    );
    Ok(())
}

fn cli_recurring(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let (_, template) = load_profile(db, config)?;
    let pos = positionals(args);
    match pos.as_slice() {
        [] => {
            if template.recurring.is_empty() {
                println!("No recurring allocations");
                return Ok(());
            }
            for alloc in &template.recurring {
                println!(
                    "  {:<8}  {:<5} {:<28} {:>12}",
                    short_id(&alloc.id),
                    alloc.category.as_str(),
                    truncate(&alloc.description, 28),
                    format_amount(alloc.amount),
                );
            }
            Ok(())
        }
        ["remove", prefix] => {
            let matches: Vec<&AllocationId> = template
                .recurring
                .iter()
                .map(|a| &a.id)
                .filter(|id| id.as_str().starts_with(prefix))
                .collect();
            let [id] = matches.as_slice() else {
                anyhow::bail!("'{prefix}' must match exactly one recurring allocation");
            };
            let ids = RandomIds;
            TemplateStore::new(db, &ids).remove_recurring(&template.id, id)?;
            println!("Removed {}. Months already opened keep it.", short_id(id));
            Ok(())
        }
        _ => anyhow::bail!("Usage: splitbudget recurring [remove <id>]"),
    }
}

// ── Export ────────────────────────────────────────────────────

fn cli_export(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let (_, template) = load_profile(db, config)?;
    let month = month_arg(args)?;
    let output_path = positionals(args)
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/splitbudget-{month}.csv")
        });

    let ledger = LedgerStore::new(db).get(&template.id, month)?;
    let count = export_ledger_csv(&ledger, &PathBuf::from(&output_path))?;
    println!("Exported {count} allocations to {output_path}");
    Ok(())
}

fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

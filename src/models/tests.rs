#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn alloc(id: &str, category: Category, amount: Decimal) -> Allocation {
    Allocation {
        id: AllocationId::from(id),
        category,
        description: format!("item {id}"),
        amount,
        recurs: false,
    }
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("need"), Some(Category::Need));
    assert_eq!(Category::parse(" Wants "), Some(Category::Want));
    assert_eq!(Category::parse("SAVINGS"), Some(Category::Save));
    assert_eq!(Category::parse("rent"), None);
}

#[test]
fn test_category_round_trips_through_as_str() {
    for &c in Category::all() {
        assert_eq!(Category::parse(c.as_str()), Some(c));
    }
}

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_key_format_is_zero_padded() {
    let key = MonthKey::new(6, 2024).unwrap();
    assert_eq!(key.to_string(), "06-2024");
}

#[test]
fn test_month_key_parse() {
    let key = MonthKey::parse("06-2024").unwrap();
    assert_eq!(key.month(), 6);
    assert_eq!(key.year(), 2024);
    assert_eq!(MonthKey::parse("6-2024").unwrap(), key);
}

#[test]
fn test_month_key_parse_rejects_garbage() {
    assert!(MonthKey::parse("2024-06").is_err());
    assert!(MonthKey::parse("13-2024").is_err());
    assert!(MonthKey::parse("00-2024").is_err());
    assert!(MonthKey::parse("june").is_err());
    assert!(MonthKey::parse("").is_err());
}

#[test]
fn test_month_key_orders_across_years() {
    let dec_2023 = MonthKey::parse("12-2023").unwrap();
    let jan_2024 = MonthKey::parse("01-2024").unwrap();
    assert!(dec_2023 < jan_2024);
    // the string forms sort the wrong way
    assert!(dec_2023.to_string() > jan_2024.to_string());
}

#[test]
fn test_month_key_navigation() {
    let jan = MonthKey::parse("01-2024").unwrap();
    assert_eq!(jan.previous().to_string(), "12-2023");
    assert_eq!(jan.next().to_string(), "02-2024");
    assert_eq!(MonthKey::parse("12-2024").unwrap().next().to_string(), "01-2025");
}

#[test]
fn test_month_key_distance() {
    let a = MonthKey::parse("11-2023").unwrap();
    let b = MonthKey::parse("02-2024").unwrap();
    assert_eq!(a.months_until(&b), 3);
    assert_eq!(b.months_until(&a), -3);
    assert_eq!(a.months_until(&a), 0);
}

#[test]
fn test_month_key_display_label() {
    assert_eq!(MonthKey::parse("06-2024").unwrap().display_label(), "Jun 2024");
}

// ── Split ─────────────────────────────────────────────────────

#[test]
fn test_default_split_is_valid() {
    assert!(Split::default_split().validate().is_ok());
}

#[test]
fn test_split_must_sum_to_100() {
    let split = Split::new(dec!(50), dec!(30), dec!(10));
    assert!(matches!(
        split.validate(),
        Err(crate::error::BudgetError::Validation(_))
    ));
}

#[test]
fn test_split_rejects_negative() {
    let split = Split::new(dec!(110), dec!(-10), dec!(0));
    assert!(split.validate().is_err());
}

#[test]
fn test_split_allows_zero_category() {
    let split = Split::new(dec!(60), dec!(40), dec!(0));
    assert!(split.validate().is_ok());
}

#[test]
fn test_split_allotment() {
    let split = Split::default_split();
    assert_eq!(split.allotment(dec!(4000), Category::Need).unwrap(), dec!(2000));
    assert_eq!(split.allotment(dec!(4000), Category::Want).unwrap(), dec!(1200));
    assert_eq!(split.allotment(dec!(4000), Category::Save).unwrap(), dec!(800));
}

#[test]
fn test_rebalance_takes_overflow_from_others_in_order() {
    let split = Split::default_split();
    let next = split.rebalance(Category::Save, dec!(40)).unwrap();
    // overflow of 20 comes out of need first
    assert_eq!(next, Split::new(dec!(30), dec!(30), dec!(40)));
    assert_eq!(next.total(), dec!(100));
}

#[test]
fn test_rebalance_keeps_others_at_least_one() {
    let split = Split::default_split();
    let next = split.rebalance(Category::Need, dec!(99)).unwrap();
    assert_eq!(next.want, dec!(1));
    assert_eq!(next.save, dec!(1));
    // 99 + 1 + 1 cannot fit; the result fails validation rather than dropping below 1%
    assert_eq!(next.total(), dec!(101));
    assert!(next.validate().is_err());
}

#[test]
fn test_rebalance_under_100_leaves_others_alone() {
    let split = Split::default_split();
    let next = split.rebalance(Category::Want, dec!(10)).unwrap();
    assert_eq!(next, Split::new(dec!(50), dec!(10), dec!(20)));
    assert!(next.validate().is_err());
}

#[test]
fn test_rebalance_rejects_out_of_range() {
    let split = Split::default_split();
    assert!(split.rebalance(Category::Need, dec!(0)).is_err());
    assert!(split.rebalance(Category::Need, dec!(100)).is_err());
}

// ── Template ──────────────────────────────────────────────────

#[test]
fn test_new_template_rejects_negative_income() {
    let t = NewTemplate::new(dec!(-1), Split::default_split());
    assert!(t.validate().is_err());
}

#[test]
fn test_new_template_rejects_duplicate_recurring_ids() {
    let mut t = NewTemplate::new(dec!(4000), Split::default_split());
    t.recurring.push(alloc("a", Category::Need, dec!(10)));
    t.recurring.push(alloc("a", Category::Want, dec!(20)));
    assert!(t.validate().is_err());
}

// ── Excess / ledger ───────────────────────────────────────────

#[test]
fn test_excess_compute() {
    let allocations = vec![
        alloc("a", Category::Need, dec!(500)),
        alloc("b", Category::Need, dec!(250.50)),
        alloc("c", Category::Save, dec!(900)),
    ];
    let excess = Excess::compute(dec!(4000), &Split::default_split(), &allocations).unwrap();
    assert_eq!(excess.need, dec!(1249.50));
    assert_eq!(excess.want, dec!(1200));
    // overspend goes negative
    assert_eq!(excess.save, dec!(-100));
    assert_eq!(excess.total(), dec!(2349.50));
}

#[test]
fn test_ledger_refresh_excess_uses_snapshot() {
    let mut ledger = MonthlyLedger {
        template_id: "t".into(),
        month: MonthKey::parse("06-2024").unwrap(),
        net_monthly_income: dec!(1000),
        split: Split::new(dec!(40), dec!(40), dec!(20)),
        allocations: vec![alloc("a", Category::Want, dec!(100))],
        excess: Excess::default(),
        created_at: String::new(),
    };
    ledger.refresh_excess().unwrap();
    assert_eq!(ledger.excess.need, dec!(400));
    assert_eq!(ledger.excess.want, dec!(300));
    assert_eq!(ledger.excess.save, dec!(200));
    assert_eq!(ledger.allocated(Category::Want).unwrap(), dec!(100));
    assert_eq!(ledger.in_category(Category::Want).count(), 1);
}

#[test]
fn test_excess_overflow_is_a_validation_error() {
    let split = Split::new(dec!(100), dec!(0), dec!(0));
    assert!(matches!(
        split.allotment(Decimal::MAX, Category::Need),
        Err(crate::BudgetError::Validation(_))
    ));

    let huge = vec![
        alloc("a", Category::Want, Decimal::MAX),
        alloc("b", Category::Want, Decimal::MAX),
    ];
    assert!(total_for(&huge, Category::Want).is_err());
    assert!(matches!(
        Excess::compute(dec!(4000), &Split::default_split(), &huge),
        Err(crate::BudgetError::Validation(_))
    ));

    // each category fits on its own but the grand total does not
    let spread = vec![
        alloc("a", Category::Need, Decimal::MAX),
        alloc("b", Category::Want, Decimal::MAX),
    ];
    assert!(Excess::compute(dec!(0), &Split::default_split(), &spread).is_err());
}

#[test]
fn test_income_must_leave_room_for_any_split() {
    assert!(validate_income(Decimal::MAX).is_err());
    assert!(validate_income(Decimal::MAX / dec!(1000)).is_ok());
    assert!(NewTemplate::new(Decimal::MAX, Split::default_split())
        .validate()
        .is_err());
}

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Expense, Settings};

const TODAY: &str = "2024-03-10";

fn make(amount: Decimal, date: &str, category: Category) -> Expense {
    Expense::new(amount, String::new(), date.into(), category, "INR".into())
}

fn settings_with_budget(budget: Decimal) -> Settings {
    let mut s = Settings::default();
    s.daily_budget = budget;
    s
}

// ── today_total ───────────────────────────────────────────────

#[test]
fn test_today_total_filters_by_date() {
    let expenses = vec![
        make(dec!(10), TODAY, Category::Food),
        make(dec!(5), "2024-03-09", Category::Food),
        make(dec!(7.5), TODAY, Category::Transport),
        make(dec!(100), "2023-12-31", Category::Rent),
    ];
    assert_eq!(today_total(&expenses, TODAY), dec!(17.5));
}

#[test]
fn test_today_total_empty() {
    assert_eq!(today_total(&[], TODAY), Decimal::ZERO);
}

// ── budget_status ─────────────────────────────────────────────

#[test]
fn test_zero_budget_disables_alerting() {
    let expenses = vec![make(dec!(9999), TODAY, Category::Food)];
    let status = budget_status(&expenses, &Settings::default(), TODAY);
    assert_eq!(status.percent, 0);
    assert_eq!(status.level, AlertLevel::Normal);
}

#[test]
fn test_alert_thresholds() {
    let settings = settings_with_budget(dec!(100));
    let cases = [
        (dec!(79), 79, AlertLevel::Normal),
        (dec!(80), 80, AlertLevel::Approaching),
        (dec!(100), 100, AlertLevel::Approaching),
        (dec!(101), 101, AlertLevel::Exceeded),
    ];
    for (spent, percent, level) in cases {
        let expenses = vec![make(spent, TODAY, Category::Food)];
        let status = budget_status(&expenses, &settings, TODAY);
        assert_eq!(status.spent_today, spent);
        assert_eq!(status.percent, percent, "spent {spent}");
        assert_eq!(status.level, level, "spent {spent}");
    }
}

#[test]
fn test_percent_rounds_half_away_from_zero() {
    let settings = settings_with_budget(dec!(200));
    // 79.5% rounds to 80, which trips Approaching.
    let expenses = vec![make(dec!(159), TODAY, Category::Food)];
    let status = budget_status(&expenses, &settings, TODAY);
    assert_eq!(status.percent, 80);
    assert_eq!(status.level, AlertLevel::Approaching);
}

#[test]
fn test_exceeded_needs_total_over_budget_not_percent() {
    let settings = settings_with_budget(dec!(100));
    // Exactly at budget: 100% but not exceeded.
    let expenses = vec![make(dec!(100), TODAY, Category::Food)];
    assert_eq!(
        budget_status(&expenses, &settings, TODAY).level,
        AlertLevel::Approaching
    );
}

#[test]
fn test_other_days_do_not_count_against_budget() {
    let settings = settings_with_budget(dec!(100));
    let expenses = vec![make(dec!(500), "2024-03-09", Category::Food)];
    let status = budget_status(&expenses, &settings, TODAY);
    assert_eq!(status.spent_today, Decimal::ZERO);
    assert_eq!(status.level, AlertLevel::Normal);
}

// ── Breakdowns ────────────────────────────────────────────────

#[test]
fn test_by_category_first_occurrence_order() {
    let expenses = vec![
        make(dec!(5), TODAY, Category::Transport),
        make(dec!(10), TODAY, Category::Food),
        make(dec!(2), TODAY, Category::Transport),
    ];
    let totals = by_category(&expenses);
    assert_eq!(
        totals,
        vec![
            (Category::Transport, dec!(7)),
            (Category::Food, dec!(10)),
        ]
    );
}

#[test]
fn test_by_day_ascending_date_order() {
    let expenses = vec![
        make(dec!(5), "2024-03-10", Category::Food),
        make(dec!(1), "2024-01-02", Category::Food),
        make(dec!(2), "2024-03-10", Category::Rent),
        make(dec!(4), "2023-12-31", Category::Food),
    ];
    let totals = by_day(&expenses);
    assert_eq!(
        totals,
        vec![
            ("2023-12-31".to_string(), dec!(4)),
            ("2024-01-02".to_string(), dec!(1)),
            ("2024-03-10".to_string(), dec!(7)),
        ]
    );
}

#[test]
fn test_breakdown_sums_agree_with_grand_total() {
    let expenses = vec![
        make(dec!(12.5), "2024-03-01", Category::Food),
        make(dec!(3.75), "2024-03-02", Category::Transport),
        make(dec!(99), "2024-03-02", Category::Rent),
        make(dec!(0.25), "2024-03-05", Category::Food),
    ];
    let grand: Decimal = expenses.iter().map(|e| e.amount).sum();
    let cat_sum: Decimal = by_category(&expenses).iter().map(|(_, v)| *v).sum();
    let day_sum: Decimal = by_day(&expenses).iter().map(|(_, v)| *v).sum();
    assert_eq!(cat_sum, grand);
    assert_eq!(day_sum, grand);
}

#[test]
fn test_breakdowns_empty() {
    assert!(by_category(&[]).is_empty());
    assert!(by_day(&[]).is_empty());
}

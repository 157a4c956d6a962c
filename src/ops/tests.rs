#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

fn fresh() -> (AppState, KvStore) {
    let store = KvStore::open_in_memory().unwrap();
    let state = AppState::load(&store);
    (state, store)
}

fn input(amount: &str, desc: &str) -> ExpenseInput {
    ExpenseInput {
        amount: amount.into(),
        description: desc.into(),
        date: "2024-03-10".into(),
        category: Category::Other,
        currency: String::new(),
    }
}

// ── Add ───────────────────────────────────────────────────────

#[test]
fn test_add_valid_expense() {
    let (mut state, store) = fresh();
    let expense = state.add_expense(&store, input("12.50", "tea")).unwrap();

    assert_eq!(expense.amount, dec!(12.50));
    assert_eq!(expense.description, "tea");
    assert_eq!(expense.date, "2024-03-10");
    assert_eq!(expense.currency, "INR");
    assert!(!expense.id.is_empty());
    assert_eq!(state.expenses.len(), 1);
    // Persisted immediately and readable within the session.
    assert_eq!(store.load_expenses(), state.expenses);
}

#[test]
fn test_add_rejects_invalid_amounts() {
    let (mut state, store) = fresh();
    for bad in ["abc", "-5", "0", "", "  ", "1.2.3"] {
        let err = state.add_expense(&store, input(bad, "x")).unwrap_err();
        assert_eq!(err, OpError::InvalidAmount, "amount {bad:?}");
    }
    assert!(state.expenses.is_empty());
    assert!(store.load_expenses().is_empty());
}

#[test]
fn test_add_autocategorizes_from_description() {
    let (mut state, store) = fresh();
    let expense = state
        .add_expense(&store, input("4.50", "Bought lunch at cafe"))
        .unwrap();
    assert_eq!(expense.category, Category::Food);
}

#[test]
fn test_add_keeps_selection_when_no_keyword_matches() {
    let (mut state, store) = fresh();
    let mut inp = input("4.50", "mystery purchase");
    inp.category = Category::Entertainment;
    let expense = state.add_expense(&store, inp).unwrap();
    assert_eq!(expense.category, Category::Entertainment);
}

#[test]
fn test_add_respects_autocat_disabled() {
    let (mut state, store) = fresh();
    state.settings.auto_categorize = false;
    let mut inp = input("4.50", "Bought lunch at cafe");
    inp.category = Category::Office;
    let expense = state.add_expense(&store, inp).unwrap();
    assert_eq!(expense.category, Category::Office);
}

#[test]
fn test_add_skips_autocat_for_empty_description() {
    let (mut state, store) = fresh();
    let mut inp = input("4.50", "   ");
    inp.category = Category::Groceries;
    let expense = state.add_expense(&store, inp).unwrap();
    assert_eq!(expense.category, Category::Groceries);
    assert_eq!(expense.description, "");
}

#[test]
fn test_add_defaults_date_and_currency() {
    let (mut state, store) = fresh();
    let mut inp = input("1", "x");
    inp.date = String::new();
    inp.currency = "usd".into();
    let expense = state.add_expense(&store, inp).unwrap();
    assert_eq!(expense.date, today());
    assert_eq!(expense.currency, "USD");

    let mut inp = input("1", "x");
    inp.date = "not-a-date".into();
    let expense = state.add_expense(&store, inp).unwrap();
    assert_eq!(expense.date, today());
}

#[test]
fn test_add_preserves_insertion_order() {
    let (mut state, store) = fresh();
    state.add_expense(&store, input("1", "first")).unwrap();
    state.add_expense(&store, input("2", "second")).unwrap();
    state.add_expense(&store, input("3", "third")).unwrap();
    let descs: Vec<&str> = state.expenses.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descs, vec!["first", "second", "third"]);
}

// ── Delete / Clear ────────────────────────────────────────────

#[test]
fn test_delete_existing() {
    let (mut state, store) = fresh();
    let expense = state.add_expense(&store, input("1", "x")).unwrap();
    assert!(state.delete_expense(&store, &expense.id));
    assert!(state.expenses.is_empty());
    assert!(store.load_expenses().is_empty());
}

#[test]
fn test_delete_missing_is_noop() {
    let (mut state, store) = fresh();
    state.add_expense(&store, input("1", "x")).unwrap();
    let before = state.expenses.clone();
    assert!(!state.delete_expense(&store, "no-such-id"));
    assert_eq!(state.expenses, before);
}

#[test]
fn test_clear_all() {
    let (mut state, store) = fresh();
    state.add_expense(&store, input("1", "x")).unwrap();
    state.add_expense(&store, input("2", "y")).unwrap();
    state.clear_expenses(&store);
    assert!(state.expenses.is_empty());
    assert!(store.load_expenses().is_empty());
}

// ── Update settings ───────────────────────────────────────────

#[test]
fn test_update_settings_persists_and_merges_keywords() {
    let (mut state, store) = fresh();
    state.update_settings(&store, "100", true, "pizza:Food,gym:Healthcare");

    assert_eq!(state.settings.daily_budget, dec!(100));
    let reloaded = store.load_settings();
    assert_eq!(reloaded.keyword_map.get("pizza"), Some(&Category::Food));
    assert_eq!(reloaded.keyword_map.get("gym"), Some(&Category::Healthcare));

    // Built-ins still apply alongside user entries.
    let cat = crate::categorize::Categorizer::new(&reloaded);
    assert_eq!(cat.categorize("uber home"), Some(Category::Transport));
    assert_eq!(cat.categorize("pizza night"), Some(Category::Food));
}

#[test]
fn test_update_settings_coerces_bad_budget_to_zero() {
    let (mut state, store) = fresh();
    for bad in ["", "abc", "-5"] {
        state.update_settings(&store, bad, true, "");
        assert_eq!(state.settings.daily_budget, Decimal::ZERO, "budget {bad:?}");
    }
}

#[test]
fn test_update_settings_overrides_same_key() {
    let (mut state, store) = fresh();
    state.update_settings(&store, "0", true, "gym:Healthcare");
    state.update_settings(&store, "0", true, "gym:Entertainment");
    assert_eq!(
        state.settings.keyword_map.get("gym"),
        Some(&Category::Entertainment)
    );
}

#[test]
fn test_update_settings_does_not_recategorize() {
    let (mut state, store) = fresh();
    let expense = state.add_expense(&store, input("5", "gym session")).unwrap();
    assert_eq!(expense.category, Category::Other);

    state.update_settings(&store, "0", true, "gym:Healthcare");
    assert_eq!(state.expenses[0].category, Category::Other);
}

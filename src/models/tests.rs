#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use super::*;

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse_case_insensitive() {
    assert_eq!(Category::parse("food"), Some(Category::Food));
    assert_eq!(Category::parse("FOOD"), Some(Category::Food));
    assert_eq!(Category::parse(" Healthcare "), Some(Category::Healthcare));
    assert_eq!(Category::parse("snacks"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn test_category_roundtrip_names() {
    for cat in Category::all() {
        assert_eq!(Category::parse(cat.as_str()), Some(*cat));
    }
}

#[test]
fn test_category_unknown_deserializes_to_other() {
    let cat: Category = serde_json::from_value(json!("Snacks")).unwrap();
    assert_eq!(cat, Category::Other);
}

// ── Expense wire format ───────────────────────────────────────

#[test]
fn test_expense_serializes_wire_field_names() {
    let e = Expense {
        id: "a1".into(),
        amount: dec!(12.5),
        description: "tea".into(),
        date: "2024-01-01".into(),
        category: Category::Food,
        currency: "INR".into(),
        created_at: "2024-01-01T00:00:00Z".into(),
    };
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["desc"], "tea");
    assert_eq!(v["created"], "2024-01-01T00:00:00Z");
    assert_eq!(v["amount"], json!(12.5));
    assert_eq!(v["category"], "Food");
}

#[test]
fn test_expense_new_assigns_unique_ids() {
    let a = Expense::new(dec!(1), String::new(), "2024-01-01".into(), Category::Other, "INR".into());
    let b = Expense::new(dec!(1), String::new(), "2024-01-01".into(), Category::Other, "INR".into());
    assert_ne!(a.id, b.id);
    assert!(!a.created_at.is_empty());
}

// ── Settings decode ───────────────────────────────────────────

#[test]
fn test_settings_from_json_full() {
    let v = json!({
        "dailyBudget": 150.0,
        "autoCat": false,
        "keywordMap": {"Pizza": "Food", "gym": "Healthcare"}
    });
    let s = Settings::from_json(&v);
    assert_eq!(s.daily_budget, dec!(150));
    assert!(!s.auto_categorize);
    assert_eq!(s.keyword_map.get("pizza"), Some(&Category::Food));
    assert_eq!(s.keyword_map.get("gym"), Some(&Category::Healthcare));
}

#[test]
fn test_settings_from_json_falls_back_per_field() {
    // Budget is garbage, the rest should still load.
    let v = json!({
        "dailyBudget": "lots",
        "autoCat": false,
        "keywordMap": {"gym": "Healthcare"}
    });
    let s = Settings::from_json(&v);
    assert_eq!(s.daily_budget, Decimal::ZERO);
    assert!(!s.auto_categorize);
    assert_eq!(s.keyword_map.get("gym"), Some(&Category::Healthcare));
}

#[test]
fn test_settings_from_json_negative_budget_rejected() {
    let s = Settings::from_json(&json!({"dailyBudget": -10.0}));
    assert_eq!(s.daily_budget, Decimal::ZERO);
}

#[test]
fn test_settings_from_json_unknown_keyword_category_skipped() {
    let v = json!({"keywordMap": {"pizza": "Snacks", "gym": "Healthcare"}});
    let s = Settings::from_json(&v);
    assert!(!s.keyword_map.contains_key("pizza"));
    assert_eq!(s.keyword_map.get("gym"), Some(&Category::Healthcare));
}

#[test]
fn test_settings_from_json_empty_blob_is_default() {
    let s = Settings::from_json(&json!({}));
    assert_eq!(s, Settings::default());
    assert!(s.auto_categorize);
}

#[test]
fn test_settings_serializes_wire_field_names() {
    let mut s = Settings::default();
    s.daily_budget = dec!(200);
    s.keyword_map.insert("gym".into(), Category::Healthcare);
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["dailyBudget"], json!(200.0));
    assert_eq!(v["autoCat"], json!(true));
    assert_eq!(v["keywordMap"]["gym"], "Healthcare");
}

// ── Keyword pair parsing ──────────────────────────────────────

#[test]
fn test_parse_keyword_pairs() {
    let pairs = parse_keyword_pairs("pizza:Food,gym:Healthcare");
    assert_eq!(
        pairs,
        vec![
            ("pizza".to_string(), Category::Food),
            ("gym".to_string(), Category::Healthcare),
        ]
    );
}

#[test]
fn test_parse_keyword_pairs_lowercases_and_trims() {
    let pairs = parse_keyword_pairs(" PIZZA : food , ");
    assert_eq!(pairs, vec![("pizza".to_string(), Category::Food)]);
}

#[test]
fn test_parse_keyword_pairs_skips_bad_entries() {
    let pairs = parse_keyword_pairs("pizza:Snacks,no-colon,gym:Healthcare,:Food,x:");
    assert_eq!(pairs, vec![("gym".to_string(), Category::Healthcare)]);
}

#[test]
fn test_parse_keyword_pairs_empty_input() {
    assert!(parse_keyword_pairs("").is_empty());
}

#[test]
fn test_format_keyword_pairs_roundtrip() {
    let mut map = std::collections::BTreeMap::new();
    map.insert("gym".to_string(), Category::Healthcare);
    map.insert("pizza".to_string(), Category::Food);
    let text = format_keyword_pairs(&map);
    assert_eq!(text, "gym:Healthcare,pizza:Food");
    let parsed: std::collections::BTreeMap<_, _> =
        parse_keyword_pairs(&text).into_iter().collect();
    assert_eq!(parsed, map);
}

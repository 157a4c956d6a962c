#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

fn sample() -> Expense {
    Expense {
        id: "a1".into(),
        amount: dec!(12.5),
        description: "tea".into(),
        date: "2024-01-01".into(),
        category: Category::Food,
        currency: "INR".into(),
        created_at: "2024-01-01T09:30:00+00:00".into(),
    }
}

fn csv_string(expenses: &[Expense]) -> String {
    let mut buf = Vec::new();
    write_csv(&mut buf, expenses).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_csv_single_expense_two_lines_in_header_order() {
    let out = csv_string(&[sample()]);
    let lines: Vec<&str> = out.trim_end().lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "\"id\",\"amount\",\"currency\",\"category\",\"desc\",\"date\",\"created\""
    );
    assert_eq!(
        lines[1],
        "\"a1\",\"12.5\",\"INR\",\"Food\",\"tea\",\"2024-01-01\",\"2024-01-01T09:30:00+00:00\""
    );
}

#[test]
fn test_csv_empty_collection_is_header_only() {
    let out = csv_string(&[]);
    assert_eq!(out.trim_end().lines().count(), 1);
}

#[test]
fn test_csv_escapes_embedded_quotes_and_commas() {
    let mut e = sample();
    e.description = "tea, \"chai\"".into();
    let out = csv_string(&[e]);
    assert!(out.contains("\"tea, \"\"chai\"\"\""));
}

#[test]
fn test_csv_file_export_row_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let count = export_csv(&path, &[sample(), sample()]).unwrap();
    assert_eq!(count, 2);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.trim_end().lines().count(), 3);
}

#[test]
fn test_json_export_is_full_state_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    export_json(&path, &[sample()]).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let items = value["expenses"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "a1");
    assert_eq!(items[0]["desc"], "tea");
    assert_eq!(items[0]["created"], "2024-01-01T09:30:00+00:00");
}

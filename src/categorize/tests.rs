#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{Category, Settings};

fn settings_with(pairs: &[(&str, Category)]) -> Settings {
    let mut settings = Settings::default();
    for (k, c) in pairs {
        settings.keyword_map.insert((*k).to_string(), *c);
    }
    settings
}

// ── Matching ──────────────────────────────────────────────────

#[test]
fn test_builtin_keyword_match() {
    let cat = Categorizer::new(&Settings::default());
    assert_eq!(cat.categorize("Bought lunch at cafe"), Some(Category::Food));
    assert_eq!(cat.categorize("uber to airport"), Some(Category::Transport));
}

#[test]
fn test_case_insensitive() {
    let cat = Categorizer::new(&Settings::default());
    assert_eq!(cat.categorize("UBER RIDE"), Some(Category::Transport));
    assert_eq!(cat.categorize("Uber Ride"), Some(Category::Transport));
}

#[test]
fn test_no_match() {
    let cat = Categorizer::new(&Settings::default());
    assert_eq!(cat.categorize("mystery purchase"), None);
}

#[test]
fn test_empty_description() {
    let cat = Categorizer::new(&Settings::default());
    assert_eq!(cat.categorize(""), None);
}

#[test]
fn test_first_match_wins() {
    // "coffee" precedes "rent" in the built-in table; a description
    // containing both resolves to the earlier entry.
    let cat = Categorizer::new(&Settings::default());
    assert_eq!(
        cat.categorize("coffee near the rent office"),
        Some(Category::Food)
    );
}

#[test]
fn test_substring_match() {
    // Keyword containment, not word match.
    let cat = Categorizer::new(&Settings::default());
    assert_eq!(cat.categorize("airbus tickets"), Some(Category::Transport));
}

// ── Entry ordering ────────────────────────────────────────────

#[test]
fn test_user_override_replaces_builtin_in_place() {
    let settings = settings_with(&[("coffee", Category::Entertainment)]);
    let cat = Categorizer::new(&settings);
    assert_eq!(cat.categorize("morning coffee"), Some(Category::Entertainment));
    // Position is unchanged: still first in the table.
    assert_eq!(
        cat.entries().first().map(|(k, c)| (k.as_str(), *c)),
        Some(("coffee", Category::Entertainment))
    );
}

#[test]
fn test_new_user_keys_appended_after_builtins() {
    let settings = settings_with(&[
        ("pizza", Category::Food),
        ("gym", Category::Healthcare),
    ]);
    let cat = Categorizer::new(&settings);
    let builtin_count = crate::models::BUILTIN_KEYWORDS.len();
    let appended: Vec<&str> = cat.entries()[builtin_count..]
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    // BTreeMap order: ascending keyword.
    assert_eq!(appended, vec!["gym", "pizza"]);
}

#[test]
fn test_builtins_beat_later_user_keys() {
    // "lunchbox" would match the user key, but "lunch" is scanned first.
    let settings = settings_with(&[("lunchbox", Category::Office)]);
    let cat = Categorizer::new(&settings);
    assert_eq!(cat.categorize("new lunchbox"), Some(Category::Food));
}

use std::collections::BTreeMap;

use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Category;

/// Built-in keyword table, scanned before user-defined entries. A user
/// entry with the same keyword overrides the value at this position.
pub const BUILTIN_KEYWORDS: &[(&str, Category)] = &[
    ("coffee", Category::Food),
    ("lunch", Category::Food),
    ("bus", Category::Transport),
    ("uber", Category::Transport),
    ("rent", Category::Rent),
    ("electricity", Category::Utilities),
    ("amazon", Category::Office),
    ("medical", Category::Healthcare),
    ("pharmacy", Category::Healthcare),
];

/// Persisted singleton configuration. Mutated only by the update-settings
/// operation, which persists immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Daily spending ceiling. Zero means no budget is set and disables
    /// alerting.
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_budget: Decimal,
    #[serde(rename = "autoCat")]
    pub auto_categorize: bool,
    /// User-defined keyword -> category entries. Keys are lowercase.
    /// Extends and overrides the built-in table, never deletes from it.
    pub keyword_map: BTreeMap<String, Category>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_budget: Decimal::ZERO,
            auto_categorize: true,
            keyword_map: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Decode a persisted settings blob, falling back per-field so one bad
    /// field cannot discard the rest.
    pub fn from_json(value: &Value) -> Self {
        let mut settings = Settings::default();

        if let Some(v) = value.get("dailyBudget") {
            match v.as_f64().and_then(Decimal::from_f64) {
                Some(d) if d >= Decimal::ZERO => settings.daily_budget = d,
                _ => warn!("settings: ignoring invalid dailyBudget: {v}"),
            }
        }

        if let Some(v) = value.get("autoCat") {
            match v.as_bool() {
                Some(b) => settings.auto_categorize = b,
                None => warn!("settings: ignoring invalid autoCat: {v}"),
            }
        }

        if let Some(v) = value.get("keywordMap") {
            match v.as_object() {
                Some(map) => {
                    for (keyword, cat) in map {
                        match cat.as_str().and_then(Category::parse) {
                            Some(category) => {
                                settings
                                    .keyword_map
                                    .insert(keyword.to_lowercase(), category);
                            }
                            None => {
                                warn!("settings: ignoring keyword '{keyword}' with unknown category: {cat}");
                            }
                        }
                    }
                }
                None => warn!("settings: ignoring invalid keywordMap: {v}"),
            }
        }

        settings
    }
}

/// Parse a `"keyword:Category,keyword:Category"` string into lowercase
/// keyword pairs. Blank pairs and pairs naming unknown categories are
/// skipped.
pub fn parse_keyword_pairs(input: &str) -> Vec<(String, Category)> {
    let mut pairs = Vec::new();
    for part in input.split(',') {
        let mut halves = part.splitn(2, ':');
        let keyword = halves.next().unwrap_or("").trim();
        let category_name = halves.next().unwrap_or("").trim();
        if keyword.is_empty() || category_name.is_empty() {
            continue;
        }
        match Category::parse(category_name) {
            Some(category) => pairs.push((keyword.to_lowercase(), category)),
            None => warn!("keyword pair '{part}' names unknown category '{category_name}', skipped"),
        }
    }
    pairs
}

/// Render a keyword map back to the `"keyword:Category,..."` text form.
pub fn format_keyword_pairs(map: &BTreeMap<String, Category>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(",")
}

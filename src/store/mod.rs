use anyhow::{Context, Result};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::models::{Expense, Settings};

pub(crate) const KEY_EXPENSES: &str = "expenses_v1";
pub(crate) const KEY_SETTINGS: &str = "settings_v1";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS blobs (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Key-value blob store backing all persistence. Each key holds one JSON
/// blob and is written atomically; a write is readable by the next read in
/// the same session. Loads never fail: anything absent or undecodable
/// yields the declared default and a log warning.
pub(crate) struct KvStore {
    conn: Connection,
}

impl KvStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize store schema")?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn load_raw(&self, key: &str) -> Option<Value> {
        let text: Option<String> = match self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
        {
            Ok(t) => t,
            Err(e) => {
                warn!("store: read of '{key}' failed, using defaults: {e}");
                return None;
            }
        };

        let text = text?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("store: blob '{key}' is not valid JSON, using defaults: {e}");
                None
            }
        }
    }

    /// Serialize and persist one blob synchronously. Callers treat failure
    /// as a best-effort miss: log it, never abort the operation.
    pub(crate) fn store_raw<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)
            .with_context(|| format!("Failed to encode blob '{key}'"))?;
        self.conn
            .execute(
                "INSERT INTO blobs (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, text],
            )
            .with_context(|| format!("Failed to write blob '{key}'"))?;
        Ok(())
    }

    // ── Expenses blob ─────────────────────────────────────────

    /// Load the expense collection. Individual records that fail to decode
    /// are skipped so one corrupt entry cannot discard the rest.
    pub(crate) fn load_expenses(&self) -> Vec<Expense> {
        let Some(blob) = self.load_raw(KEY_EXPENSES) else {
            return Vec::new();
        };
        let Some(items) = blob.get("expenses").and_then(Value::as_array) else {
            warn!("store: '{KEY_EXPENSES}' has no expenses array, starting empty");
            return Vec::new();
        };

        let mut expenses = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Expense>(item.clone()) {
                Ok(expense) => expenses.push(expense),
                Err(e) => warn!("store: skipping undecodable expense record: {e}"),
            }
        }
        expenses
    }

    pub(crate) fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        self.store_raw(KEY_EXPENSES, &serde_json::json!({ "expenses": expenses }))
    }

    // ── Settings blob ─────────────────────────────────────────

    pub(crate) fn load_settings(&self) -> Settings {
        match self.load_raw(KEY_SETTINGS) {
            Some(blob) => Settings::from_json(&blob),
            None => Settings::default(),
        }
    }

    pub(crate) fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.store_raw(KEY_SETTINGS, settings)
    }
}

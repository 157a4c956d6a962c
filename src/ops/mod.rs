use std::str::FromStr;

use chrono::{Local, NaiveDate};
use log::warn;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::categorize::Categorizer;
use crate::models::{parse_keyword_pairs, Category, Expense, Settings};
use crate::store::KvStore;

pub(crate) const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum OpError {
    #[error("Enter a valid positive amount")]
    InvalidAmount,
}

/// Raw add-expense input as the user typed it. Validation and defaulting
/// happen in `add_expense`, never at the call site.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseInput {
    pub(crate) amount: String,
    pub(crate) description: String,
    /// Empty or unparseable dates coerce to today.
    pub(crate) date: String,
    pub(crate) category: Category,
    /// Empty coerces to the default currency.
    pub(crate) currency: String,
}

/// In-memory application state: the expense collection plus settings.
/// Every mutation is a state transition followed by an immediate
/// best-effort persistence write; a failed write is logged and never
/// fails the operation.
pub(crate) struct AppState {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) settings: Settings,
}

impl AppState {
    pub(crate) fn load(store: &KvStore) -> Self {
        Self {
            expenses: store.load_expenses(),
            settings: store.load_settings(),
        }
    }

    /// Validate, categorize, append, persist. On `InvalidAmount` the
    /// collection is untouched and nothing is persisted.
    pub(crate) fn add_expense(
        &mut self,
        store: &KvStore,
        input: ExpenseInput,
    ) -> Result<Expense, OpError> {
        let amount = Decimal::from_str(input.amount.trim()).map_err(|_| OpError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(OpError::InvalidAmount);
        }

        let description = input.description.trim().to_string();

        let date = match NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d") {
            Ok(d) => d.format("%Y-%m-%d").to_string(),
            Err(_) => {
                if !input.date.trim().is_empty() {
                    warn!("add: unparseable date '{}', using today", input.date);
                }
                today()
            }
        };

        let category = if self.settings.auto_categorize && !description.is_empty() {
            Categorizer::new(&self.settings)
                .categorize(&description)
                .unwrap_or(input.category)
        } else {
            input.category
        };

        let currency = if input.currency.trim().is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            input.currency.trim().to_uppercase()
        };

        let expense = Expense::new(amount, description, date, category, currency);
        self.expenses.push(expense.clone());
        self.persist_expenses(store);
        Ok(expense)
    }

    /// Remove by id. Silent no-op when the id is unknown.
    pub(crate) fn delete_expense(&mut self, store: &KvStore, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return false;
        }
        self.persist_expenses(store);
        true
    }

    /// Irreversible; callers obtain explicit confirmation first.
    pub(crate) fn clear_expenses(&mut self, store: &KvStore) {
        self.expenses.clear();
        self.persist_expenses(store);
    }

    /// Invalid, empty, or negative budget text coerces to zero; keyword
    /// pairs merge into the user map (new keys override same-named ones).
    /// Existing expenses are never re-categorized.
    pub(crate) fn update_settings(
        &mut self,
        store: &KvStore,
        budget: &str,
        auto_categorize: bool,
        keyword_pairs: &str,
    ) {
        self.settings.daily_budget = Decimal::from_str(budget.trim())
            .ok()
            .filter(|b| *b >= Decimal::ZERO)
            .unwrap_or(Decimal::ZERO);
        self.settings.auto_categorize = auto_categorize;
        for (keyword, category) in parse_keyword_pairs(keyword_pairs) {
            self.settings.keyword_map.insert(keyword, category);
        }

        if let Err(e) = store.save_settings(&self.settings) {
            warn!("settings write failed, continuing with in-memory state: {e:#}");
        }
    }

    fn persist_expenses(&self, store: &KvStore) {
        if let Err(e) = store.save_expenses(&self.expenses) {
            warn!("expense write failed, continuing with in-memory state: {e:#}");
        }
    }
}

/// Today's local calendar date as ISO `YYYY-MM-DD`.
pub(crate) fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Category, Expense, Settings};

/// Percent of budget at which the Approaching alert fires.
const APPROACHING_PERCENT: u32 = 80;

/// Exactly one alert state holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertLevel {
    Normal,
    Approaching,
    Exceeded,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "OK"),
            Self::Approaching => write!(f, "Approaching budget limit"),
            Self::Exceeded => write!(f, "Daily budget exceeded"),
        }
    }
}

/// Today's spend measured against the configured daily budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) spent_today: Decimal,
    /// `round(spent / budget * 100)`, 0 when no budget is set.
    pub(crate) percent: u32,
    pub(crate) level: AlertLevel,
}

/// Sum of amounts dated `today` (ISO `YYYY-MM-DD`).
pub(crate) fn today_total(expenses: &[Expense], today: &str) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.date == today)
        .map(|e| e.amount)
        .sum()
}

/// Pure function of the expense collection and settings; a zero budget
/// means "no budget set" and always reports Normal with 0%.
pub(crate) fn budget_status(expenses: &[Expense], settings: &Settings, today: &str) -> BudgetStatus {
    let spent_today = today_total(expenses, today);
    let budget = settings.daily_budget;

    if budget <= Decimal::ZERO {
        return BudgetStatus {
            spent_today,
            percent: 0,
            level: AlertLevel::Normal,
        };
    }

    // Half-away-from-zero, not the Decimal default banker's rounding.
    let percent = (spent_today / budget * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);

    let level = if spent_today > budget {
        AlertLevel::Exceeded
    } else if percent >= APPROACHING_PERCENT {
        AlertLevel::Approaching
    } else {
        AlertLevel::Normal
    };

    BudgetStatus {
        spent_today,
        percent,
        level,
    }
}

/// Per-category totals over ALL expenses, in order of each category's
/// first occurrence (stable chart coloring).
pub(crate) fn by_category(expenses: &[Expense]) -> Vec<(Category, Decimal)> {
    let mut totals: Vec<(Category, Decimal)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(c, _)| *c == expense.category) {
            Some(entry) => entry.1 += expense.amount,
            None => totals.push((expense.category, expense.amount)),
        }
    }
    totals
}

/// Per-day totals over ALL expenses, keyed by ISO date in ascending
/// (= chronological) order.
pub(crate) fn by_day(expenses: &[Expense]) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.date.as_str()).or_default() += expense.amount;
    }
    totals
        .into_iter()
        .map(|(date, total)| (date.to_string(), total))
        .collect()
}

#[cfg(test)]
mod tests;

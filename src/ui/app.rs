use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::models::{format_keyword_pairs, Category, Expense};
use crate::notify::{notify_best_effort, LogNotifier, Notifier};
use crate::ops::{self, AppState, DEFAULT_CURRENCY};
use crate::report::{self, AlertLevel, BudgetStatus};
use crate::ui::util::format_money;

/// Transient status messages self-clear after this long.
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Settings,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Settings]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending destructive action awaiting confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: String, label: String },
    ClearAll,
}

/// The add-expense form. Text fields plus a cycling category selector.
#[derive(Debug, Clone)]
pub(crate) struct AddForm {
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) date: String,
    pub(crate) category_index: usize,
    pub(crate) currency: String,
    pub(crate) focus: usize,
}

impl AddForm {
    pub(crate) const FIELD_COUNT: usize = 5;
    pub(crate) const FIELD_CATEGORY: usize = 3;

    pub(crate) fn new() -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            date: ops::today(),
            category_index: Category::all().len() - 1, // Other
            currency: DEFAULT_CURRENCY.to_string(),
            focus: 0,
        }
    }

    pub(crate) fn category(&self) -> Category {
        Category::all()
            .get(self.category_index)
            .copied()
            .unwrap_or(Category::Other)
    }

    /// The focused text buffer, or `None` when the category selector has
    /// focus.
    pub(crate) fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.amount),
            1 => Some(&mut self.description),
            2 => Some(&mut self.date),
            4 => Some(&mut self.currency),
            _ => None,
        }
    }

    pub(crate) fn cycle_category(&mut self, delta: i32) {
        let len = Category::all().len() as i32;
        let next = (self.category_index as i32 + delta).rem_euclid(len);
        self.category_index = next as usize;
    }
}

/// The settings form: budget text, auto-categorize toggle, keyword pairs.
#[derive(Debug, Clone)]
pub(crate) struct SettingsForm {
    pub(crate) budget: String,
    pub(crate) auto_categorize: bool,
    pub(crate) keywords: String,
    pub(crate) focus: usize,
}

impl SettingsForm {
    pub(crate) const FIELD_COUNT: usize = 3;
    pub(crate) const FIELD_AUTOCAT: usize = 1;

    pub(crate) fn from_state(state: &AppState) -> Self {
        let budget = if state.settings.daily_budget > Decimal::ZERO {
            state.settings.daily_budget.to_string()
        } else {
            String::new()
        };
        Self {
            budget,
            auto_categorize: state.settings.auto_categorize,
            // Saving re-merges these same pairs, which is a no-op; new
            // pairs typed at the end are added.
            keywords: format_keyword_pairs(&state.settings.keyword_map),
            focus: 0,
        }
    }

    pub(crate) fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.budget),
            2 => Some(&mut self.keywords),
            _ => None,
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    status_since: Option<Instant>,
    pub(crate) show_help: bool,

    // Aggregates recomputed after every mutation
    pub(crate) budget: BudgetStatus,
    pub(crate) by_category: Vec<(Category, Decimal)>,
    pub(crate) by_day: Vec<(String, Decimal)>,
    /// Display order: newest first.
    pub(crate) rows: Vec<Expense>,

    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) visible_rows: usize,

    pub(crate) add_form: Option<AddForm>,
    pub(crate) settings_form: Option<SettingsForm>,

    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    prev_alert: AlertLevel,
    notifier: Box<dyn Notifier>,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            status_since: None,
            show_help: false,

            budget: BudgetStatus {
                spent_today: Decimal::ZERO,
                percent: 0,
                level: AlertLevel::Normal,
            },
            by_category: Vec::new(),
            by_day: Vec::new(),
            rows: Vec::new(),

            expense_index: 0,
            expense_scroll: 0,
            visible_rows: 10,

            add_form: None,
            settings_form: None,

            pending_action: None,
            confirm_message: String::new(),

            prev_alert: AlertLevel::Normal,
            notifier: Box::new(LogNotifier),
        }
    }

    /// Recompute every aggregate from domain state. Fires the budget
    /// notification when the alert level newly enters Exceeded.
    pub(crate) fn refresh(&mut self, state: &AppState) {
        let today = ops::today();
        self.budget = report::budget_status(&state.expenses, &state.settings, &today);
        self.by_category = report::by_category(&state.expenses);
        self.by_day = report::by_day(&state.expenses);
        self.rows = state.expenses.iter().rev().cloned().collect();

        if self.expense_index >= self.rows.len() {
            self.expense_index = self.rows.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }

        if self.budget.level == AlertLevel::Exceeded && self.prev_alert != AlertLevel::Exceeded {
            let currency = self
                .rows
                .first()
                .map(|e| e.currency.as_str())
                .unwrap_or(DEFAULT_CURRENCY);
            notify_best_effort(
                self.notifier.as_ref(),
                "Budget exceeded",
                &format!(
                    "You spent {} today (budget {})",
                    format_money(self.budget.spent_today, currency),
                    format_money(state.settings.daily_budget, currency),
                ),
            );
        }
        self.prev_alert = self.budget.level;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_since = Some(Instant::now());
    }

    /// Expire the transient status message. Called every poll tick.
    pub(crate) fn tick(&mut self) {
        if let Some(since) = self.status_since {
            if since.elapsed() >= STATUS_TTL {
                self.status_message.clear();
                self.status_since = None;
            }
        }
    }

    /// The expense under the cursor, in display (newest-first) order.
    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.rows.get(self.expense_index)
    }
}

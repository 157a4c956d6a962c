use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::Category;
use crate::ops::{today, AppState, ExpenseInput};
use crate::store::KvStore;
use crate::ui::util::format_money;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut AppState, &KvStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Kharch", cmd_quit, r);
    register_command!("quit", "Quit Kharch", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("s", "Go to Settings", cmd_settings, r);
    register_command!("settings", "Go to Settings", cmd_settings, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-01-15 4.50 coffee at cafe)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 4.50 coffee)", cmd_add, r);
    register_command!("budget", "Set daily budget (e.g. :budget 150)", cmd_budget, r);
    register_command!(
        "autocat",
        "Toggle auto-categorization (:autocat on|off)",
        cmd_autocat,
        r
    );
    register_command!(
        "keyword",
        "Add keyword rules (e.g. :keyword pizza:Food,gym:Healthcare)",
        cmd_keyword,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!(
        "export-json",
        "Export full state as JSON (e.g. :export-json ~/expenses.json)",
        cmd_export_json,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("clear", "Delete ALL expenses", cmd_clear, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    state: &mut AppState,
    store: &KvStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, state, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(state);
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(state);
    Ok(())
}

fn cmd_settings(_args: &str, app: &mut App, state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    app.screen = Screen::Settings;
    app.refresh(state);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add [YYYY-MM-DD] <amount> [description...]`
fn cmd_add(args: &str, app: &mut App, state: &mut AppState, store: &KvStore) -> anyhow::Result<()> {
    let mut tokens = args.split_whitespace().peekable();

    let date = match tokens.peek() {
        Some(t) if NaiveDate::parse_from_str(t, "%Y-%m-%d").is_ok() => {
            tokens.next().unwrap_or_default().to_string()
        }
        _ => String::new(),
    };

    let Some(amount) = tokens.next() else {
        app.set_status("Usage: :add [YYYY-MM-DD] <amount> [description...]");
        return Ok(());
    };
    let description = tokens.collect::<Vec<_>>().join(" ");

    let input = ExpenseInput {
        amount: amount.to_string(),
        description,
        date,
        category: Category::Other,
        currency: String::new(),
    };

    match state.add_expense(store, input) {
        Ok(expense) => {
            app.refresh(state);
            app.set_status(format!(
                "Added {} ({})",
                format_money(expense.amount, &expense.currency),
                expense.category
            ));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, state: &mut AppState, store: &KvStore) -> anyhow::Result<()> {
    let auto = state.settings.auto_categorize;
    state.update_settings(store, args, auto, "");
    app.refresh(state);
    if state.settings.daily_budget > rust_decimal::Decimal::ZERO {
        app.set_status(format!("Daily budget set to {}", state.settings.daily_budget));
    } else {
        app.set_status("Daily budget cleared (alerts disabled)");
    }
    Ok(())
}

fn cmd_autocat(args: &str, app: &mut App, state: &mut AppState, store: &KvStore) -> anyhow::Result<()> {
    let enabled = match args.to_lowercase().as_str() {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        "" => !state.settings.auto_categorize,
        other => {
            app.set_status(format!("Expected on or off, got '{other}'"));
            return Ok(());
        }
    };
    let budget = state.settings.daily_budget.to_string();
    state.update_settings(store, &budget, enabled, "");
    app.set_status(if enabled {
        "Auto-categorization enabled"
    } else {
        "Auto-categorization disabled"
    });
    Ok(())
}

fn cmd_keyword(args: &str, app: &mut App, state: &mut AppState, store: &KvStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :keyword <keyword:Category,...>");
        return Ok(());
    }
    let before = state.settings.keyword_map.len();
    let budget = state.settings.daily_budget.to_string();
    let auto = state.settings.auto_categorize;
    state.update_settings(store, &budget, auto, args);
    let added = state.settings.keyword_map.len() - before;
    app.set_status(format!("Keyword map updated ({added} new)"));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, state: &mut AppState, store: &KvStore) -> anyhow::Result<()> {
    let _ = store;
    if state.expenses.is_empty() {
        app.set_status("No data to export");
        return Ok(());
    }
    let path = if args.is_empty() {
        default_export_path("csv")
    } else {
        crate::run::shellexpand(args)
    };
    match crate::export::export_csv(std::path::Path::new(&path), &state.expenses) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn cmd_export_json(args: &str, app: &mut App, state: &mut AppState, store: &KvStore) -> anyhow::Result<()> {
    let _ = store;
    if state.expenses.is_empty() {
        app.set_status("No data to export");
        return Ok(());
    }
    let path = if args.is_empty() {
        default_export_path("json")
    } else {
        crate::run::shellexpand(args)
    };
    match crate::export::export_json(std::path::Path::new(&path), &state.expenses) {
        Ok(()) => app.set_status(format!("Exported {} expenses to {path}", state.expenses.len())),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses {
        app.set_status("Switch to the Expenses screen to delete");
        return Ok(());
    }
    let Some(expense) = app.selected_expense() else {
        app.set_status("No expense selected");
        return Ok(());
    };
    let label = if expense.description.is_empty() {
        format_money(expense.amount, &expense.currency)
    } else {
        expense.description.clone()
    };
    let id = expense.id.clone();
    app.confirm_message = format!("Delete '{label}'?");
    app.pending_action = Some(PendingAction::DeleteExpense { id, label });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, state: &mut AppState, _store: &KvStore) -> anyhow::Result<()> {
    if state.expenses.is_empty() {
        app.set_status("Nothing to clear");
        return Ok(());
    }
    app.confirm_message = format!(
        "Delete ALL {} expenses? This cannot be undone.",
        state.expenses.len()
    );
    app.pending_action = Some(PendingAction::ClearAll);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn default_export_path(ext: &str) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    format!("{home}/kharch-export-{}.{ext}", today())
}

use std::path::Path;

use anyhow::Result;

use crate::models::Category;
use crate::ops::{today, AppState, ExpenseInput};
use crate::report;
use crate::store::KvStore;

pub(crate) fn as_cli(args: &[String], state: &mut AppState, store: &KvStore) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], state, store),
        "list" | "ls" => cli_list(state),
        "summary" | "s" => cli_summary(state),
        "export" => cli_export(&args[2..], state),
        "clear" => cli_clear(&args[2..], state, store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("kharch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Kharch — local-only daily expense tracker");
    println!();
    println!("Usage: kharch [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <amount> [description]    Add an expense");
    println!("    --date <YYYY-MM-DD>         Expense date (default: today)");
    println!("    --category <name>           Category (default: auto or Other)");
    println!("    --currency <code>           Currency code (default: INR)");
    println!("  list                          List all expenses");
    println!("  summary                       Print today's budget status and totals");
    println!("  export [path]                 Export expenses to CSV");
    println!("    --json                      Export full state as JSON instead");
    println!("  clear --yes                   Delete ALL expenses");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_add(args: &[String], state: &mut AppState, store: &KvStore) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: kharch add <amount> [description] [--date <YYYY-MM-DD>] [--category <name>]");
    }

    let date = args
        .windows(2)
        .find(|w| w[0] == "--date")
        .map(|w| w[1].clone())
        .unwrap_or_default();
    let category = args
        .windows(2)
        .find(|w| w[0] == "--category")
        .and_then(|w| Category::parse(&w[1]))
        .unwrap_or(Category::Other);
    let currency = args
        .windows(2)
        .find(|w| w[0] == "--currency")
        .map(|w| w[1].clone())
        .unwrap_or_default();

    // Positional arguments: amount, then description words up to the
    // first flag.
    let mut positional = args.iter().take_while(|a| !a.starts_with("--"));
    let amount = positional
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing amount"))?
        .clone();
    let description = positional.cloned().collect::<Vec<_>>().join(" ");

    let input = ExpenseInput {
        amount,
        description,
        date,
        category,
        currency,
    };
    let expense = state
        .add_expense(store, input)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "Added {} {} [{}] on {}",
        expense.currency, expense.amount, expense.category, expense.date
    );

    let status = report::budget_status(&state.expenses, &state.settings, &today());
    if state.settings.daily_budget > rust_decimal::Decimal::ZERO {
        println!(
            "Today: {} {:.2} of {} ({}%) — {}",
            expense.currency,
            status.spent_today,
            state.settings.daily_budget,
            status.percent,
            status.level
        );
    }
    Ok(())
}

fn cli_list(state: &AppState) -> Result<()> {
    if state.expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<12} {:<14} {:>12} {:<8} Description",
        "Date", "Category", "Amount", "Currency"
    );
    println!("{}", "─".repeat(70));
    for expense in state.expenses.iter().rev() {
        println!(
            "{:<12} {:<14} {:>12.2} {:<8} {}",
            expense.date,
            expense.category.as_str(),
            expense.amount,
            expense.currency,
            expense.description,
        );
    }
    Ok(())
}

fn cli_summary(state: &AppState) -> Result<()> {
    let today = today();
    let status = report::budget_status(&state.expenses, &state.settings, &today);

    println!("Kharch — {today}");
    println!("{}", "─".repeat(40));
    println!("  Spent today:  {:.2}", status.spent_today);
    if state.settings.daily_budget > rust_decimal::Decimal::ZERO {
        println!("  Daily budget: {:.2}", state.settings.daily_budget);
        println!("  Used:         {}%", status.percent);
        println!("  Status:       {}", status.level);
    } else {
        println!("  Daily budget: not set (alerts disabled)");
    }
    println!("  Total expenses: {}", state.expenses.len());

    let by_category = report::by_category(&state.expenses);
    if !by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (category, total) in &by_category {
            println!("  {:<24} {:.2}", category.as_str(), total);
        }
    }

    let by_day = report::by_day(&state.expenses);
    if !by_day.is_empty() {
        println!();
        println!("Spending by Day:");
        for (day, total) in &by_day {
            println!("  {day:<24} {total:.2}");
        }
    }

    Ok(())
}

fn cli_export(args: &[String], state: &AppState) -> Result<()> {
    let json = args.iter().any(|a| a == "--json");
    let ext = if json { "json" } else { "csv" };

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/kharch-export-{}.{ext}", today())
        });

    if state.expenses.is_empty() {
        println!("No data to export");
        return Ok(());
    }

    if json {
        crate::export::export_json(Path::new(&output_path), &state.expenses)?;
        println!(
            "Exported {} expenses to {output_path}",
            state.expenses.len()
        );
    } else {
        let count = crate::export::export_csv(Path::new(&output_path), &state.expenses)?;
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

fn cli_clear(args: &[String], state: &mut AppState, store: &KvStore) -> Result<()> {
    if !args.iter().any(|a| a == "--yes") {
        anyhow::bail!(
            "This deletes ALL {} expenses. Re-run with --yes to confirm",
            state.expenses.len()
        );
    }
    let count = state.expenses.len();
    state.clear_expenses(store);
    println!("Deleted {count} expenses");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ops::{AppState, ExpenseInput};
use crate::store::KvStore;
use crate::ui::app::{AddForm, App, InputMode, PendingAction, Screen, SettingsForm};
use crate::ui::commands;
use crate::ui::util::{format_money, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long to block waiting for input per loop iteration. Short enough
/// that transient status messages expire on time.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub(crate) fn as_tui(state: &mut AppState, store: &KvStore) -> Result<()> {
    let mut app = App::new();
    app.refresh(state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, state, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    state: &mut AppState,
    store: &KvStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, state);
        })?;

        if !event::poll(POLL_INTERVAL)? {
            app.tick();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, state, store)?,
                InputMode::Command => handle_command_input(key, app, state, store)?,
                InputMode::Editing => handle_editing_input(key, app, state, store),
                InputMode::Confirm => handle_confirm_input(key, app, state, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &KvStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, state, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, state, Screen::Expenses),
        KeyCode::Char('3') => switch_screen(app, state, Screen::Settings),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, state, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, state, screens[prev]);
        }
        KeyCode::Char('a') if app.screen == Screen::Expenses => {
            app.add_form = Some(AddForm::new());
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('e') if app.screen == Screen::Settings => {
            app.settings_form = Some(SettingsForm::from_state(state));
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, state, store)?;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &KvStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, state, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, state: &mut AppState, store: &KvStore) {
    if app.add_form.is_some() {
        handle_add_form_input(key, app, state, store);
    } else if app.settings_form.is_some() {
        handle_settings_form_input(key, app, state, store);
    } else {
        app.input_mode = InputMode::Normal;
    }
}

fn handle_add_form_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &KvStore,
) {
    let Some(form) = app.add_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.add_form = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Add cancelled");
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % AddForm::FIELD_COUNT;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = if form.focus == 0 {
                AddForm::FIELD_COUNT - 1
            } else {
                form.focus - 1
            };
        }
        KeyCode::Left if form.focus == AddForm::FIELD_CATEGORY => form.cycle_category(-1),
        KeyCode::Right if form.focus == AddForm::FIELD_CATEGORY => form.cycle_category(1),
        KeyCode::Char('+') | KeyCode::Char('=') if form.focus == AddForm::FIELD_CATEGORY => {
            form.cycle_category(1);
        }
        KeyCode::Char('-') if form.focus == AddForm::FIELD_CATEGORY => form.cycle_category(-1),
        KeyCode::Enter => {
            let input = ExpenseInput {
                amount: form.amount.clone(),
                description: form.description.clone(),
                date: form.date.clone(),
                category: form.category(),
                currency: form.currency.clone(),
            };
            match state.add_expense(store, input) {
                Ok(expense) => {
                    app.add_form = None;
                    app.input_mode = InputMode::Normal;
                    app.refresh(state);
                    app.set_status(format!(
                        "Added {} ({})",
                        format_money(expense.amount, &expense.currency),
                        expense.category
                    ));
                }
                Err(e) => app.set_status(e.to_string()),
            }
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.focused_text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn handle_settings_form_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &KvStore,
) {
    let Some(form) = app.settings_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.settings_form = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % SettingsForm::FIELD_COUNT;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = if form.focus == 0 {
                SettingsForm::FIELD_COUNT - 1
            } else {
                form.focus - 1
            };
        }
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if form.focus == SettingsForm::FIELD_AUTOCAT =>
        {
            form.auto_categorize = !form.auto_categorize;
        }
        KeyCode::Enter => {
            let budget = form.budget.clone();
            let auto = form.auto_categorize;
            let keywords = form.keywords.clone();
            state.update_settings(store, &budget, auto, &keywords);
            app.settings_form = None;
            app.input_mode = InputMode::Normal;
            app.refresh(state);
            app.set_status("Settings saved");
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.focused_text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, state: &mut AppState, store: &KvStore) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id, label } => {
                        if state.delete_expense(store, &id) {
                            app.refresh(state);
                            app.set_status(format!("Deleted: {label}"));
                        } else {
                            app.set_status("Expense already gone");
                        }
                    }
                    PendingAction::ClearAll => {
                        let count = state.expenses.len();
                        state.clear_expenses(store);
                        app.refresh(state);
                        app.set_status(format!("Deleted {count} expenses"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, state: &AppState, screen: Screen) {
    app.screen = screen;
    app.refresh(state);
}

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Expenses {
        let page = app.visible_rows;
        scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.rows.len(),
            page,
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_up(&mut app.expense_index, &mut app.expense_scroll);
    }
}

fn handle_goto_top(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
    }
}

fn handle_goto_bottom(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.rows.len(),
            app.visible_rows,
        );
    }
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::categorize::Categorizer;
use crate::models::BUILTIN_KEYWORDS;
use crate::ops::AppState;
use crate::ui::app::{App, SettingsForm};
use crate::ui::render::centered_popup;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    render_current(f, chunks[0], state);
    render_keywords(f, chunks[1], state);

    if let Some(form) = &app.settings_form {
        render_settings_form(f, area, form);
    }
}

fn render_current(f: &mut Frame, area: Rect, state: &AppState) {
    let budget_text = if state.settings.daily_budget > Decimal::ZERO {
        state.settings.daily_budget.to_string()
    } else {
        "not set (alerts disabled)".to_string()
    };
    let autocat_text = if state.settings.auto_categorize {
        Span::styled("enabled", Style::default().fg(theme::GREEN))
    } else {
        Span::styled("disabled", Style::default().fg(theme::RED))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  Daily budget        ", theme::dim_style()),
            Span::styled(budget_text, theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("  Auto-categorization ", theme::dim_style()),
            autocat_text,
        ]),
        Line::from(Span::styled(
            "  Press e to edit, or use :budget / :autocat / :keyword",
            theme::dim_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Settings ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_keywords(f: &mut Frame, area: Rect, state: &AppState) {
    let categorizer = Categorizer::new(&state.settings);

    let header = Row::new(vec![
        Cell::from("Keyword"),
        Cell::from("Category"),
        Cell::from("Source"),
    ])
    .style(theme::header_style())
    .height(1);

    let rows: Vec<Row> = categorizer
        .entries()
        .iter()
        .map(|(keyword, category)| {
            let overridden = state.settings.keyword_map.contains_key(keyword);
            let builtin = BUILTIN_KEYWORDS.iter().any(|(k, _)| k == keyword);
            let source = match (builtin, overridden) {
                (true, true) => "builtin (overridden)",
                (true, false) => "builtin",
                _ => "user",
            };
            let style = if overridden {
                Style::default().fg(theme::YELLOW)
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(keyword.clone()),
                Cell::from(category.as_str()),
                Cell::from(source),
            ])
            .style(style)
        })
        .collect();

    let title = format!(" Keyword Rules ({}) — first match wins ", rows.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(16),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_settings_form(f: &mut Frame, area: Rect, form: &SettingsForm) {
    let popup = centered_popup(area, 54, 10);
    f.render_widget(Clear, popup);

    let field_line = |label: &str, value: Span<'static>, focused: bool| {
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<16}"), label_style),
            value,
        ])
    };

    let budget_value = if form.focus == 0 {
        Span::styled(format!("{}█", form.budget), theme::normal_style())
    } else {
        Span::styled(form.budget.clone(), theme::normal_style())
    };
    let autocat_value = Span::styled(
        if form.auto_categorize { "[x] on" } else { "[ ] off" },
        if form.focus == SettingsForm::FIELD_AUTOCAT {
            Style::default().fg(theme::YELLOW)
        } else {
            theme::normal_style()
        },
    );
    let keywords_value = if form.focus == 2 {
        Span::styled(format!("{}█", form.keywords), theme::normal_style())
    } else {
        Span::styled(form.keywords.clone(), theme::normal_style())
    };

    let lines = vec![
        Line::from(""),
        field_line("Daily budget", budget_value, form.focus == 0),
        Line::from(""),
        field_line("Auto-categorize", autocat_value, form.focus == 1),
        Line::from(""),
        field_line("Add keywords", keywords_value, form.focus == 2),
        Line::from(Span::styled(
            "                   keyword:Category, comma separated",
            theme::dim_style(),
        )),
    ];

    let popup_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(
                " Edit Settings ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(
                " Tab next | Space toggle | Enter save | Esc cancel ",
                theme::dim_style(),
            ))),
    );
    f.render_widget(popup_widget, popup);
}

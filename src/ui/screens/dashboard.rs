use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ops::{AppState, DEFAULT_CURRENCY};
use crate::report::AlertLevel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_money, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(3), // Budget gauge + alert
            Constraint::Min(8),    // Category chart
            Constraint::Length(4), // Daily spending sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, state);
    render_budget_gauge(f, chunks[1], app);
    render_category_chart(f, chunks[2], app);
    render_daily_sparkline(f, chunks[3], app);
}

fn display_currency(app: &App) -> &str {
    app.rows
        .first()
        .map(|e| e.currency.as_str())
        .unwrap_or(DEFAULT_CURRENCY)
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let currency = display_currency(app);
    let level = app.budget.level;

    render_card(
        f,
        cards[0],
        "Spent Today",
        format_money(app.budget.spent_today, currency),
        theme::alert_color(level),
    );
    let budget_text = if state.settings.daily_budget > Decimal::ZERO {
        format_money(state.settings.daily_budget, currency)
    } else {
        "not set".to_string()
    };
    render_card(f, cards[1], "Daily Budget", budget_text, theme::ACCENT);
    render_card(
        f,
        cards[2],
        "Spent",
        format!("{}%", app.budget.percent),
        theme::alert_color(level),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: ratatui::style::Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_budget_gauge(f: &mut Frame, area: Rect, app: &App) {
    let level = app.budget.level;
    let title = match level {
        AlertLevel::Normal => " Budget ".to_string(),
        _ => format!(" Budget — {level} "),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(title, theme::alert_style(level))),
        )
        .gauge_style(Style::default().fg(theme::alert_color(level)))
        .percent(app.budget.percent.min(100) as u16)
        .label(format!("{}%", app.budget.percent));

    f.render_widget(gauge, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Spending by Category ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.by_category.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add or press a on the Expenses tab",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .by_category
        .iter()
        .take(10)
        .map(|(category, total)| {
            let val = total.to_u64().unwrap_or(0);
            let label = truncate(category.as_str(), 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_daily_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .by_day
        .iter()
        .map(|(_, total)| total.to_u64().unwrap_or(0))
        .collect();

    let range = match (app.by_day.first(), app.by_day.last()) {
        (Some((first, _)), Some((last, _))) if first != last => format!(" {first} → {last} "),
        (Some((only, _)), _) => format!(" {only} "),
        _ => String::new(),
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(" Daily Spending{range}"),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(theme::GREEN));

    f.render_widget(sparkline, area);
}

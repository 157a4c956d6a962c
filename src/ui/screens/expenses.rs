use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{AddForm, App};
use crate::ui::render::centered_popup;
use crate::ui::theme;
use crate::ui::util::{format_money, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    render_table(f, area, app);

    if let Some(form) = &app.add_form {
        render_add_form(f, area, form);
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Expenses ({}) ", app.rows.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.rows.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Press a to add one",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Category"),
        Cell::from("Amount"),
        Cell::from("Description"),
    ])
    .style(theme::header_style())
    .height(1);

    let page = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(page.max(1))
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(expense.date.clone()),
                Cell::from(expense.category.as_str()),
                Cell::from(format_money(expense.amount, &expense.currency)),
                Cell::from(truncate(&expense.description, 40)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

fn render_add_form(f: &mut Frame, area: Rect, form: &AddForm) {
    let popup = centered_popup(area, 48, 13);
    f.render_widget(Clear, popup);

    let field_line = |label: &str, value: &str, focused: bool| {
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value_span = if focused {
            Span::styled(format!("{value}█"), theme::normal_style())
        } else {
            Span::styled(value.to_string(), theme::normal_style())
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<12}"), label_style),
            value_span,
        ])
    };

    let category = form.category();
    let category_value = format!("◂ {category} ▸");
    let lines = vec![
        Line::from(""),
        field_line("Amount", &form.amount, form.focus == 0),
        Line::from(""),
        field_line("Description", &form.description, form.focus == 1),
        Line::from(""),
        field_line("Date", &form.date, form.focus == 2),
        Line::from(""),
        category_selector_line(&category_value, form.focus == AddForm::FIELD_CATEGORY),
        Line::from(""),
        field_line("Currency", &form.currency, form.focus == 4),
    ];

    let popup_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(
                " Add Expense ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(
                " Tab next | ◂▸ category | Enter save | Esc cancel ",
                theme::dim_style(),
            ))),
    );
    f.render_widget(popup_widget, popup);
}

fn category_selector_line(value: &str, focused: bool) -> Line<'_> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };
    let value_style = if focused {
        Style::default().fg(theme::YELLOW)
    } else {
        theme::normal_style()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{:<12}", "Category"), label_style),
        Span::styled(value, value_style),
    ])
}

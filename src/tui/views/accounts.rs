//! Accounts view
//!
//! Card list on the left; the selected card's totals and one server-side
//! page of its transactions on the right.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::truncate;
use crate::tui::app::App;
use crate::tui::layout::{split_sidebar, MainPanelLayout};

use super::panel;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (list_area, detail_area) = split_sidebar(area, 30);
    render_card_list(frame, app, list_area);

    let layout = MainPanelLayout::new(detail_area, 5);
    render_summary(frame, app, layout.header);
    render_rows(frame, app, layout.content);
}

fn render_card_list(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let block = panel(app, " Accounts ");

    if app.cards.is_empty() {
        let text = Paragraph::new("No accounts yet.\nCreate one with\n`expense account create`.")
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .cards
        .iter()
        .map(|card| ListItem::new(truncate(&card.label(), 26)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_card_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = &app.ctx.settings().currency_symbol;
    let title = app
        .selected_card()
        .map(|c| format!(" {} ", c.label()))
        .unwrap_or_else(|| " No account ".to_string());

    let lines = match &app.account_summary {
        Some(summary) => {
            let balance = summary.balance();
            let balance_color = if balance.is_negative() { Color::Red } else { Color::Green };
            vec![
                Line::styled(
                    format!("Income   {}", summary.income.format_with_symbol(symbol)),
                    Style::default().fg(Color::Green),
                ),
                Line::styled(
                    format!("Expenses {}", summary.expense.format_with_symbol(symbol)),
                    Style::default().fg(Color::Red),
                ),
                Line::styled(
                    format!("Balance  {}", balance.format_with_symbol(symbol)),
                    Style::default().fg(balance_color).add_modifier(Modifier::BOLD),
                ),
            ]
        }
        None => vec![Line::from("Totals unavailable")],
    };

    frame.render_widget(Paragraph::new(lines).block(panel(app, title)), area);
}

fn render_rows(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let title = format!(" {} · n/b page  d delete ", app.account_pager.label());
    let block = panel(app, title);

    if app.account_rows.is_empty() {
        let text = Paragraph::new("No transactions for this account")
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(14),
    ];
    let header = Row::new(vec!["Date", "Description", "Type", "Method", "Amount"])
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .account_rows
        .iter()
        .map(|txn| {
            let color = if txn.is_income() { Color::Green } else { Color::Red };
            Row::new(vec![
                Cell::from(txn.date.clone()),
                Cell::from(truncate(&txn.description, 30)),
                Cell::from(txn.kind.to_string()),
                Cell::from(txn.payment_method.to_string()),
                Cell::from(txn.signed_amount().to_string()).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(palette.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_account_row));
    frame.render_stateful_widget(table, area, &mut state);
}

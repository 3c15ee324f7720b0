//! Transactions view
//!
//! The filtered, locally paginated transaction list

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::transaction::{account_label, category_label};
use crate::display::truncate;
use crate::models::{category, Money, Transaction};
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

use super::panel;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = MainPanelLayout::new(area, 4);
    let rows = app.filtered_transactions();

    render_header(frame, app, &rows, layout.header);
    render_table(frame, app, &rows, layout.content);
}

fn render_header(frame: &mut Frame, app: &App, rows: &[&Transaction], area: Rect) {
    let palette = app.palette();
    let filter = &app.filter;

    let (income, expense) = rows.iter().fold(
        (Money::zero(), Money::zero()),
        |(income, expense), txn| {
            if txn.is_income() {
                (income + txn.amount, expense)
            } else {
                (income, expense + txn.amount)
            }
        },
    );
    let category = filter
        .category
        .and_then(|id| category::category_name(&app.data.categories, id))
        .unwrap_or("all");

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("type: {}  ", filter.kind),
                Style::default().fg(palette.foreground),
            ),
            Span::styled(
                format!("method: {}  ", filter.payment),
                Style::default().fg(palette.foreground),
            ),
            Span::styled(
                format!("category: {}", category),
                Style::default().fg(palette.foreground),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("+{}  ", income), Style::default().fg(Color::Green)),
            Span::styled(format!("-{}  ", expense), Style::default().fg(Color::Red)),
            Span::styled(
                format!(
                    "{} · {} per page",
                    app.transaction_pager.label(),
                    app.transaction_pager.page_size()
                ),
                Style::default().fg(palette.muted),
            ),
        ]),
    ];

    let title = format!(" {} ", filter.window_label());
    frame.render_widget(Paragraph::new(lines).block(panel(app, title)), area);
}

fn render_table(frame: &mut Frame, app: &App, rows: &[&Transaction], area: Rect) {
    let palette = app.palette();
    let block = panel(app, " f:type  p:method  a:whole year  s:page size  d:delete ");

    if rows.is_empty() {
        let text = Paragraph::new(app.filter.empty_message())
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(20),    // Description
        Constraint::Length(16), // Category
        Constraint::Length(6),  // Method
        Constraint::Length(16), // Account
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Description").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Method").style(bold),
        Cell::from("Account").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(palette.accent))
    .height(1);

    let page = &rows[app.transaction_pager.range()];
    let table_rows: Vec<Row> = page
        .iter()
        .map(|txn| {
            let amount_style = if txn.is_income() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Row::new(vec![
                Cell::from(txn.date.clone()),
                Cell::from(truncate(&txn.description, 30)),
                Cell::from(truncate(&category_label(txn, &app.data.categories), 16)),
                Cell::from(txn.payment_method.to_string()),
                Cell::from(truncate(&account_label(txn, &app.data.cards), 16)),
                Cell::from(txn.signed_amount().to_string()).style(amount_style),
            ])
        })
        .collect();

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(palette.border)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_transaction_index));

    frame.render_stateful_widget(table, area, &mut state);
}

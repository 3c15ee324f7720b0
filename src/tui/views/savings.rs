//! Savings view
//!
//! Plan list, progress gauge and the paginated contribution history.
//! Auto rows come from the linked category and cannot be deleted here.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::truncate;
use crate::reports::SavingsReport;
use crate::tui::app::App;
use crate::tui::layout::{split_sidebar, MainPanelLayout};

use super::panel;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (list_area, detail_area) = split_sidebar(area, 30);
    render_plan_list(frame, app, list_area);

    let Some(report) = app.savings.as_ref() else {
        let text = Paragraph::new("No plan selected")
            .block(panel(app, " Savings "))
            .style(Style::default().fg(app.palette().muted));
        frame.render_widget(text, detail_area);
        return;
    };

    let layout = MainPanelLayout::new(detail_area, 3);
    render_progress(frame, app, report, layout.header);
    render_history(frame, app, report, layout.content);
}

fn render_plan_list(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let block = panel(app, " Plans ");

    if app.plans.is_empty() {
        let text = Paragraph::new("No savings plans yet.\nCreate one with\n`expense savings create`.")
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .plans
        .iter()
        .map(|plan| ListItem::new(truncate(&plan.name, 26)))
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
    state.select(Some(app.selected_plan_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_progress(frame: &mut Frame, app: &App, report: &SavingsReport, area: Rect) {
    let symbol = &app.ctx.settings().currency_symbol;
    let progress = &report.progress;
    let color = if progress.is_near_goal() { Color::Green } else { app.palette().accent };

    let mut label = format!(
        "{} of {} · {} left · {}%",
        progress.saved.format_with_symbol(symbol),
        progress.target.format_with_symbol(symbol),
        progress.remaining.format_with_symbol(symbol),
        progress.percent
    );
    if progress.is_near_goal() {
        label.push_str(" · almost there!");
    }

    let gauge = Gauge::default()
        .block(panel(app, format!(" {} ", report.plan.name)))
        .gauge_style(Style::default().fg(color))
        .percent(progress.bar_width())
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_history(frame: &mut Frame, app: &App, report: &SavingsReport, area: Rect) {
    let palette = app.palette();
    let symbol = &app.ctx.settings().currency_symbol;
    let title = format!(" History · {} ", report.pager.label());
    let block = panel(app, title);

    if report.rows.is_empty() {
        let text = Paragraph::new("No contributions yet")
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(8),
    ];
    let header = Row::new(vec!["Date", "Description", "Amount", "Source"])
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = report
        .page_rows()
        .iter()
        .map(|row| {
            let source_style = if row.is_manual() {
                Style::default().fg(palette.foreground)
            } else {
                Style::default().fg(palette.muted)
            };
            Row::new(vec![
                Cell::from(row.date.clone()),
                Cell::from(truncate(&row.description, 30)),
                Cell::from(row.amount.format_with_symbol(symbol)),
                Cell::from(row.kind_label()).style(source_style),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(palette.border).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_history_index));
    frame.render_stateful_widget(table, area, &mut state);
}

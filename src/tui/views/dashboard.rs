//! Dashboard view
//!
//! Totals, the budget gauge, expense breakdowns and the annual
//! income-vs-expense chart for the selected period.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::models::Money;
use crate::reports::{BudgetBand, BudgetStatus, DashboardReport};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

use super::panel;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(report) = app.dashboard.as_ref() else {
        let text = Paragraph::new("No data loaded. Press r to retry.")
            .block(panel(app, " Dashboard "))
            .style(Style::default().fg(app.palette().muted));
        frame.render_widget(text, area);
        return;
    };

    let layout = DashboardLayout::new(area);
    render_totals(frame, app, report, layout.totals);
    render_budget(frame, app, report, layout.budget);
    render_categories(frame, app, report, layout.categories);
    render_payments(frame, app, report, layout.payments);
    render_annual(frame, app, report, layout.annual);
}

fn money_line(label: &str, amount: Money, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<14}", label)),
        Span::styled(
            format!("{:>14}", amount.to_string()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_totals(frame: &mut Frame, app: &App, report: &DashboardReport, area: Rect) {
    let totals = &report.summary.totals;
    let net = totals.net();
    let net_color = if net.is_negative() { Color::Red } else { Color::Green };

    let mut lines = vec![
        money_line("Income", totals.income, Color::Green),
        money_line("Expenses", totals.expense, Color::Red),
        money_line("Balance", net, net_color),
    ];
    if let Some(balance) = &report.balance {
        lines.push(Line::from(format!(
            "Initial {}  →  Final {}",
            balance.initial, balance.final_balance
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("{} transactions", totals.transactions),
        Style::default().fg(app.palette().muted),
    )));

    let title = format!(" {} (←/→ month, a all) ", report.period.label());
    frame.render_widget(Paragraph::new(lines).block(panel(app, title)), area);
}

fn band_color(band: BudgetBand) -> Color {
    match band {
        BudgetBand::Green => Color::Green,
        BudgetBand::Orange => Color::Rgb(255, 165, 0),
        BudgetBand::Red => Color::Red,
    }
}

fn render_budget(frame: &mut Frame, app: &App, report: &DashboardReport, area: Rect) {
    let block = panel(app, " Budget vs actual ");
    match &report.budget {
        BudgetStatus::Progress(progress) => {
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(band_color(progress.band())))
                .percent(progress.bar_width())
                .label(format!(
                    "{} of {} · {} left · {}",
                    progress.actual,
                    progress.budget,
                    progress.remaining,
                    progress.consumed_label()
                ));
            frame.render_widget(gauge, area);
        }
        status => {
            let text = Paragraph::new(status.message().unwrap_or_default())
                .block(block)
                .style(Style::default().fg(app.palette().muted));
            frame.render_widget(text, area);
        }
    }
}

fn render_categories(frame: &mut Frame, app: &App, report: &DashboardReport, area: Rect) {
    let block = panel(app, " Expenses by category ");
    if report.categories.is_empty() {
        let text = Paragraph::new("No expenses in this period")
            .block(block)
            .style(Style::default().fg(app.palette().muted));
        frame.render_widget(text, area);
        return;
    }

    let rows: Vec<Row> = report
        .categories
        .iter()
        .map(|share| {
            Row::new(vec![
                Cell::from(share.name.clone()),
                Cell::from(share.amount.to_string()),
                Cell::from(format!("{}%", share.percent)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(6),
    ];
    frame.render_widget(Table::new(rows, widths).block(block), area);
}

fn render_payments(frame: &mut Frame, app: &App, report: &DashboardReport, area: Rect) {
    let payment = &report.payment;
    let mut lines = vec![
        Line::from(format!("Cash {:>12} {:>6.1}%", payment.cash.to_string(), payment.cash_pct)),
        Line::from(format!("Card {:>12} {:>6.1}%", payment.card.to_string(), payment.card_pct)),
        Line::from(""),
    ];
    for card in &report.cards {
        lines.push(Line::from(format!(
            "{} ····{} {}",
            card.name, card.last4, card.amount
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(panel(app, " Payment methods ")),
        area,
    );
}

fn render_annual(frame: &mut Frame, app: &App, report: &DashboardReport, area: Rect) {
    let annual = &report.annual;
    let title = match annual.advisory() {
        Some(advisory) => format!(" {} · {} ", annual.year, advisory),
        None => format!(" Income vs expenses {} ([/] year) ", annual.year),
    };

    let mut chart = BarChart::default()
        .block(panel(app, title))
        .bar_width(2)
        .bar_gap(0)
        .group_gap(2);
    for month in &annual.bars {
        let bars = [
            Bar::default()
                .value(month.income.cents().max(0) as u64 / 100)
                .text_value(String::new())
                .style(Style::default().fg(Color::Green)),
            Bar::default()
                .value(month.expense.cents().max(0) as u64 / 100)
                .text_value(String::new())
                .style(Style::default().fg(Color::Red)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(month.label)).bars(&bars));
    }
    frame.render_widget(chart, area);
}

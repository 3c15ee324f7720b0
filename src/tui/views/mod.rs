//! TUI Views module
//!
//! One view per page (dashboard, transactions, accounts, savings), plus the
//! tab strip, status bar and overlays.

pub mod accounts;
pub mod dashboard;
pub mod savings;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::{toast_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = app.palette();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        frame.area(),
    );

    let layout = AppLayout::new(frame.area());
    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::Transactions => transactions::render(frame, app, layout.main),
        ActiveView::Accounts => accounts::render(frame, app, layout.main),
        ActiveView::Savings => savings::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if let Some(notification) = app.notifications.current() {
        let area = toast_rect(48, notification.height() + 1, layout.main);
        frame.render_widget(NotificationWidget::new(notification), area);
    }

    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(pending) => dialogs::confirm::render(frame, pending.message(), palette),
        ActiveDialog::None => {}
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(" Expense Control "),
        )
        .select(app.active_view.index())
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// A bordered block in the theme's colours
pub(crate) fn panel<'b>(app: &App, title: impl Into<Line<'b>>) -> Block<'b> {
    let palette = app.palette();
    Block::default()
        .title(title)
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
}

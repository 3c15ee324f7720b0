//! Help dialog
//!
//! Shows the global keys plus the keys of the active view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    let palette = app.palette();

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background).fg(palette.foreground));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

/// Help lines for a view
fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1-4", "Dashboard, Transactions, Accounts, Savings"),
        key_line("r", "Reload from the server"),
        key_line("t", "Toggle light/dark theme"),
        Line::from(""),
    ];

    match view {
        ActiveView::Dashboard => {
            lines.push(heading("Dashboard"));
            lines.push(Line::from(""));
            lines.push(key_line("←/→", "Previous/next month"));
            lines.push(key_line("[/]", "Previous/next year"));
            lines.push(key_line("a", "Toggle all-time view"));
        }
        ActiveView::Transactions => {
            lines.push(heading("Transactions"));
            lines.push(Line::from(""));
            lines.push(key_line("←/→", "Previous/next month"));
            lines.push(key_line("[/]", "Previous/next year"));
            lines.push(key_line("a", "Toggle whole year"));
            lines.push(key_line("f", "Cycle type filter"));
            lines.push(key_line("p", "Cycle payment filter"));
            lines.push(key_line("s", "Cycle page size"));
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("n/b", "Next/previous page"));
            lines.push(key_line("d", "Delete transaction"));
        }
        ActiveView::Accounts => {
            lines.push(heading("Accounts"));
            lines.push(Line::from(""));
            lines.push(key_line("←/→", "Previous/next account"));
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("n/b", "Next/previous page"));
            lines.push(key_line("d", "Delete transaction"));
        }
        ActiveView::Savings => {
            lines.push(heading("Savings"));
            lines.push(Line::from(""));
            lines.push(key_line("←/→", "Previous/next plan"));
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("n/b", "Next/previous page"));
            lines.push(key_line("d", "Delete manual contribution"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::raw(description.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_specific_help() {
        let text = |view| {
            help_lines(view)
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert!(text(ActiveView::Transactions).contains("Cycle payment filter"));
        assert!(text(ActiveView::Savings).contains("Delete manual contribution"));
        assert!(!text(ActiveView::Dashboard).contains("Cycle page size"));
    }
}

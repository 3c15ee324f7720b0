//! Status bar view
//!
//! Shows the signed-in user, the active page and key hints

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let user = app
        .ctx
        .session()
        .display_name()
        .unwrap_or("signed in")
        .to_string();

    let mut spans = vec![
        Span::styled(format!(" {} ", user), Style::default().fg(palette.accent)),
        Span::raw("│ "),
        Span::styled(
            app.active_view.route().path(),
            Style::default().fg(palette.foreground),
        ),
        Span::raw(" │ "),
        Span::styled(app.ctx.api_url().to_string(), Style::default().fg(palette.muted)),
    ];

    let hints = " q:Quit  ?:Help  r:Reload  t:Theme ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(palette.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

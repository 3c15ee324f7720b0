//! Toast notification widget
//!
//! Displays [`Feedback`] banners until they expire.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::feedback::{Feedback, FeedbackLevel};

fn level_color(level: FeedbackLevel) -> Color {
    match level {
        FeedbackLevel::Info => Color::Blue,
        FeedbackLevel::Success => Color::Green,
        FeedbackLevel::Warning => Color::Yellow,
        FeedbackLevel::Error => Color::Red,
    }
}

fn level_title(level: FeedbackLevel) -> &'static str {
    match level {
        FeedbackLevel::Info => " i Info ",
        FeedbackLevel::Success => " + Success ",
        FeedbackLevel::Warning => " ! Warning ",
        FeedbackLevel::Error => " x Error ",
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub feedback: Feedback,
    pub created_at: Instant,
    pub duration_secs: u64,
}

impl Notification {
    pub fn from_feedback(feedback: &Feedback) -> Self {
        Self {
            feedback: feedback.clone(),
            created_at: Instant::now(),
            duration_secs: feedback.duration_secs(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.duration_secs
    }

    /// Lines needed to show the message and hint
    pub fn height(&self) -> u16 {
        if self.feedback.hint.is_some() {
            4
        } else {
            3
        }
    }
}

/// Widget for rendering a notification
pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl<'a> Widget for NotificationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let feedback = &self.notification.feedback;
        let color = level_color(feedback.level);

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(level_title(feedback.level))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        let mut text = feedback.message.clone();
        if let Some(hint) = &feedback.hint {
            text.push('\n');
            text.push_str(hint);
        }

        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// A queue of notifications to display
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Remove expired notifications
    pub fn remove_expired(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// The notification to display (oldest first)
    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_follows_level() {
        let ok = Notification::from_feedback(&Feedback::success("Saved"));
        let err = Notification::from_feedback(&Feedback::error("Nope").with_hint("retry"));
        assert_eq!(ok.duration_secs, 4);
        assert_eq!(err.duration_secs, 6);
        assert_eq!(ok.height(), 3);
        assert_eq!(err.height(), 4);
        assert!(!ok.is_expired());
    }

    #[test]
    fn test_notification_queue() {
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.push(Notification::from_feedback(&Feedback::info("First")));
        queue.push(Notification::from_feedback(&Feedback::success("Second")));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().feedback.message, "First");

        queue.notifications[0].duration_secs = 0;
        queue.remove_expired();
        assert_eq!(queue.current().unwrap().feedback.message, "Second");
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(level_color(FeedbackLevel::Error), Color::Red);
        assert_eq!(level_color(FeedbackLevel::Success), Color::Green);
    }
}

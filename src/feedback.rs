//! Success/error banners
//!
//! Every mutation reports back through a [`Feedback`]. The CLI prints it once;
//! the TUI queues it as a notification that dismisses itself after
//! [`Feedback::duration_secs`].

use std::fmt;

use crate::error::{ErrorKind, ExpenseError};

/// Seconds a success banner stays up
pub const SUCCESS_SECS: u64 = 4;
/// Seconds an error or warning banner stays up
pub const ERROR_SECS: u64 = 6;

/// Banner severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    /// Extra line suggesting what to do next
    pub hint: Option<String>,
}

impl Feedback {
    pub fn new(level: FeedbackLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            hint: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Error, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Banner for a failed operation.
    ///
    /// Uses the server's message when it sent one, otherwise `fallback`.
    /// A rejected token adds a hint to log in again; the session is kept.
    pub fn from_error(err: &ExpenseError, fallback: &str) -> Self {
        let feedback = Self::error(err.user_message(fallback));
        match err.kind() {
            ErrorKind::Unauthorized => {
                feedback.with_hint("Your session may have expired. Run `expense login` to sign in again.")
            }
            ErrorKind::Network => feedback.with_hint("Check that the API is reachable (see `expense settings show`)."),
            _ => feedback,
        }
    }

    /// How long the banner stays visible
    pub fn duration_secs(&self) -> u64 {
        match self.level {
            FeedbackLevel::Success | FeedbackLevel::Info => SUCCESS_SECS,
            FeedbackLevel::Warning | FeedbackLevel::Error => ERROR_SECS,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == FeedbackLevel::Error
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            FeedbackLevel::Info | FeedbackLevel::Success => "",
            FeedbackLevel::Warning => "Warning: ",
            FeedbackLevel::Error => "Error: ",
        };
        write!(f, "{}{}", prefix, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {}", hint)?;
        }
        Ok(())
    }
}

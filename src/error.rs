//! Custom error types for Expense Control
//!
//! Every fallible operation in the crate returns [`ExpenseResult`]. The
//! variants double as the typed error channel the CLI and TUI banners consume:
//! [`ExpenseError::kind`] classifies an error and
//! [`ExpenseError::user_message`] picks the text a banner should show.

use thiserror::Error;

/// The main error type for Expense Control operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for form input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The API rejected the bearer token (HTTP 401)
    #[error("Not authorized: {}", message.as_deref().unwrap_or("session missing or expired"))]
    Unauthorized { message: Option<String> },

    /// Any other non-success HTTP status
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The response body did not match the expected schema
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),

    /// An error annotated with the operation that failed
    #[error("{context}: {source}")]
    Failed {
        context: String,
        #[source]
        source: Box<ExpenseError>,
    },
}

/// Coarse classification of an [`ExpenseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Validation,
    NotFound,
    Network,
    Unauthorized,
    Api,
    Decode,
    Export,
    Tui,
}

impl ExpenseError {
    /// Create a "not found" error for cards
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings plans
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings plan",
            identifier: identifier.into(),
        }
    }

    /// Annotate with the operation that failed
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Failed {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context layers
    pub fn root(&self) -> &ExpenseError {
        match self {
            Self::Failed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) | Self::Json(_) => ErrorKind::Io,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Network(_) => ErrorKind::Network,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Api { .. } => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Export(_) => ErrorKind::Export,
            Self::Tui(_) => ErrorKind::Tui,
            Self::Failed { source, .. } => source.kind(),
        }
    }

    /// The message the server attached to a failed response, if any
    pub fn server_message(&self) -> Option<&str> {
        match self.root() {
            Self::Api { message, .. } | Self::Unauthorized { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Text for a user-facing banner.
    ///
    /// Server-provided messages win, validation errors speak for themselves,
    /// then the outermost context, and finally `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match (self, self.root()) {
            (_, Self::Validation(message)) => message.clone(),
            (Self::Failed { context, .. }, _) => context.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::Validation(_))
    }

    /// Check if the API rejected our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.root(), Self::Unauthorized { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ExpenseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<crate::models::period::PeriodParseError> for ExpenseError {
    fn from(err: crate::models::period::PeriodParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for Expense Control operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

/// `.context(..)` on results, naming the operation for banners
pub trait ResultExt<T> {
    fn context(self, context: &str) -> ExpenseResult<T>;
}

impl<T> ResultExt<T> for ExpenseResult<T> {
    fn context(self, context: &str) -> ExpenseResult<T> {
        self.map_err(|err| err.context(context))
    }
}

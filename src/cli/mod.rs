//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Every handler receives the
//! [`AppContext`] explicitly and reports through [`Feedback`] banners.

pub mod account;
pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod export;
pub mod profile;
pub mod savings;
pub mod settings;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use export::{handle_export_command, ExportCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use savings::{handle_savings_command, SavingsCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use zeroize::Zeroizing;

use crate::api::ApiClient;
use crate::context::AppContext;
use crate::error::{ExpenseError, ExpenseResult};
use crate::feedback::{Feedback, FeedbackLevel};
use crate::routes::Route;

/// Print a banner: successes to stdout, problems to stderr
pub fn print_feedback(feedback: &Feedback) {
    match feedback.level {
        FeedbackLevel::Info | FeedbackLevel::Success => println!("{}", feedback),
        FeedbackLevel::Warning | FeedbackLevel::Error => eprintln!("{}", feedback),
    }
}

/// An API client for a protected page, or an error when logged out
pub fn require_session(ctx: &AppContext, route: Route) -> ExpenseResult<ApiClient> {
    if route.guard(ctx.is_authenticated()) == Route::Login && route != Route::Login {
        return Err(ExpenseError::Unauthorized {
            message: Some("You are not logged in".into()),
        });
    }
    ctx.client()
}

/// Read a secret from the terminal without echo
pub fn prompt_secret(prompt: &str) -> ExpenseResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| ExpenseError::Io(format!("Failed to read password: {}", e)))
}

/// Use a secret passed on the command line, or prompt for it
pub fn secret_or_prompt(value: Option<String>, prompt: &str) -> ExpenseResult<Zeroizing<String>> {
    match value {
        Some(value) => Ok(Zeroizing::new(value)),
        None => prompt_secret(prompt),
    }
}

/// Today's date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// A month argument; `YYYY-MM` also carries the year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthArg {
    pub month: u32,
    pub year: Option<i32>,
}

impl MonthArg {
    pub fn new(month: u32) -> Self {
        Self { month, year: None }
    }

    /// The year written into the argument wins over `year`
    pub fn year_or(&self, year: Option<i32>) -> Option<i32> {
        self.year.or(year)
    }
}

/// Parse a month given as `3`, `03`, `2025-03` or a month name
pub fn parse_month(value: &str) -> Result<MonthArg, String> {
    let value = value.trim();
    if let Ok(month) = value.parse::<u32>() {
        if (1..=12).contains(&month) {
            return Ok(MonthArg::new(month));
        }
    }
    if let Some((year, month)) = value.split_once('-') {
        return match (year.parse::<i32>(), month.parse::<u32>()) {
            (Ok(year), Ok(month)) if year.to_string().len() == 4 && (1..=12).contains(&month) => {
                Ok(MonthArg {
                    month,
                    year: Some(year),
                })
            }
            _ => Err(format!("Invalid month: '{}' (expected YYYY-MM)", value)),
        };
    }
    let lower = value.to_lowercase();
    crate::models::period::MONTH_NAMES_EN
        .iter()
        .zip(crate::models::period::MONTH_NAMES_ES.iter())
        .position(|(en, es)| {
            lower.len() >= 3 && (en.to_lowercase().starts_with(&lower) || es.starts_with(&lower))
        })
        .map(|i| MonthArg::new(i as u32 + 1))
        .ok_or_else(|| format!("Invalid month: '{}' (expected 1-12 or a month name)", value))
}

//! Configuration module for Expense Control
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence
//! - The login session file
//! - The light/dark theme flag

pub mod paths;
pub mod session;
pub mod settings;
pub mod theme;

pub use paths::ExpensePaths;
pub use session::Session;
pub use settings::{DashboardPeriod, Settings};
pub use theme::Theme;

//! Terminal User Interface module
//!
//! A read-mostly TUI over the dashboard, transactions, accounts and savings
//! pages, built on ratatui. Creating and editing records goes through the
//! CLI; the TUI can delete rows after a y/n confirmation.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;

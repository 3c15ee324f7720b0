//! Expense Control - terminal client for a personal-finance REST API
//!
//! This library provides everything behind the `expense` binary: a typed
//! client for the Expense Control API, the persisted client state (session,
//! theme, remembered filters), the transaction filter and pagination
//! pipelines, the dashboard derivations, and the CLI and TUI surfaces.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: HTTP client and wire normalization
//! - `config`: Paths, settings, session and theme
//! - `context`: The single read/write boundary for persisted state
//! - `error`: Custom error types
//! - `models`: DTOs returned by the API
//! - `services`: Validation and page logic on top of the API
//! - `reports`: Dashboard and savings derivations
//! - `cli`, `display`, `tui`: User-facing surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_control::config::ExpensePaths;
//! use expense_control::context::AppContext;
//!
//! let ctx = AppContext::load(ExpensePaths::new()?)?;
//! let cards = ctx.client()?.cards()?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod export;
pub mod feedback;
pub mod models;
pub mod reports;
pub mod routes;
pub mod services;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};

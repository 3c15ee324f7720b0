//! Service layer for Expense Control
//!
//! The service layer sits on top of the API client, handling form validation,
//! remembered selections and the few computed fields the API does not return.

pub mod account;
pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod filter;
pub mod pagination;
pub mod profile;
pub mod savings;
pub mod transaction;
pub mod validation;

pub use account::{AccountService, CardSummary};
pub use auth::AuthService;
pub use budget::{BudgetOutcome, BudgetService};
pub use dashboard::DashboardService;
pub use filter::{PaymentFilter, TransactionFilter, TypeFilter};
pub use pagination::{PageSize, Paginator};
pub use profile::ProfileService;
pub use savings::SavingsService;
pub use transaction::{TransactionService, TransactionsData};

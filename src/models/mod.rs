//! Core data models for Expense Control
//!
//! These are the DTOs the REST API returns, normalized at the client
//! boundary, plus the request bodies sent back.

pub mod budget;
pub mod card;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod savings;
pub mod summary;
pub mod transaction;
pub mod user;

pub use budget::{Budget, BudgetInput};
pub use card::{Card, CardInput};
pub use category::Category;
pub use ids::{BudgetId, CardId, CategoryId, ContributionId, PlanId, TransactionId};
pub use money::Money;
pub use period::Period;
pub use savings::{Contribution, ContributionInput, PlanInput, SavingsPlan, SavingsSummary};
pub use summary::{StatsSummary, Totals};
pub use transaction::{PaymentMethod, Transaction, TransactionInput, TransactionType};
pub use user::{LoginResponse, SessionUser, UserProfile};

//! Reports module for Expense Control
//!
//! Pure derivations over data already fetched from the API: the dashboard
//! panels, the annual income/expense series and savings plan progress.

pub mod annual;
pub mod dashboard;
pub mod savings;

pub use annual::{AnnualSeries, MonthBar, MONTH_LABELS};
pub use dashboard::{
    BalanceBars, BudgetBand, BudgetProgress, BudgetStatus, CardUsage, CategoryShare,
    DashboardReport, PaymentSplit,
};
pub use savings::{HistoryRow, HistorySource, SavingsProgress, SavingsReport};

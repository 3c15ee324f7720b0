//! REST API access
//!
//! [`ApiClient`] is the only place that talks HTTP. Code that only needs
//! period summaries depends on [`StatsSource`] instead, so the annual series
//! can be computed against a fake in tests.

pub mod client;

pub use client::{ApiClient, TransactionPage};

use crate::error::ExpenseResult;
use crate::models::{Period, StatsSummary};

/// Anything that can produce a statistics summary for a period
///
/// `Sync` because the annual series fetches twelve months concurrently
/// from one shared source.
pub trait StatsSource: Sync {
    fn summary(&self, period: Period) -> ExpenseResult<StatsSummary>;
}

//! Dashboard service
//!
//! Fetches what the dashboard needs for a `(period, year)` selection and
//! hands it to [`DashboardReport::build`]. The summary itself must load;
//! the previous month's net, the card list and the annual series degrade
//! to defaults on failure.

use crate::api::{ApiClient, StatsSource};
use crate::error::ExpenseResult;
use crate::models::{Card, Money, Period};
use crate::reports::{AnnualSeries, DashboardReport};

/// Service for the dashboard page
pub struct DashboardService<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Load every dashboard panel for the selection
    pub fn load(&self, period: Period, year: i32) -> ExpenseResult<DashboardReport> {
        let cards = self.client.cards().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "card list unavailable for dashboard");
            Vec::new()
        });
        build_report(self.client, period, year, &cards)
    }
}

/// Fetch the summaries for a selection and assemble the report
pub fn build_report<S>(source: &S, period: Period, year: i32, cards: &[Card]) -> ExpenseResult<DashboardReport>
where
    S: StatsSource + ?Sized,
{
    let summary = source.summary(period)?;

    let previous_net = match period {
        Period::All => None,
        Period::Month { .. } => Some(previous_month_net(source, period)),
    };

    let annual = match period {
        Period::All => AnnualSeries::from_all_time(&summary, year),
        Period::Month { .. } => AnnualSeries::fetch_by_month(source, year),
    };

    Ok(DashboardReport::build(
        period,
        year,
        summary,
        cards,
        annual,
        previous_net,
    ))
}

/// Net of the month before `period`; zero when it cannot be loaded
fn previous_month_net<S>(source: &S, period: Period) -> Money
where
    S: StatsSource + ?Sized,
{
    match source.summary(period.prev()) {
        Ok(summary) => summary.totals.net(),
        Err(err) => {
            tracing::debug!(period = %period.prev(), error = %err, "previous month unavailable");
            Money::zero()
        }
    }
}

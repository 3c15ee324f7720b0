//! Month-by-month income/expense series for one year
//!
//! Two strategies: in the all-time view the cached summary's
//! `incomeVsExpense` points are bucketed by `YYYY-MM`; in a month view the
//! twelve monthly summaries of the year are fetched concurrently. The fetch is
//! all-or-nothing: if any month fails, the whole series is zero and the
//! advisory is set.

use std::collections::HashMap;
use std::thread;

use crate::api::StatsSource;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, Period, StatsSummary};

/// Short Spanish month labels used on the chart axis
pub const MONTH_LABELS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Shown when the concurrent fetch fails
pub const YEAR_LOAD_ADVISORY: &str = "Could not load year data";

/// Income and expense for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBar {
    pub label: &'static str,
    pub income: Money,
    pub expense: Money,
}

/// Twelve monthly bars, January first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualSeries {
    pub year: i32,
    pub bars: Vec<MonthBar>,
    /// Set when the per-month fetch failed and the bars were zeroed
    pub load_failed: bool,
}

impl AnnualSeries {
    /// Twelve zero bars
    pub fn empty(year: i32) -> Self {
        Self::from_totals(year, [(Money::zero(), Money::zero()); 12])
    }

    fn from_totals(year: i32, totals: [(Money, Money); 12]) -> Self {
        let bars = MONTH_LABELS
            .iter()
            .zip(totals)
            .map(|(&label, (income, expense))| MonthBar {
                label,
                income,
                expense,
            })
            .collect();
        Self {
            year,
            bars,
            load_failed: false,
        }
    }

    /// Bucket the all-time summary's points that fall in `year`
    pub fn from_all_time(summary: &StatsSummary, year: i32) -> Self {
        let mut by_month: HashMap<&str, (Money, Money)> = HashMap::new();
        for point in &summary.income_vs_expense {
            let Some(key) = point.date.get(..7) else {
                continue;
            };
            let point_year: Option<i32> = point.date.get(..4).and_then(|y| y.parse().ok());
            if point_year != Some(year) {
                continue;
            }
            let entry = by_month.entry(key).or_default();
            entry.0 += point.income;
            entry.1 += point.expense;
        }

        let totals = std::array::from_fn(|i| {
            let key = format!("{:04}-{:02}", year, i + 1);
            by_month.get(key.as_str()).copied().unwrap_or_default()
        });
        Self::from_totals(year, totals)
    }

    /// Fetch the twelve monthly summaries concurrently.
    ///
    /// Waits for every request to settle. Any failure yields the all-zero
    /// series with `load_failed` set.
    pub fn fetch_by_month<S>(source: &S, year: i32) -> Self
    where
        S: StatsSource + ?Sized,
    {
        match fetch_months(source, year) {
            Ok(totals) => Self::from_totals(year, totals),
            Err(err) => {
                tracing::warn!(year, error = %err, "failed to load monthly summaries");
                Self {
                    load_failed: true,
                    ..Self::empty(year)
                }
            }
        }
    }

    /// Advisory text when the data could not be loaded
    pub fn advisory(&self) -> Option<&'static str> {
        self.load_failed.then_some(YEAR_LOAD_ADVISORY)
    }

    /// Largest single bar value, for chart scaling
    pub fn max_value(&self) -> Money {
        self.bars
            .iter()
            .flat_map(|b| [b.income, b.expense])
            .max()
            .unwrap_or_default()
    }
}

fn fetch_months<S>(source: &S, year: i32) -> ExpenseResult<[(Money, Money); 12]>
where
    S: StatsSource + ?Sized,
{
    let months = Period::months_of(year);

    let results: Vec<ExpenseResult<(Money, Money)>> = thread::scope(|scope| {
        let handles: Vec<_> = months
            .iter()
            .map(|&period| {
                scope.spawn(move || {
                    source
                        .summary(period)
                        .map(|s| (s.totals.income, s.totals.expense))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(ExpenseError::Network("summary worker panicked".into())))
            })
            .collect()
    });

    let mut totals = [(Money::zero(), Money::zero()); 12];
    for (slot, result) in totals.iter_mut().zip(results) {
        *slot = result?;
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::IncomeExpensePoint;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeStats {
        fail_month: Option<u32>,
        calls: AtomicUsize,
    }

    impl StatsSource for FakeStats {
        fn summary(&self, period: Period) -> ExpenseResult<StatsSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let Period::Month { month, .. } = period else {
                return Ok(StatsSummary::default());
            };
            if Some(month) == self.fail_month {
                return Err(ExpenseError::Api {
                    status: 500,
                    message: None,
                });
            }
            let mut summary = StatsSummary::default();
            summary.totals.income = Money::from_cents(month as i64 * 100);
            summary.totals.expense = Money::from_cents(month as i64 * 10);
            Ok(summary)
        }
    }

    #[test]
    fn test_labels() {
        let series = AnnualSeries::empty(2025);
        let labels: Vec<&str> = series.bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, MONTH_LABELS.to_vec());
        assert_eq!(series.advisory(), None);
    }

    #[test]
    fn test_fetch_by_month_success() {
        let source = FakeStats {
            fail_month: None,
            calls: AtomicUsize::new(0),
        };
        let series = AnnualSeries::fetch_by_month(&source, 2025);
        assert_eq!(source.calls.load(Ordering::SeqCst), 12);
        assert!(!series.load_failed);
        assert_eq!(series.bars[0].income.cents(), 100);
        assert_eq!(series.bars[11].expense.cents(), 120);
        assert_eq!(series.max_value().cents(), 1200);
    }

    #[test]
    fn test_fetch_by_month_is_all_or_nothing() {
        let source = FakeStats {
            fail_month: Some(7),
            calls: AtomicUsize::new(0),
        };
        let series = AnnualSeries::fetch_by_month(&source, 2025);
        assert_eq!(source.calls.load(Ordering::SeqCst), 12);
        assert!(series.load_failed);
        assert_eq!(series.advisory(), Some(YEAR_LOAD_ADVISORY));
        assert!(series
            .bars
            .iter()
            .all(|b| b.income.is_zero() && b.expense.is_zero()));
    }

    #[test]
    fn test_from_all_time_filters_year() {
        let mut summary = StatsSummary::default();
        summary.income_vs_expense = vec![
            IncomeExpensePoint {
                date: "2025-03-01".into(),
                income: Money::from_cents(1000),
                expense: Money::from_cents(200),
            },
            IncomeExpensePoint {
                date: "2025-03-15".into(),
                income: Money::from_cents(500),
                expense: Money::zero(),
            },
            IncomeExpensePoint {
                date: "2024-03-01".into(),
                income: Money::from_cents(9999),
                expense: Money::zero(),
            },
            IncomeExpensePoint {
                date: "bad".into(),
                income: Money::from_cents(1),
                expense: Money::zero(),
            },
        ];

        let series = AnnualSeries::from_all_time(&summary, 2025);
        assert_eq!(series.bars[2].income.cents(), 1500);
        assert_eq!(series.bars[2].expense.cents(), 200);
        assert!(series.bars[3].income.is_zero());
        assert!(!series.load_failed);
    }
}

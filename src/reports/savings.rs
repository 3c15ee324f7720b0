//! Savings plan progress and history
//!
//! History rows are the plan's manual contributions followed by the
//! auto-linked transactions, in the order the API returned them.

use crate::display::truncate;
use crate::models::{ContributionId, Money, SavingsPlan, SavingsSummary, TransactionId};
use crate::services::pagination::Paginator;

/// Progress at or above this percent counts as "almost there"
pub const NEAR_GOAL_PERCENT: i64 = 90;

/// Description used for contributions without a note
pub const DEFAULT_CONTRIBUTION_NOTE: &str = "Contribución";

/// Where a history row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    /// A manual contribution (editable)
    Manual(ContributionId),
    /// A transaction in the linked category (read-only)
    Auto(TransactionId),
}

/// One row of the savings history table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub source: HistorySource,
    pub date: String,
    pub description: String,
    pub amount: Money,
}

impl HistoryRow {
    pub fn is_manual(&self) -> bool {
        matches!(self.source, HistorySource::Manual(_))
    }

    /// "manual" or "auto"
    pub fn kind_label(&self) -> &'static str {
        match self.source {
            HistorySource::Manual(_) => "manual",
            HistorySource::Auto(_) => "auto",
        }
    }
}

/// Manual rows first, then auto rows; no re-sorting
pub fn history_rows(summary: &SavingsSummary) -> Vec<HistoryRow> {
    let manual = summary.contributions.iter().map(|c| HistoryRow {
        source: HistorySource::Manual(c.id),
        date: c.date.clone(),
        description: c
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_CONTRIBUTION_NOTE)
            .to_string(),
        amount: c.amount,
    });
    let auto = summary.auto_transactions.iter().map(|t| HistoryRow {
        source: HistorySource::Auto(t.id),
        date: t.date.clone(),
        description: t.description.clone(),
        amount: t.amount,
    });
    manual.chain(auto).collect()
}

/// Headline numbers for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsProgress {
    pub target: Money,
    pub saved: Money,
    pub remaining: Money,
    /// Rounded progress percent as reported by the API
    pub percent: i64,
}

impl SavingsProgress {
    pub fn new(plan: &SavingsPlan, summary: &SavingsSummary) -> Self {
        let percent = if summary.progress_percent.is_finite() {
            summary.progress_percent.round() as i64
        } else {
            0
        };
        Self {
            target: plan.target_amount,
            saved: summary.total_manual + summary.total_auto,
            remaining: summary.remaining,
            percent,
        }
    }

    pub fn is_near_goal(&self) -> bool {
        self.percent >= NEAR_GOAL_PERCENT
    }

    /// Width of a progress bar in percent, capped at 100
    pub fn bar_width(&self) -> u16 {
        self.percent.clamp(0, 100) as u16
    }
}

/// A plan's progress plus one page of its history
#[derive(Debug, Clone)]
pub struct SavingsReport {
    pub plan: SavingsPlan,
    pub progress: SavingsProgress,
    pub rows: Vec<HistoryRow>,
    pub pager: Paginator,
}

impl SavingsReport {
    pub fn new(plan: SavingsPlan, summary: &SavingsSummary, mut pager: Paginator) -> Self {
        let rows = history_rows(summary);
        pager.set_total(rows.len());
        Self {
            progress: SavingsProgress::new(&plan, summary),
            plan,
            rows,
            pager,
        }
    }

    /// Rows on the current page
    pub fn page_rows(&self) -> &[HistoryRow] {
        &self.rows[self.pager.range()]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Savings plan: {}\n", self.plan.name));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!("Target:    {}\n", self.progress.target));
        output.push_str(&format!("Saved:     {}\n", self.progress.saved));
        output.push_str(&format!(
            "Remaining: {} ({}% complete)\n",
            self.progress.remaining, self.progress.percent
        ));
        output.push_str(&format!(
            "[{:<20}]\n",
            "#".repeat((self.progress.bar_width() / 5) as usize)
        ));
        if self.progress.is_near_goal() {
            output.push_str("Almost there!\n");
        }

        output.push_str(&format!(
            "\n{:<12} {:<30} {:>12} {:<8}\n",
            "Date", "Description", "Amount", "Source"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No contributions yet\n");
        }
        for row in self.page_rows() {
            output.push_str(&format!(
                "{:<12} {:<30} {:>12} {:<8}\n",
                row.date,
                truncate(&row.description, 30),
                row.amount.to_string(),
                row.kind_label()
            ));
        }

        output.push_str(&format!(
            "\n{} ({} rows, {} per page)\n",
            self.pager.label(),
            self.pager.total(),
            self.pager.page_size()
        ));
        output
    }
}

//! Dashboard derivations
//!
//! Pure functions over a [`StatsSummary`]: payment-method split, budget
//! progress with its colour band, category shares, per-card usage, the
//! initial/final balance bars and the year selector options. The assembled
//! [`DashboardReport`] is what the CLI prints and the TUI draws.

use chrono::Datelike;
use std::collections::BTreeSet;

use super::annual::AnnualSeries;
use crate::models::card::DEFAULT_CARD_COLOR;
use crate::models::summary::PaymentMethodTotals;
use crate::models::{Card, Money, Period, StatsSummary};

/// Cash vs card totals with one-decimal percentages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSplit {
    pub cash: Money,
    pub card: Money,
    pub total: Money,
    pub cash_pct: f64,
    pub card_pct: f64,
}

impl PaymentSplit {
    pub fn from_totals(totals: &PaymentMethodTotals) -> Self {
        let total = totals.cash + totals.card;
        Self {
            cash: totals.cash,
            card: totals.card,
            total,
            cash_pct: percent_one_decimal(totals.cash, total),
            card_pct: percent_one_decimal(totals.card, total),
        }
    }
}

/// `round(value / total * 1000) / 10`, or 0 when there is no total
fn percent_one_decimal(value: Money, total: Money) -> f64 {
    if total.cents() <= 0 {
        return 0.0;
    }
    (value.cents() as f64 / total.cents() as f64 * 1000.0).round() / 10.0
}

/// Colour band for budget consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBand {
    Green,
    Orange,
    Red,
}

/// Budget vs actual spending for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetProgress {
    pub budget: Money,
    pub actual: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// `round(actual / budget * 100)`, undefined without a positive budget
    pub consumed_percent: Option<i64>,
}

impl BudgetProgress {
    pub fn new(budget: Money, actual: Money) -> Self {
        let consumed_percent = if budget.is_positive() {
            Some((actual.cents() as f64 / budget.cents() as f64 * 100.0).round() as i64)
        } else {
            None
        };
        Self {
            budget,
            actual,
            remaining: budget - actual,
            consumed_percent,
        }
    }

    /// Overspend is red; otherwise red at ≤10% left, orange at ≤30% left
    pub fn band(&self) -> BudgetBand {
        if self.remaining.is_negative() {
            return BudgetBand::Red;
        }
        match self.consumed_percent {
            Some(consumed) => {
                let remaining_pct = 100 - consumed;
                if remaining_pct <= 10 {
                    BudgetBand::Red
                } else if remaining_pct <= 30 {
                    BudgetBand::Orange
                } else {
                    BudgetBand::Green
                }
            }
            None => BudgetBand::Green,
        }
    }

    /// Width of the progress bar in percent, capped at 100
    pub fn bar_width(&self) -> u16 {
        self.consumed_percent.unwrap_or(0).clamp(0, 100) as u16
    }

    pub fn is_over_budget(&self) -> bool {
        self.consumed_percent.is_some_and(|c| c > 100)
    }

    /// "95%" or "120% (over budget)"
    pub fn consumed_label(&self) -> String {
        let consumed = self.consumed_percent.unwrap_or(0);
        if self.is_over_budget() {
            format!("{}% (over budget)", consumed)
        } else {
            format!("{}%", consumed)
        }
    }
}

/// What the budget panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// The all-time view has nothing to compare against
    AllTime,
    /// No budget exists for the month
    NoBudget,
    Progress(BudgetProgress),
}

impl BudgetStatus {
    pub fn derive(period: Period, summary: &StatsSummary) -> Self {
        if period.is_all() {
            return Self::AllTime;
        }
        match summary.budget_amount {
            None => Self::NoBudget,
            Some(budget) => Self::Progress(BudgetProgress::new(budget, summary.totals.expense)),
        }
    }

    /// Placeholder text when there is no progress to show
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::AllTime => Some("Select a specific month to compare against the monthly budget"),
            Self::NoBudget => Some("No budget set for this month"),
            Self::Progress(_) => None,
        }
    }
}

/// One slice of the expenses-by-category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Money,
    pub color: Option<String>,
    /// Whole-number percent of total expense
    pub percent: i64,
}

pub fn category_shares(summary: &StatsSummary) -> Vec<CategoryShare> {
    let total = summary.totals.expense;
    summary
        .categories
        .iter()
        .map(|c| CategoryShare {
            name: c.name.clone(),
            amount: c.amount,
            color: c.color.clone(),
            percent: if total.is_positive() {
                (c.amount.cents() as f64 / total.cents() as f64 * 100.0).round() as i64
            } else {
                0
            },
        })
        .collect()
}

/// Spending on one card, decorated with the card's colour and digits
#[derive(Debug, Clone, PartialEq)]
pub struct CardUsage {
    pub name: String,
    pub amount: Money,
    pub color: String,
    pub last4: String,
}

/// Enrich `perCard` totals with card details, matched by name
pub fn card_usage(summary: &StatsSummary, cards: &[Card]) -> Vec<CardUsage> {
    summary
        .per_card
        .iter()
        .map(|(name, amount)| {
            let card = cards.iter().find(|c| &c.name == name);
            CardUsage {
                name: name.clone(),
                amount: *amount,
                color: card
                    .map(|c| c.color.clone())
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
                last4: card.and_then(|c| c.last4.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Base height of a balance bar
pub const BAR_BASE_HEIGHT: u32 = 40;
/// Height added for the larger of the two balances
pub const BAR_SCALE_HEIGHT: u32 = 150;

/// Opening and closing balance of a month, with relative bar heights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceBars {
    pub initial: Money,
    pub final_balance: Money,
    pub initial_height: u32,
    pub final_height: u32,
}

impl BalanceBars {
    /// `initial` is the previous month's net; `month_net` is this month's
    pub fn new(initial: Money, month_net: Money) -> Self {
        let final_balance = initial + month_net;
        let max = initial.abs().max(final_balance.abs());
        Self {
            initial,
            final_balance,
            initial_height: bar_height(initial, max),
            final_height: bar_height(final_balance, max),
        }
    }
}

fn bar_height(value: Money, max: Money) -> u32 {
    let scale = if max.is_positive() {
        (value.abs().cents() as f64 / max.cents() as f64 * BAR_SCALE_HEIGHT as f64).round() as u32
    } else {
        0
    };
    BAR_BASE_HEIGHT + scale
}

/// Years offered in the year selector.
///
/// In the all-time view with data: the distinct years present, newest first.
/// Otherwise the current year and the six before it.
pub fn year_options(period: Period, summary: Option<&StatsSummary>, current_year: i32) -> Vec<i32> {
    let recent = || (0..7).map(|i| current_year - i).collect::<Vec<_>>();

    if !period.is_all() {
        return recent();
    }
    let Some(summary) = summary else {
        return recent();
    };

    let years: BTreeSet<i32> = summary
        .income_vs_expense
        .iter()
        .filter_map(|p| p.date.get(..4).and_then(|y| y.parse().ok()))
        .filter(|&y| y != 0)
        .collect();

    if years.is_empty() {
        recent()
    } else {
        years.into_iter().rev().collect()
    }
}

/// The current calendar year
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Everything the dashboard shows for one period
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub period: Period,
    pub year: i32,
    pub summary: StatsSummary,
    pub payment: PaymentSplit,
    pub budget: BudgetStatus,
    pub categories: Vec<CategoryShare>,
    pub cards: Vec<CardUsage>,
    pub annual: AnnualSeries,
    /// Only for a specific month
    pub balance: Option<BalanceBars>,
    pub year_options: Vec<i32>,
}

impl DashboardReport {
    /// Assemble the derived panels from already-fetched data
    pub fn build(
        period: Period,
        year: i32,
        summary: StatsSummary,
        cards: &[Card],
        annual: AnnualSeries,
        previous_net: Option<Money>,
    ) -> Self {
        let balance = match period {
            Period::All => None,
            Period::Month { .. } => Some(BalanceBars::new(
                previous_net.unwrap_or_default(),
                summary.totals.net(),
            )),
        };

        Self {
            period,
            year,
            payment: PaymentSplit::from_totals(&summary.payment_methods),
            budget: BudgetStatus::derive(period, &summary),
            categories: category_shares(&summary),
            cards: card_usage(&summary, cards),
            year_options: year_options(period, Some(&summary), current_year()),
            annual,
            balance,
            summary,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let totals = &self.summary.totals;

        output.push_str(&format!("Dashboard: {}\n", self.period.label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>14}\n", "Income", totals.income.to_string()));
        output.push_str(&format!("{:<20} {:>14}\n", "Expenses", totals.expense.to_string()));
        output.push_str(&format!("{:<20} {:>14}\n", "Balance", totals.net().to_string()));
        output.push_str(&format!("{:<20} {:>14}\n", "Transactions", totals.transactions));

        if let Some(balance) = &self.balance {
            output.push_str("\nOpening vs closing balance\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            output.push_str(&format!("{:<20} {:>14}\n", "Initial", balance.initial.to_string()));
            output.push_str(&format!(
                "{:<20} {:>14}\n",
                "Final",
                balance.final_balance.to_string()
            ));
        }

        output.push_str(&format!("\nIncome vs expenses {}\n", self.annual.year));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if let Some(advisory) = self.annual.advisory() {
            output.push_str(&format!("! {}\n", advisory));
        }
        for bar in &self.annual.bars {
            output.push_str(&format!(
                "{:<6} {:>14} {:>14}\n",
                bar.label,
                bar.income.to_string(),
                bar.expense.to_string()
            ));
        }

        output.push_str("\nBudget vs actual\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        match &self.budget {
            BudgetStatus::Progress(progress) => {
                output.push_str(&format!("Budget: {}  Actual: {}\n", progress.budget, progress.actual));
                output.push_str(&format!(
                    "[{:<20}] {}\n",
                    "#".repeat((progress.bar_width() / 5) as usize),
                    progress.consumed_label()
                ));
                output.push_str(&format!("Remaining: {}\n", progress.remaining));
            }
            other => {
                if let Some(message) = other.message() {
                    output.push_str(&format!("{}\n", message));
                }
            }
        }

        output.push_str("\nPayment methods\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} {:>7.1}%\n",
            "Cash",
            self.payment.cash.to_string(),
            self.payment.cash_pct
        ));
        output.push_str(&format!(
            "{:<20} {:>14} {:>7.1}%\n",
            "Card",
            self.payment.card.to_string(),
            self.payment.card_pct
        ));

        if !self.categories.is_empty() {
            output.push_str("\nExpenses by category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for category in &self.categories {
                output.push_str(&format!(
                    "{:<30} {:>14} {:>6}%\n",
                    category.name,
                    category.amount.to_string(),
                    category.percent
                ));
            }
        }

        if !self.cards.is_empty() {
            output.push_str("\nCredit card usage\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for card in &self.cards {
                let digits = if card.last4.is_empty() {
                    String::new()
                } else {
                    format!(" •••• {}", card.last4)
                };
                output.push_str(&format!(
                    "{:<30} {:>14}\n",
                    format!("{}{}", card.name, digits),
                    card.amount.to_string()
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::{CategoryTotal, IncomeExpensePoint};
    use crate::models::CardId;

    fn money(units: i64) -> Money {
        Money::from_cents(units * 100)
    }

    #[test]
    fn test_payment_split_sums_to_100() {
        let split = PaymentSplit::from_totals(&PaymentMethodTotals {
            cash: money(1),
            card: money(2),
        });
        assert_eq!(split.cash_pct, 33.3);
        assert_eq!(split.card_pct, 66.7);
        assert!((split.cash_pct + split.card_pct - 100.0).abs() <= 0.1);
    }

    #[test]
    fn test_payment_split_zero_total() {
        let split = PaymentSplit::from_totals(&PaymentMethodTotals::default());
        assert_eq!(split.cash_pct, 0.0);
        assert_eq!(split.card_pct, 0.0);
    }

    #[test]
    fn test_budget_bands() {
        assert_eq!(BudgetProgress::new(money(100), money(95)).band(), BudgetBand::Red);
        assert_eq!(BudgetProgress::new(money(100), money(90)).band(), BudgetBand::Red);
        assert_eq!(BudgetProgress::new(money(100), money(75)).band(), BudgetBand::Orange);
        assert_eq!(BudgetProgress::new(money(100), money(70)).band(), BudgetBand::Orange);
        assert_eq!(BudgetProgress::new(money(100), money(50)).band(), BudgetBand::Green);
        assert_eq!(BudgetProgress::new(money(100), money(120)).band(), BudgetBand::Red);
    }

    #[test]
    fn test_budget_over_label_and_width() {
        let progress = BudgetProgress::new(money(100), money(120));
        assert_eq!(progress.consumed_percent, Some(120));
        assert_eq!(progress.bar_width(), 100);
        assert_eq!(progress.consumed_label(), "120% (over budget)");
        assert_eq!(progress.remaining, money(-20));
    }

    #[test]
    fn test_zero_budget_has_no_percent() {
        let progress = BudgetProgress::new(Money::zero(), money(10));
        assert_eq!(progress.consumed_percent, None);
        assert_eq!(progress.band(), BudgetBand::Red);
        assert_eq!(BudgetProgress::new(Money::zero(), Money::zero()).band(), BudgetBand::Green);
    }

    #[test]
    fn test_budget_status_messages() {
        let mut summary = StatsSummary::default();
        assert_eq!(BudgetStatus::derive(Period::All, &summary), BudgetStatus::AllTime);

        let month = Period::month(2025, 11).unwrap();
        assert_eq!(BudgetStatus::derive(month, &summary), BudgetStatus::NoBudget);
        assert_eq!(
            BudgetStatus::NoBudget.message(),
            Some("No budget set for this month")
        );

        summary.budget_amount = Some(money(100));
        assert!(matches!(
            BudgetStatus::derive(month, &summary),
            BudgetStatus::Progress(_)
        ));
    }

    #[test]
    fn test_category_shares() {
        let mut summary = StatsSummary::default();
        summary.totals.expense = money(300);
        summary.categories = vec![
            CategoryTotal {
                name: "Food".into(),
                amount: money(200),
                color: None,
            },
            CategoryTotal {
                name: "Fun".into(),
                amount: money(100),
                color: None,
            },
        ];
        let shares = category_shares(&summary);
        assert_eq!(shares[0].percent, 67);
        assert_eq!(shares[1].percent, 33);
    }

    #[test]
    fn test_card_usage_enrichment() {
        let mut summary = StatsSummary::default();
        summary.per_card.insert("Visa".into(), money(50));
        summary.per_card.insert("Unknown".into(), money(5));
        let cards = vec![Card {
            id: CardId::new(1),
            name: "Visa".into(),
            color: "#123456".into(),
            last4: Some("4242".into()),
        }];

        let usage = card_usage(&summary, &cards);
        let unknown = usage.iter().find(|u| u.name == "Unknown").unwrap();
        assert_eq!(unknown.color, DEFAULT_CARD_COLOR);
        assert_eq!(unknown.last4, "");
        let visa = usage.iter().find(|u| u.name == "Visa").unwrap();
        assert_eq!(visa.color, "#123456");
        assert_eq!(visa.last4, "4242");
    }

    #[test]
    fn test_balance_bars() {
        let bars = BalanceBars::new(money(100), money(-50));
        assert_eq!(bars.final_balance, money(50));
        assert_eq!(bars.initial_height, 190);
        assert_eq!(bars.final_height, 115);

        let flat = BalanceBars::new(Money::zero(), Money::zero());
        assert_eq!(flat.initial_height, 40);
        assert_eq!(flat.final_height, 40);
    }

    #[test]
    fn test_year_options() {
        assert_eq!(
            year_options(Period::All, None, 2025),
            vec![2025, 2024, 2023, 2022, 2021, 2020, 2019]
        );

        let mut summary = StatsSummary::default();
        summary.income_vs_expense = vec![
            IncomeExpensePoint {
                date: "2023-05-01".into(),
                income: Money::zero(),
                expense: Money::zero(),
            },
            IncomeExpensePoint {
                date: "2025-01-01".into(),
                income: Money::zero(),
                expense: Money::zero(),
            },
            IncomeExpensePoint {
                date: "2023-06-01".into(),
                income: Money::zero(),
                expense: Money::zero(),
            },
        ];
        assert_eq!(year_options(Period::All, Some(&summary), 2025), vec![2025, 2023]);

        let month = Period::month(2025, 1).unwrap();
        assert_eq!(year_options(month, Some(&summary), 2025).len(), 7);
    }
}

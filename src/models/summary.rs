//! Statistics summary returned by `/stats/summary`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Aggregate totals for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub transactions: u64,
}

impl Totals {
    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub color: Option<String>,
}

/// Cash vs card split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PaymentMethodTotals {
    pub cash: Money,
    pub card: Money,
}

/// One point of the income-vs-expense series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpensePoint {
    pub date: String,
    #[serde(default)]
    pub income: Money,
    #[serde(default)]
    pub expense: Money,
}

/// Backend aggregate for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSummary {
    pub totals: Totals,
    pub categories: Vec<CategoryTotal>,
    /// Card name to amount spent
    pub per_card: BTreeMap<String, Money>,
    pub payment_methods: PaymentMethodTotals,
    /// Budget for the month, absent when none is set or for the all-time view
    pub budget_amount: Option<Money>,
    pub income_vs_expense: Vec<IncomeExpensePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let json = r##"{
            "totals": {"income": 1200, "expense": 450.25, "transactions": 7},
            "categories": [{"name": "Food", "amount": 200, "color": "#f00"}],
            "perCard": {"Visa": 120.5},
            "paymentMethods": {"cash": 329.75, "card": 120.5},
            "budgetAmount": null,
            "incomeVsExpense": [{"date": "2025-11-01", "income": 1200, "expense": 0}]
        }"##;
        let summary: StatsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.totals.net().cents(), 74_975);
        assert_eq!(summary.per_card["Visa"].cents(), 12_050);
        assert!(summary.budget_amount.is_none());
        assert_eq!(summary.income_vs_expense.len(), 1);
    }

    #[test]
    fn test_null_amounts_are_zero() {
        let json = r#"{
            "totals": {"income": null, "expense": null, "transactions": 0},
            "categories": [{"name": "Food", "amount": null}],
            "paymentMethods": {"cash": null, "card": null}
        }"#;
        let summary: StatsSummary = serde_json::from_str(json).unwrap();
        assert!(summary.totals.income.is_zero());
        assert!(summary.totals.expense.is_zero());
        assert!(summary.categories[0].amount.is_zero());
        assert!(summary.payment_methods.cash.is_zero());
    }

    #[test]
    fn test_empty_body_defaults() {
        let summary: StatsSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.totals.income.is_zero());
        assert!(summary.categories.is_empty());
    }
}

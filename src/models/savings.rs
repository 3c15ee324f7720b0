//! Savings plan models
//!
//! A plan has a target amount and is fed by manual contributions plus, when a
//! category is linked, every transaction recorded in that category.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ContributionId, PlanId};
use super::money::Money;
use super::transaction::Transaction;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlan {
    pub id: PlanId,

    pub name: String,

    #[serde(default)]
    pub target_amount: Money,

    #[serde(default)]
    pub linked_category_id: Option<CategoryId>,
}

/// Body for creating or updating a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub name: String,
    pub target_amount: Money,
    pub linked_category_id: Option<CategoryId>,
}

impl PlanInput {
    pub fn from_existing(plan: &SavingsPlan) -> Self {
        Self {
            name: plan.name.clone(),
            target_amount: plan.target_amount,
            linked_category_id: plan.linked_category_id,
        }
    }
}

/// A manual contribution to a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: ContributionId,

    #[serde(default)]
    pub plan_id: Option<PlanId>,

    pub amount: Money,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub note: Option<String>,
}

/// Body for creating a contribution (`plan_id` set) or updating one (`None`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<PlanId>,
    pub amount: Money,
    pub date: String,
    pub note: Option<String>,
}

/// Server-side aggregate for one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SavingsSummary {
    pub total_manual: Money,
    pub total_auto: Money,
    pub remaining: Money,
    pub progress_percent: f64,
    pub contributions: Vec<Contribution>,
    pub auto_transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_parses_partial_body() {
        let summary: SavingsSummary = serde_json::from_str(
            r#"{"totalManual":100,"totalAuto":"50.5","remaining":849.5,"progressPercent":15.05}"#,
        )
        .unwrap();
        assert_eq!(summary.total_manual.cents(), 10_000);
        assert_eq!(summary.total_auto.cents(), 5_050);
        assert!(summary.contributions.is_empty());
        assert!(summary.auto_transactions.is_empty());
    }

    #[test]
    fn test_contribution_input_wire_shape() {
        let input = ContributionInput {
            plan_id: Some(PlanId::new(2)),
            amount: Money::from_cents(2_500),
            date: "2025-11-01".into(),
            note: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["planId"], 2);
        assert!(value["note"].is_null());

        let update = ContributionInput { plan_id: None, ..input };
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("planId").is_none());
    }

    #[test]
    fn test_plan_without_link() {
        let plan: SavingsPlan =
            serde_json::from_str(r#"{"id":1,"name":"Trip","targetAmount":1000,"linkedCategoryId":null}"#)
                .unwrap();
        assert_eq!(plan.linked_category_id, None);
        assert_eq!(plan.target_amount.cents(), 100_000);
    }
}

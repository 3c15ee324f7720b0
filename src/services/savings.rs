//! Savings plan service

use crate::api::ApiClient;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    CategoryId, Contribution, ContributionId, ContributionInput, Money, PlanId, PlanInput,
    SavingsPlan, SavingsSummary,
};
use crate::reports::SavingsReport;
use crate::services::pagination::Paginator;

/// Service for savings plans and their contributions
pub struct SavingsService<'a> {
    client: &'a ApiClient,
}

impl<'a> SavingsService<'a> {
    /// Create a new savings service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn plans(&self) -> ExpenseResult<Vec<SavingsPlan>> {
        self.client.plans()
    }

    /// Find a plan by id or case-insensitive name
    pub fn find_plan(&self, identifier: &str) -> ExpenseResult<SavingsPlan> {
        let plans = self.plans()?;
        find_plan(&plans, identifier).cloned()
    }

    pub fn create_plan(
        &self,
        name: &str,
        target: Money,
        linked_category: Option<CategoryId>,
    ) -> ExpenseResult<SavingsPlan> {
        let input = plan_input(name, target, linked_category)?;
        let plan = self.client.create_plan(&input)?;
        tracing::info!(id = %plan.id, name = %plan.name, "savings plan created");
        Ok(plan)
    }

    pub fn update_plan(&self, id: PlanId, input: PlanInput) -> ExpenseResult<SavingsPlan> {
        let input = plan_input(&input.name, input.target_amount, input.linked_category_id)?;
        let plan = self.client.update_plan(id, &input)?;
        tracing::info!(%id, "savings plan updated");
        Ok(plan)
    }

    pub fn delete_plan(&self, id: PlanId) -> ExpenseResult<()> {
        self.client.delete_plan(id)?;
        tracing::info!(%id, "savings plan deleted");
        Ok(())
    }

    pub fn summary(&self, id: PlanId) -> ExpenseResult<SavingsSummary> {
        self.client.plan_summary(id)
    }

    /// Progress and one page of history for a plan
    pub fn report(&self, plan: SavingsPlan, pager: Paginator) -> ExpenseResult<SavingsReport> {
        let summary = self.summary(plan.id)?;
        Ok(SavingsReport::new(plan, &summary, pager))
    }

    /// Add a manual contribution; the date defaults to today
    pub fn add_contribution(
        &self,
        plan: PlanId,
        amount: Money,
        date: Option<&str>,
        note: Option<&str>,
    ) -> ExpenseResult<Contribution> {
        let input = contribution_input(Some(plan), amount, date, note)?;
        let contribution = self.client.create_contribution(&input)?;
        tracing::info!(%plan, amount = %amount, "contribution added");
        Ok(contribution)
    }

    pub fn update_contribution(
        &self,
        id: ContributionId,
        amount: Money,
        date: Option<&str>,
        note: Option<&str>,
    ) -> ExpenseResult<()> {
        let input = contribution_input(None, amount, date, note)?;
        self.client.update_contribution(id, &input)
    }

    pub fn delete_contribution(&self, id: ContributionId) -> ExpenseResult<()> {
        self.client.delete_contribution(id)
    }
}

/// The remembered plan if it still exists, else the first plan
pub fn select(plans: &[SavingsPlan], remembered: Option<PlanId>) -> Option<&SavingsPlan> {
    remembered
        .and_then(|id| plans.iter().find(|p| p.id == id))
        .or_else(|| plans.first())
}

pub fn find_plan<'p>(plans: &'p [SavingsPlan], identifier: &str) -> ExpenseResult<&'p SavingsPlan> {
    let identifier = identifier.trim();
    let by_id = identifier
        .parse()
        .ok()
        .and_then(|id: PlanId| plans.iter().find(|p| p.id == id));
    by_id
        .or_else(|| plans.iter().find(|p| p.name.eq_ignore_ascii_case(identifier)))
        .ok_or_else(|| ExpenseError::plan_not_found(identifier))
}

fn plan_input(
    name: &str,
    target: Money,
    linked_category: Option<CategoryId>,
) -> ExpenseResult<PlanInput> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ExpenseError::Validation("Plan name is required".into()));
    }
    if !target.is_positive() {
        return Err(ExpenseError::Validation(
            "Target amount must be greater than 0".into(),
        ));
    }
    Ok(PlanInput {
        name: name.to_string(),
        target_amount: target,
        linked_category_id: linked_category,
    })
}

fn contribution_input(
    plan: Option<PlanId>,
    amount: Money,
    date: Option<&str>,
    note: Option<&str>,
) -> ExpenseResult<ContributionInput> {
    if !amount.is_positive() {
        return Err(ExpenseError::Validation(
            "Amount must be greater than 0".into(),
        ));
    }
    let date = date
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(ContributionInput {
        plan_id: plan,
        amount,
        date,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: i64, name: &str) -> SavingsPlan {
        SavingsPlan {
            id: PlanId::new(id),
            name: name.into(),
            target_amount: Money::from_cents(100_000),
            linked_category_id: None,
        }
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let plans = vec![plan(1, "Trip"), plan(2, "Laptop")];
        assert_eq!(select(&plans, Some(PlanId::new(2))).unwrap().name, "Laptop");
        assert_eq!(select(&plans, Some(PlanId::new(5))).unwrap().name, "Trip");
        assert!(select(&[], None).is_none());
    }

    #[test]
    fn test_find_plan() {
        let plans = vec![plan(1, "Trip"), plan(2, "Laptop")];
        assert_eq!(find_plan(&plans, "plan-2").unwrap().name, "Laptop");
        assert_eq!(find_plan(&plans, "trip").unwrap().id, PlanId::new(1));
        assert!(find_plan(&plans, "Car").unwrap_err().is_not_found());
    }

    #[test]
    fn test_plan_rules() {
        assert!(plan_input("Trip", Money::from_cents(1), None).is_ok());
        assert!(plan_input(" ", Money::from_cents(1), None).is_err());
        assert!(plan_input("Trip", Money::zero(), None).is_err());
    }

    #[test]
    fn test_contribution_defaults() {
        let input = contribution_input(Some(PlanId::new(1)), Money::from_cents(100), None, Some("  "))
            .unwrap();
        assert_eq!(input.note, None);
        assert_eq!(input.date.len(), 10);

        let input =
            contribution_input(None, Money::from_cents(100), Some("2025-02-01"), Some(" bonus "))
                .unwrap();
        assert_eq!(input.date, "2025-02-01");
        assert_eq!(input.note.as_deref(), Some("bonus"));

        assert!(contribution_input(None, Money::zero(), None, None).is_err());
    }
}

//! Budget service
//!
//! Monthly expense ceilings. Setting a budget for a month that already has
//! one updates it in place.

use crate::api::ApiClient;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, BudgetId, BudgetInput, Money};

/// Whether a `set` created or replaced a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetOutcome {
    Created,
    Updated,
}

impl BudgetOutcome {
    /// Banner text for the outcome
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created => "Budget set",
            Self::Updated => "Budget updated",
        }
    }
}

/// Service for budget management
pub struct BudgetService<'a> {
    client: &'a ApiClient,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> ExpenseResult<Vec<Budget>> {
        self.client.budgets()
    }

    /// Create a budget for the month, or update the existing one
    pub fn set(&self, month: u32, year: i32, amount: Money) -> ExpenseResult<BudgetOutcome> {
        let input = validate(month, year, amount)?;
        let existing = self.list()?;

        match for_month(&existing, month, year) {
            Some(budget) => {
                self.client.update_budget(budget.id, &input)?;
                tracing::info!(id = %budget.id, month, year, "budget updated");
                Ok(BudgetOutcome::Updated)
            }
            None => {
                self.client.create_budget(&input)?;
                tracing::info!(month, year, "budget created");
                Ok(BudgetOutcome::Created)
            }
        }
    }

    /// Replace a budget by id
    pub fn update(&self, id: BudgetId, month: u32, year: i32, amount: Money) -> ExpenseResult<()> {
        let input = validate(month, year, amount)?;
        self.client.update_budget(id, &input)
    }

    pub fn delete(&self, id: BudgetId) -> ExpenseResult<()> {
        self.client.delete_budget(id)?;
        tracing::info!(%id, "budget deleted");
        Ok(())
    }
}

/// The budget for a month, if one exists
pub fn for_month(budgets: &[Budget], month: u32, year: i32) -> Option<&Budget> {
    budgets.iter().find(|b| b.month == month && b.year == year)
}

fn validate(month: u32, year: i32, amount: Money) -> ExpenseResult<BudgetInput> {
    if !(1..=12).contains(&month) {
        return Err(ExpenseError::Validation(
            "Month must be between 01 and 12".into(),
        ));
    }
    if !(1000..=9999).contains(&year) {
        return Err(ExpenseError::Validation(
            "Year must have four digits".into(),
        ));
    }
    if amount.is_negative() {
        return Err(ExpenseError::Validation(
            "Budget amount cannot be negative".into(),
        ));
    }
    Ok(BudgetInput {
        month,
        year,
        amount,
    })
}

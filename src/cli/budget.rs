//! Budget CLI commands
//!
//! Implements CLI commands for monthly budgets.

use clap::Subcommand;

use crate::context::AppContext;
use crate::display::budget::format_budget_list;
use crate::error::{ExpenseError, ExpenseResult, ResultExt};
use crate::feedback::Feedback;
use crate::models::{BudgetId, Money};
use crate::reports::dashboard::current_year;
use crate::routes::Route;
use crate::services::BudgetService;

use super::{parse_month, print_feedback, require_session, MonthArg};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// List all budgets
    List,
    /// Set the budget for a month (creates or replaces it)
    Set {
        /// Month (1-12, YYYY-MM or a month name)
        #[arg(value_parser = parse_month)]
        month: MonthArg,
        /// Budget amount
        amount: Money,
        /// Year; defaults to this year
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Edit a budget by ID
    Edit {
        /// Budget ID
        id: BudgetId,
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthArg>,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        amount: Option<Money>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &AppContext, cmd: BudgetCommands) -> ExpenseResult<()> {
    let client = require_session(ctx, Route::Transactions)?;
    let service = BudgetService::new(&client);
    let symbol = &ctx.settings().currency_symbol;

    match cmd {
        BudgetCommands::List => {
            let budgets = service.list().context("Failed to load data")?;
            print!("{}", format_budget_list(&budgets, symbol));
        }

        BudgetCommands::Set {
            month,
            amount,
            year,
        } => {
            let year = month.year_or(year).unwrap_or_else(current_year);
            let month = month.month;
            let outcome = service
                .set(month, year, amount)
                .context("Failed to set budget")?;
            print_feedback(&Feedback::success(format!(
                "{} for {:02}/{}: {}",
                outcome.message(),
                month,
                year,
                amount.format_with_symbol(symbol)
            )));
        }

        BudgetCommands::Edit {
            id,
            month,
            year,
            amount,
        } => {
            let budgets = service.list().context("Failed to load data")?;
            let budget = budgets
                .iter()
                .find(|b| b.id == id)
                .ok_or_else(|| budget_not_found(id))?;

            if month.is_none() && year.is_none() && amount.is_none() {
                println!("No changes specified. Use --month, --year or --amount.");
                return Ok(());
            }

            let year = month.map_or(year, |m| m.year_or(year));
            service
                .update(
                    id,
                    month.map_or(budget.month, |m| m.month),
                    year.unwrap_or(budget.year),
                    amount.unwrap_or(budget.amount),
                )
                .context("Failed to update budget")?;
            print_feedback(&Feedback::success("Budget updated"));
        }

        BudgetCommands::Delete { id, force } => {
            if !force {
                let budgets = service.list().context("Failed to load data")?;
                let budget = budgets
                    .iter()
                    .find(|b| b.id == id)
                    .ok_or_else(|| budget_not_found(id))?;
                println!(
                    "About to delete the {} budget of {}",
                    budget.label(),
                    budget.amount.format_with_symbol(symbol)
                );
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(id).context("Failed to delete budget")?;
            print_feedback(&Feedback::success("Budget deleted"));
        }
    }

    Ok(())
}

fn budget_not_found(id: BudgetId) -> ExpenseError {
    ExpenseError::NotFound {
        entity_type: "Budget",
        identifier: id.to_string(),
    }
}

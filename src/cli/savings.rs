//! Savings plan CLI commands

use clap::Subcommand;

use crate::context::AppContext;
use crate::display::savings::format_plan_list;
use crate::error::{ExpenseError, ExpenseResult, ResultExt};
use crate::feedback::Feedback;
use crate::models::{ContributionId, Money, PlanInput, SavingsPlan};
use crate::routes::Route;
use crate::services::pagination::{PageSize, Paginator};
use crate::services::savings::{find_plan, select};
use crate::services::transaction::find_category;
use crate::services::SavingsService;

use super::{print_feedback, require_session};

/// Savings plan subcommands
#[derive(Subcommand, Debug)]
pub enum SavingsCommands {
    /// List savings plans
    List,
    /// Show a plan's progress and history
    Show {
        /// Plan name or ID; defaults to the selected plan
        plan: Option<String>,
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page (5, 10 or 20); defaults to the saved setting
        #[arg(long)]
        page_size: Option<PageSize>,
    },
    /// Create a plan
    Create {
        name: String,
        /// Target amount
        target: Money,
        /// Category whose transactions count toward the plan
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Edit a plan
    Edit {
        /// Plan name or ID
        plan: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<Money>,
        /// Link a category
        #[arg(short, long, conflicts_with = "unlink")]
        category: Option<String>,
        /// Remove the linked category
        #[arg(long)]
        unlink: bool,
    },
    /// Delete a plan
    Delete {
        /// Plan name or ID
        plan: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Make a plan the selected one
    Select {
        /// Plan name or ID
        plan: String,
    },
    /// Add a manual contribution to the selected plan
    Contribute {
        amount: Money,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
        /// Plan name or ID; defaults to the selected plan
        #[arg(short, long)]
        plan: Option<String>,
    },
    /// Edit a manual contribution
    EditContribution {
        id: ContributionId,
        amount: Money,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete a manual contribution
    DeleteContribution {
        id: ContributionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a savings command
pub fn handle_savings_command(ctx: &mut AppContext, cmd: SavingsCommands) -> ExpenseResult<()> {
    let client = require_session(ctx, Route::SavingPlan)?;
    let service = SavingsService::new(&client);
    let symbol = ctx.settings().currency_symbol.clone();

    match cmd {
        SavingsCommands::List => {
            let plans = service.plans().context("Failed to load plans")?;
            let categories = client.categories().unwrap_or_default();
            let selected = select(&plans, ctx.selected_plan()).map(|p| p.id);
            print!("{}", format_plan_list(&plans, &categories, selected, &symbol));
        }

        SavingsCommands::Show {
            plan,
            page,
            page_size,
        } => {
            let plans = service.plans().context("Failed to load plans")?;
            let plan = resolve_plan(ctx, &plans, plan.as_deref())?.clone();

            let size = page_size.unwrap_or_else(|| PageSize::local(ctx.page_size()));
            let mut report = service
                .report(plan, Paginator::new(size))
                .context("Failed to load plan summary")?;
            report.pager.go_to(page);

            print!("{}", report.format_terminal());
        }

        SavingsCommands::Create {
            name,
            target,
            category,
        } => {
            let linked = match category {
                Some(category) => Some(find_category(&client.categories()?, &category)?.id),
                None => None,
            };
            let plan = service
                .create_plan(&name, target, linked)
                .context("Failed to create plan")?;
            ctx.remember_plan(Some(plan.id))?;
            print_feedback(&Feedback::success(format!("Plan created: {}", plan.name)));
        }

        SavingsCommands::Edit {
            plan,
            name,
            target,
            category,
            unlink,
        } => {
            let plans = service.plans().context("Failed to load plans")?;
            let existing = find_plan(&plans, &plan)?;

            let mut input = PlanInput::from_existing(existing);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(target) = target {
                input.target_amount = target;
            }
            if let Some(category) = category {
                input.linked_category_id =
                    Some(find_category(&client.categories()?, &category)?.id);
            }
            if unlink {
                input.linked_category_id = None;
            }

            let updated = service
                .update_plan(existing.id, input)
                .context("Failed to update plan")?;
            print_feedback(&Feedback::success(format!("Plan updated: {}", updated.name)));
        }

        SavingsCommands::Delete { plan, force } => {
            let plans = service.plans().context("Failed to load plans")?;
            let existing = find_plan(&plans, &plan)?;

            if !force {
                println!(
                    "About to delete savings plan: {} (target {})",
                    existing.name,
                    existing.target_amount.format_with_symbol(&symbol)
                );
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service
                .delete_plan(existing.id)
                .context("Failed to delete plan")?;
            if ctx.selected_plan() == Some(existing.id) {
                ctx.remember_plan(None)?;
            }
            print_feedback(&Feedback::success("Plan deleted"));
        }

        SavingsCommands::Select { plan } => {
            let plans = service.plans().context("Failed to load plans")?;
            let found = find_plan(&plans, &plan)?;
            ctx.remember_plan(Some(found.id))?;
            print_feedback(&Feedback::success(format!("Selected plan: {}", found.name)));
        }

        SavingsCommands::Contribute {
            amount,
            date,
            note,
            plan,
        } => {
            let plans = service.plans().context("Failed to load plans")?;
            let plan = resolve_plan(ctx, &plans, plan.as_deref())?;
            service
                .add_contribution(plan.id, amount, date.as_deref(), note.as_deref())
                .context("Failed to add contribution")?;
            print_feedback(&Feedback::success(format!(
                "Contribution added to {}: {}",
                plan.name,
                amount.format_with_symbol(&symbol)
            )));
        }

        SavingsCommands::EditContribution {
            id,
            amount,
            date,
            note,
        } => {
            service
                .update_contribution(id, amount, date.as_deref(), note.as_deref())
                .context("Failed to update contribution")?;
            print_feedback(&Feedback::success("Contribution updated"));
        }

        SavingsCommands::DeleteContribution { id, force } => {
            if !force {
                println!("About to delete contribution {}", id);
                println!("Use --force to confirm deletion");
                return Ok(());
            }
            service
                .delete_contribution(id)
                .context("Failed to delete contribution")?;
            print_feedback(&Feedback::success("Contribution deleted"));
        }
    }

    Ok(())
}

/// The named plan, else the remembered one, else the first
fn resolve_plan<'p>(
    ctx: &mut AppContext,
    plans: &'p [SavingsPlan],
    plan: Option<&str>,
) -> ExpenseResult<&'p SavingsPlan> {
    let found = match plan {
        Some(plan) => find_plan(plans, plan)?,
        None => select(plans, ctx.selected_plan()).ok_or_else(|| {
            ExpenseError::Validation(
                "No savings plans yet. Create one with `expense savings create`.".into(),
            )
        })?,
    };
    ctx.remember_plan(Some(found.id))?;
    Ok(found)
}

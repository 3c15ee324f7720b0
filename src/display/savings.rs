//! Savings plan display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, PlanId, SavingsPlan};
use crate::models::category::category_name;

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Linked category")]
    linked: String,
}

pub fn format_plan_list(
    plans: &[SavingsPlan],
    categories: &[Category],
    selected: Option<PlanId>,
    symbol: &str,
) -> String {
    if plans.is_empty() {
        return "No savings plans yet.\n".to_string();
    }

    let rows = plans.iter().map(|plan| PlanRow {
        marker: if Some(plan.id) == selected { "*" } else { "" },
        id: plan.id.to_string(),
        name: plan.name.clone(),
        target: plan.target_amount.format_with_symbol(symbol),
        linked: plan
            .linked_category_id
            .map(|id| {
                category_name(categories, id)
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string())
            })
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

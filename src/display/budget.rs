//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Budget;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format budgets newest month first
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut sorted: Vec<&Budget> = budgets.iter().collect();
    sorted.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));

    let rows = sorted.into_iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        month: b.label(),
        amount: b.amount.format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, Money};

    #[test]
    fn test_newest_first() {
        let budgets = vec![
            Budget {
                id: BudgetId::new(1),
                month: 12,
                year: 2024,
                amount: Money::from_cents(10_000),
            },
            Budget {
                id: BudgetId::new(2),
                month: 2,
                year: 2025,
                amount: Money::from_cents(20_000),
            },
        ];
        let output = format_budget_list(&budgets, "$");
        let newer = output.find("02/2025").unwrap();
        let older = output.find("12/2024").unwrap();
        assert!(newer < older);
        assert!(output.contains("$200.00"));
    }
}

//! Account display formatting
//!
//! Formats cards (accounts) for terminal output in table and summary views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Card, CardId};
use crate::services::account::CardSummary;

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Last 4")]
    last4: String,
    #[tabled(rename = "Color")]
    color: String,
}

/// Format the card list, marking the selected card
pub fn format_card_list(cards: &[Card], selected: Option<CardId>) -> String {
    if cards.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let rows = cards.iter().map(|card| CardRow {
        marker: if Some(card.id) == selected { "*" } else { "" },
        id: card.id.to_string(),
        name: card.name.clone(),
        last4: card.last4.clone().unwrap_or_default(),
        color: card.color.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format a card's income/expense/balance block
pub fn format_card_summary(card: &Card, summary: &CardSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", card.label()));
    output.push_str(&format!("  Income:   {:>14}\n", summary.income.format_with_symbol(symbol)));
    output.push_str(&format!("  Expenses: {:>14}\n", summary.expense.format_with_symbol(symbol)));
    output.push_str(&format!(
        "  Balance:  {:>14}\n",
        summary.balance().format_with_symbol(symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_selected_marker() {
        let cards = vec![
            Card {
                id: CardId::new(1),
                name: "Visa".into(),
                color: "#000".into(),
                last4: Some("4242".into()),
            },
            Card {
                id: CardId::new(2),
                name: "Wallet".into(),
                color: "#fff".into(),
                last4: None,
            },
        ];
        let output = format_card_list(&cards, Some(CardId::new(2)));
        let wallet_line = output.lines().find(|l| l.contains("Wallet")).unwrap();
        assert!(wallet_line.contains('*'));
        let visa_line = output.lines().find(|l| l.contains("Visa")).unwrap();
        assert!(!visa_line.contains('*'));
    }

    #[test]
    fn test_summary_block() {
        let card = Card {
            id: CardId::new(1),
            name: "Visa".into(),
            color: "#000".into(),
            last4: None,
        };
        let summary = CardSummary {
            income: Money::from_cents(5_000),
            expense: Money::from_cents(7_500),
        };
        let output = format_card_summary(&card, &summary, "$");
        assert!(output.contains("-$25.00"));
    }
}

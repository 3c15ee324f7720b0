//! Transaction display formatting
//!
//! Renders the filtered transaction list as a table and single transactions
//! as a detail view.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::category::category_name;
use crate::models::{Card, Category, Transaction};
use crate::services::filter::TransactionFilter;

use super::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Display name of a transaction's category, falling back to the lookup list
pub fn category_label(txn: &Transaction, categories: &[Category]) -> String {
    txn.category_name
        .clone()
        .or_else(|| {
            txn.category_id
                .and_then(|id| category_name(categories, id))
                .map(str::to_string)
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Display name of a transaction's account, falling back to the lookup list
pub fn account_label(txn: &Transaction, cards: &[Card]) -> String {
    txn.card_name
        .clone()
        .or_else(|| {
            txn.card_id
                .and_then(|id| cards.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Format transactions as a table
pub fn format_transaction_table(
    transactions: &[&Transaction],
    categories: &[Category],
    cards: &[Card],
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|txn| TransactionRow {
            id: txn.id.to_string(),
            date: txn.date.clone(),
            kind: txn.kind.to_string(),
            description: truncate(&txn.description, 30),
            category: category_label(txn, categories),
            method: txn.payment_method.to_string(),
            account: account_label(txn, cards),
            amount: txn.signed_amount().format_with_symbol(symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format the transactions page for one filter window
pub fn format_filtered_transactions(
    filter: &TransactionFilter,
    transactions: &[&Transaction],
    categories: &[Category],
    cards: &[Card],
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return format!("{}\n", filter.empty_message());
    }

    let income: crate::models::Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expense: crate::models::Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    let mut output = format!("Transactions for {}\n\n", filter.window_label());
    output.push_str(&format_transaction_table(transactions, categories, cards, symbol));
    output.push_str(&format!(
        "\n{} transaction(s)   income {}   expenses {}\n",
        transactions.len(),
        income.format_with_symbol(symbol),
        expense.format_with_symbol(symbol),
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &[Category],
    cards: &[Card],
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Category:    {}\n", category_label(txn, categories)));
    output.push_str(&format!("Method:      {}\n", txn.payment_method));
    output.push_str(&format!("Account:     {}\n", account_label(txn, cards)));

    output
}

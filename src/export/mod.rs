//! Export module for Expense Control
//!
//! Two kinds of export:
//! - XLSX: the spreadsheet the API generates for a period, saved as-is
//! - CSV/JSON/YAML: the locally filtered transaction view, written here

pub mod csv;
pub mod json;
pub mod xlsx;
pub mod yaml;

use serde::Serialize;

use crate::models::{Card, Category, Transaction};
use crate::display::transaction::{account_label, category_label};

pub use csv::export_transactions_csv;
pub use json::{export_transactions_json, TransactionExport, EXPORT_SCHEMA_VERSION};
pub use xlsx::{save_xlsx, xlsx_file_name};
pub use yaml::export_transactions_yaml;

/// One exported transaction with names resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub category: String,
    pub payment_method: String,
    pub account: String,
    pub amount: f64,
}

impl ExportRow {
    pub fn new(txn: &Transaction, categories: &[Category], cards: &[Card]) -> Self {
        let blank_dash = |s: String| if s == "-" { String::new() } else { s };
        Self {
            id: txn.id.get(),
            date: txn.date.clone(),
            kind: txn.kind.to_string(),
            description: txn.description.clone(),
            category: blank_dash(category_label(txn, categories)),
            payment_method: txn.payment_method.to_string(),
            account: blank_dash(account_label(txn, cards)),
            amount: txn.amount.as_f64(),
        }
    }
}

/// Resolve names for a set of transactions
pub fn export_rows(transactions: &[&Transaction], categories: &[Category], cards: &[Card]) -> Vec<ExportRow> {
    transactions
        .iter()
        .map(|txn| ExportRow::new(txn, categories, cards))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Transaction;

    pub fn sample_transactions() -> Vec<Transaction> {
        serde_json::from_str(
            r#"[{"id":1,"type":"expense","description":"Lunch, with \"friends\"","amount":12.5,
                 "date":"2025-11-09","paymentMethod":"card","Card":{"id":2,"name":"Visa"},
                 "Category":{"id":3,"name":"Food"}},
                {"id":2,"type":"income","description":"Salary","amount":1000,
                 "date":"2025-11-01"}]"#,
        )
        .unwrap()
    }
}

//! JSON export of the filtered transaction view

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use super::{export_rows, ExportRow};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Card, Category, Money, Transaction};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported transactions plus context about the view they came from
#[derive(Debug, Clone, Serialize)]
pub struct TransactionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The filter window, e.g. "noviembre 2025"
    pub window: String,

    pub total_income: f64,
    pub total_expense: f64,

    pub transactions: Vec<ExportRow>,
}

impl TransactionExport {
    pub fn new(
        window: impl Into<String>,
        transactions: &[&Transaction],
        categories: &[Category],
        cards: &[Card],
    ) -> Self {
        let sum = |income: bool| -> Money {
            transactions
                .iter()
                .filter(|t| t.is_income() == income)
                .map(|t| t.amount)
                .sum()
        };
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            window: window.into(),
            total_income: sum(true).as_f64(),
            total_expense: sum(false).as_f64(),
            transactions: export_rows(transactions, categories, cards),
        }
    }
}

/// Write the export as JSON
pub fn export_transactions_json<W: Write>(
    export: &TransactionExport,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

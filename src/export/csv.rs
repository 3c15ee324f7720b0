//! CSV export of the filtered transaction view

use std::io::Write;

use super::export_rows;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Card, Category, Transaction};

/// Write transactions as CSV with a header row
pub fn export_transactions_csv<W: Write>(
    transactions: &[&Transaction],
    categories: &[Category],
    cards: &[Card],
    writer: W,
) -> ExpenseResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    for row in export_rows(transactions, categories, cards) {
        csv_writer
            .serialize(row)
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

//! YAML export of the filtered transaction view

use std::io::Write;

use super::json::TransactionExport;
use crate::error::{ExpenseError, ExpenseResult};

/// Write the export as YAML with a comment header
pub fn export_transactions_yaml<W: Write>(export: &TransactionExport, writer: &mut W) -> ExpenseResult<()> {
    let header = format!(
        "# Expense Control transactions: {}\n# Generated: {}\n# App Version: {}\n\n",
        export.window, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

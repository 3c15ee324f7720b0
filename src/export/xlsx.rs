//! Server-side spreadsheet export
//!
//! `/stats/export` returns a finished XLSX workbook; it is written to disk
//! unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Period;

/// `transactions_all.xlsx` or `transactions_2025-11.xlsx`
pub fn xlsx_file_name(period: Period) -> String {
    format!("transactions_{}.xlsx", period)
}

/// Download the period's spreadsheet into `dir`, returning the file path
pub fn save_xlsx(client: &ApiClient, period: Period, dir: &Path) -> ExpenseResult<PathBuf> {
    let bytes = client.export(period)?;
    if bytes.is_empty() {
        return Err(ExpenseError::Export("The server returned an empty file".into()));
    }

    let path = dir.join(xlsx_file_name(period));
    fs::write(&path, &bytes)
        .map_err(|e| ExpenseError::Export(format!("{}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "spreadsheet saved");
    Ok(path)
}

//! CLI commands for data export
//!
//! `xlsx` downloads the server-built spreadsheet for a dashboard period;
//! `transactions` writes the filtered transaction list locally.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::context::AppContext;
use crate::error::{ExpenseError, ExpenseResult, ResultExt};
use crate::export::{
    export_transactions_csv, export_transactions_json, export_transactions_yaml, save_xlsx,
    TransactionExport,
};
use crate::feedback::Feedback;
use crate::models::Period;
use crate::routes::Route;
use crate::services::TransactionService;

use super::print_feedback;
use super::require_session;
use super::transaction::FilterArgs;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    /// JSON with totals and export metadata
    Json,
    /// YAML, human-readable
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Download the spreadsheet for a period
    Xlsx {
        /// `all` or YYYY-MM; defaults to the dashboard selection
        #[arg(short, long)]
        period: Option<Period>,
        /// Directory to save into; defaults to the current directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Export filtered transactions to a file
    Transactions {
        /// Output file path
        output: PathBuf,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle export commands
pub fn handle_export_command(ctx: &AppContext, cmd: ExportCommands) -> ExpenseResult<()> {
    match cmd {
        ExportCommands::Xlsx { period, dir } => {
            let client = require_session(ctx, Route::Dashboard)?;
            let period = period.unwrap_or_else(|| ctx.dashboard_selection().0);
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let path = save_xlsx(&client, period, &dir).context("Failed to export")?;
            print_feedback(&Feedback::success(format!(
                "Spreadsheet saved to {}",
                path.display()
            )));
        }

        ExportCommands::Transactions {
            output,
            format,
            pretty,
            filter,
        } => {
            let client = require_session(ctx, Route::Transactions)?;
            let data = TransactionService::new(&client)
                .load()
                .context("Failed to load data")?;
            let filter = filter.to_filter(&data)?;
            let rows = filter.apply(&data.transactions);

            let file = File::create(&output).map_err(|e| {
                ExpenseError::Export(format!("Failed to create file {}: {}", output.display(), e))
            })?;
            let mut writer = BufWriter::new(file);

            match format {
                ExportFormat::Csv => {
                    export_transactions_csv(&rows, &data.categories, &data.cards, &mut writer)?
                }
                ExportFormat::Json => {
                    let export = TransactionExport::new(
                        filter.window_label(),
                        &rows,
                        &data.categories,
                        &data.cards,
                    );
                    export_transactions_json(&export, &mut writer, pretty)?
                }
                ExportFormat::Yaml => {
                    let export = TransactionExport::new(
                        filter.window_label(),
                        &rows,
                        &data.categories,
                        &data.cards,
                    );
                    export_transactions_yaml(&export, &mut writer)?
                }
            }

            print_feedback(&Feedback::success(format!(
                "Exported {} transactions to: {}",
                rows.len(),
                output.display()
            )));
        }
    }

    Ok(())
}

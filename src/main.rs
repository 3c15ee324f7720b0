use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_control::cli::{
    self, handle_account_command, handle_auth_command, handle_budget_command,
    handle_dashboard_command, handle_export_command, handle_profile_command,
    handle_savings_command, handle_settings_command, handle_transaction_command,
};
use expense_control::config::ExpensePaths;
use expense_control::context::AppContext;
use expense_control::error::ExpenseError;
use expense_control::feedback::Feedback;
use expense_control::routes::Route;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EXPENSE_LOG";

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal client for the Expense Control personal-finance API",
    long_about = "Record income and expenses, set monthly budgets, track savings \
                  plans and browse dashboards against an Expense Control server, \
                  from the command line or an interactive TUI."
)]
struct Cli {
    /// API base URL for this run (overrides the saved setting)
    #[arg(long, global = true, env = "EXPENSE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(cli::AuthCommands),

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui {
        /// Page to open first, e.g. /transactions or /plans/savings
        #[arg(long, default_value = "/")]
        route: String,
    },

    /// Show the dashboard for a month or all time
    Dashboard(cli::DashboardArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(cli::TransactionCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(cli::BudgetCommands),

    /// Account (card) commands
    #[command(subcommand)]
    Account(cli::AccountCommands),

    /// Savings plan commands
    #[command(subcommand)]
    Savings(cli::SavingsCommands),

    /// Profile commands
    #[command(subcommand)]
    Profile(cli::ProfileCommands),

    /// Local settings
    #[command(subcommand)]
    Settings(cli::SettingsCommands),

    /// Export commands
    #[command(subcommand)]
    Export(cli::ExportCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ExpenseError>() {
                Some(expense_err) => cli::print_feedback(&Feedback::from_error(
                    expense_err,
                    &expense_err.to_string(),
                )),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = ExpensePaths::new()?;
    paths.ensure_directories()?;

    let tui_mode = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(&paths, tui_mode)?;

    let mut ctx = AppContext::load(paths)?.with_api_url(cli.api_url);
    tracing::debug!(api_url = ctx.api_url(), "context loaded");

    match cli.command {
        None => expense_control::tui::run_tui(&mut ctx, Route::Dashboard)?,
        Some(Commands::Tui { route }) => {
            expense_control::tui::run_tui(&mut ctx, Route::resolve(&route))?
        }
        Some(Commands::Auth(cmd)) => handle_auth_command(&mut ctx, cmd)?,
        Some(Commands::Dashboard(args)) => handle_dashboard_command(&mut ctx, args)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&mut ctx, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&ctx, cmd)?,
        Some(Commands::Account(cmd)) => handle_account_command(&mut ctx, cmd)?,
        Some(Commands::Savings(cmd)) => handle_savings_command(&mut ctx, cmd)?,
        Some(Commands::Profile(cmd)) => handle_profile_command(&mut ctx, cmd)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&mut ctx, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&ctx, cmd)?,
    }

    Ok(())
}

/// Log to stderr, or to the log file while the TUI owns the terminal
fn init_logging(paths: &ExpensePaths, tui_mode: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if tui_mode {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
            .with_context(|| format!("Failed to open {}", paths.log_file().display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

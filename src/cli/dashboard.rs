//! Dashboard CLI command

use clap::Args;

use crate::context::AppContext;
use crate::error::{ExpenseResult, ResultExt};
use crate::models::Period;
use crate::routes::Route;
use crate::services::DashboardService;

use super::{parse_month, require_session, MonthArg};

/// Month selector for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthChoice {
    All,
    Month(MonthArg),
}

fn parse_month_choice(value: &str) -> Result<MonthChoice, String> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(MonthChoice::All);
    }
    parse_month(value).map(MonthChoice::Month)
}

/// Dashboard options; both default to the last selection
#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// `all` or a month (1-12, YYYY-MM or a month name)
    #[arg(short, long, value_parser = parse_month_choice)]
    pub month: Option<MonthChoice>,
    /// Year for the month and the annual chart
    #[arg(short, long)]
    pub year: Option<i32>,
}

impl DashboardArgs {
    /// Combine the arguments with the remembered selection
    pub fn selection(&self, remembered: (Period, i32)) -> ExpenseResult<(Period, i32)> {
        let (remembered_period, remembered_year) = remembered;
        let year = match self.month {
            Some(MonthChoice::Month(month)) => month.year_or(self.year),
            _ => self.year,
        }
        .unwrap_or(remembered_year);
        let period = match self.month {
            Some(MonthChoice::All) => Period::All,
            Some(MonthChoice::Month(month)) => Period::month(year, month.month)?,
            None => match remembered_period {
                Period::All => Period::All,
                Period::Month { month, .. } => Period::month(year, month)?,
            },
        };
        Ok((period, year))
    }
}

/// Print the dashboard for the selection and remember it
pub fn handle_dashboard_command(ctx: &mut AppContext, args: DashboardArgs) -> ExpenseResult<()> {
    let client = require_session(ctx, Route::Dashboard)?;
    let (period, year) = args.selection(ctx.dashboard_selection())?;

    let report = DashboardService::new(&client)
        .load(period, year)
        .context("Failed to load dashboard")?;
    ctx.remember_dashboard(period, year)?;

    print!("{}", report.format_terminal());
    Ok(())
}

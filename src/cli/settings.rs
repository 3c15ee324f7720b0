//! Settings CLI commands
//!
//! Local preferences only; nothing here talks to the API.

use clap::Subcommand;

use crate::config::Theme;
use crate::context::AppContext;
use crate::error::ExpenseResult;
use crate::feedback::Feedback;
use crate::services::pagination::PageSize;

use super::print_feedback;

/// Theme argument: a theme or `toggle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Set(Theme),
    Toggle,
}

fn parse_theme_choice(value: &str) -> Result<ThemeChoice, String> {
    if value.trim().eq_ignore_ascii_case("toggle") {
        return Ok(ThemeChoice::Toggle);
    }
    value.parse().map(ThemeChoice::Set)
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings and file locations
    Show,
    /// Set the theme: light, dark or toggle
    Theme {
        #[arg(value_parser = parse_theme_choice)]
        theme: ThemeChoice,
    },
    /// Set the API base URL
    ApiUrl { url: String },
    /// Set the default page size for tables (5, 10 or 20)
    PageSize { size: PageSize },
}

/// Handle a settings command
pub fn handle_settings_command(ctx: &mut AppContext, cmd: SettingsCommands) -> ExpenseResult<()> {
    match cmd {
        SettingsCommands::Show => {
            let paths = ctx.paths();
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("API URL:        {}", ctx.api_url());
            println!("Theme:          {}", ctx.theme());
            println!("Currency:       {}", ctx.settings().currency_symbol);
            println!("Page size:      {}", ctx.page_size());
            match ctx.session().display_name() {
                Some(name) => println!("Signed in as:   {}", name),
                None if ctx.is_authenticated() => println!("Signed in"),
                None => println!("Not signed in"),
            }
        }

        SettingsCommands::Theme { theme } => {
            let theme = match theme {
                ThemeChoice::Toggle => ctx.toggle_theme()?,
                ThemeChoice::Set(theme) => {
                    ctx.set_theme(theme)?;
                    theme
                }
            };
            print_feedback(&Feedback::success(format!("Theme set to {}", theme)));
        }

        SettingsCommands::ApiUrl { url } => {
            ctx.set_api_url(&url)?;
            print_feedback(&Feedback::success(format!("API URL set to {}", url.trim())));
        }

        SettingsCommands::PageSize { size } => {
            ctx.set_page_size(size.get())?;
            print_feedback(&Feedback::success(format!("Page size set to {}", size)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_choice() {
        assert_eq!(parse_theme_choice("toggle"), Ok(ThemeChoice::Toggle));
        assert_eq!(parse_theme_choice("Dark"), Ok(ThemeChoice::Set(Theme::Dark)));
        assert!(parse_theme_choice("blue").is_err());
    }
}

//! Profile CLI commands

use clap::Subcommand;

use crate::context::AppContext;
use crate::display::format_profile;
use crate::error::{ExpenseResult, ResultExt};
use crate::feedback::Feedback;
use crate::routes::Route;
use crate::services::profile::PasswordChange;
use crate::services::ProfileService;

use super::{print_feedback, prompt_secret, require_session};

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the signed-in user
    Show,
    /// Change name or email (asks for the current password)
    Update {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Change the password (prompts for current, new and confirmation)
    ChangePassword,
}

/// Handle a profile command
pub fn handle_profile_command(ctx: &mut AppContext, cmd: ProfileCommands) -> ExpenseResult<()> {
    let client = require_session(ctx, Route::Profile)?;
    let service = ProfileService::new(&client);

    match cmd {
        ProfileCommands::Show => {
            let profile = service.me().context("Failed to load profile")?;
            print!("{}", format_profile(&profile));
        }

        ProfileCommands::Update { name, email } => {
            if name.is_none() && email.is_none() {
                print_feedback(&Feedback::info("Nothing to update").with_hint("Pass --name or --email"));
                return Ok(());
            }
            let current = service.me().context("Failed to load profile")?;
            let name = name.unwrap_or(current.name);
            let email = email.unwrap_or(current.email);

            let password = prompt_secret("Current password: ")?;
            let profile = service
                .update(ctx, &name, &email, &password)
                .context("Failed to update profile")?;
            print_feedback(&Feedback::success(format!("Profile updated: {}", profile.name)));
        }

        ProfileCommands::ChangePassword => {
            let current = prompt_secret("Current password: ")?;
            let new = prompt_secret("New password: ")?;
            let confirm = prompt_secret("Confirm new password: ")?;
            service
                .change_password(&PasswordChange {
                    current: &current,
                    new: &new,
                    confirm: &confirm,
                })
                .context("Failed to change password")?;
            print_feedback(&Feedback::success("Password changed"));
        }
    }

    Ok(())
}

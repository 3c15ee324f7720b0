//! Authentication CLI commands
//!
//! Login, registration, password reset and logout. Passwords are prompted
//! without echo unless passed through `--password` / `EXPENSE_PASSWORD`.

use clap::Subcommand;

use crate::context::AppContext;
use crate::error::{ExpenseResult, ResultExt};
use crate::feedback::Feedback;
use crate::services::auth::{logout, AuthService, Registration};

use super::{print_feedback, prompt_secret, secret_or_prompt};

/// Authentication subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and store the session token
    Login {
        /// Account email
        email: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "EXPENSE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create a new account
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Password (prompted twice when omitted)
        #[arg(long, env = "EXPENSE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Reset a forgotten password
    ResetPassword {
        /// Account email
        email: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
}

/// Handle an authentication command
pub fn handle_auth_command(ctx: &mut AppContext, cmd: AuthCommands) -> ExpenseResult<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = secret_or_prompt(password, "Password: ")?;
            let client = ctx.client()?;
            let route = AuthService::new(&client)
                .login(ctx, &email, &password)
                .context("Login failed")?;

            let who = ctx
                .session()
                .display_name()
                .map(str::to_string)
                .unwrap_or(email);
            print_feedback(&Feedback::success(format!("Logged in as {}", who)));
            tracing::debug!(route = %route, "login complete");
        }

        AuthCommands::Register {
            name,
            email,
            password,
        } => {
            let (password, confirm) = match password {
                Some(password) => {
                    let confirm = password.clone();
                    (zeroize::Zeroizing::new(password), zeroize::Zeroizing::new(confirm))
                }
                None => (
                    prompt_secret("Password: ")?,
                    prompt_secret("Confirm password: ")?,
                ),
            };

            let client = ctx.client()?;
            AuthService::new(&client)
                .register(&Registration {
                    name: &name,
                    email: &email,
                    password: &password,
                    confirm: &confirm,
                })
                .context("Registration failed")?;
            print_feedback(
                &Feedback::success("Account created")
                    .with_hint(format!("Run `expense login {}` to sign in.", email.trim())),
            );
        }

        AuthCommands::ResetPassword { email } => {
            let client = ctx.client()?;
            let service = AuthService::new(&client);
            service
                .reset_start(&email)
                .context("Could not start the password reset")?;

            let password = prompt_secret("New password: ")?;
            let confirm = prompt_secret("Confirm new password: ")?;
            service
                .reset_password(&email, &password, &confirm)
                .context("Could not reset the password")?;
            print_feedback(
                &Feedback::success("Password updated").with_hint("You can log in now."),
            );
        }

        AuthCommands::Logout => {
            logout(ctx)?;
            print_feedback(&Feedback::success("Logged out"));
        }

        AuthCommands::Whoami => match ctx.session().user.as_ref() {
            Some(user) if ctx.is_authenticated() => {
                println!("{} <{}>", user.name, user.email);
            }
            _ if ctx.is_authenticated() => println!("Logged in"),
            _ => print_feedback(
                &Feedback::info("Not logged in").with_hint("Run `expense login <email>`."),
            ),
        },
    }

    Ok(())
}

//! Profile service: view and edit the signed-in user

use crate::api::ApiClient;
use crate::context::AppContext;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{SessionUser, UserProfile};

use super::validation::{is_strong_password, require, require_email};

/// Password change form
#[derive(Debug, Clone)]
pub struct PasswordChange<'a> {
    pub current: &'a str,
    pub new: &'a str,
    pub confirm: &'a str,
}

/// Service for the profile page
pub struct ProfileService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfileService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn me(&self) -> ExpenseResult<UserProfile> {
        self.client.me()
    }

    /// Update name and email, then refresh the cached display info
    pub fn update(
        &self,
        ctx: &mut AppContext,
        name: &str,
        email: &str,
        current_password: &str,
    ) -> ExpenseResult<UserProfile> {
        require(name, "Name is required")?;
        require_email(email)?;
        require(current_password, "Current password is required to update the profile")?;

        let profile = self
            .client
            .update_profile(name.trim(), email.trim(), current_password)?;
        ctx.update_user(SessionUser::from(&profile))?;
        tracing::info!("profile updated");
        Ok(profile)
    }

    pub fn change_password(&self, form: &PasswordChange<'_>) -> ExpenseResult<()> {
        require(form.current, "Current password is required")?;
        require(form.new, "New password is required")?;
        if !is_strong_password(form.new) {
            return Err(ExpenseError::Validation(
                "Password needs 8+ characters with upper case, lower case and a number".into(),
            ));
        }
        if form.new != form.confirm {
            return Err(ExpenseError::Validation(
                "Password confirmation does not match".into(),
            ));
        }
        self.client.change_password(form.current, form.new)?;
        tracing::info!("password changed");
        Ok(())
    }
}

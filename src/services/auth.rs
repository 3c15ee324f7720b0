//! Login, registration, password reset and logout

use crate::api::ApiClient;
use crate::context::AppContext;
use crate::error::{ExpenseError, ExpenseResult};
use crate::routes::Route;

use super::validation::{require, require_email, require_new_password};

/// Registration form
#[derive(Debug, Clone)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm: &'a str,
}

/// Service for authentication flows
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and persist the session.
    ///
    /// Returns the route to continue to. On failure nothing is stored.
    pub fn login(&self, ctx: &mut AppContext, email: &str, password: &str) -> ExpenseResult<Route> {
        require(email, "Email is required")?;
        require(password, "Password is required")?;

        let response = self
            .client
            .login(email.trim(), password)
            .map_err(credentials_rejected)?;

        // Cache display info; the token is what matters if this fails
        let user = match response.user {
            Some(user) => Some(user),
            None => {
                let mut authed = self.client.clone();
                authed.set_token(Some(response.token.clone()));
                match authed.me() {
                    Ok(profile) => Some((&profile).into()),
                    Err(err) => {
                        tracing::debug!(error = %err, "could not fetch profile after login");
                        None
                    }
                }
            }
        };

        ctx.store_login(response.token, user)?;
        Ok(Route::after_login())
    }

    /// Create an account; the user logs in afterwards
    pub fn register(&self, form: &Registration<'_>) -> ExpenseResult<()> {
        require(form.name, "Name is required")?;
        require_email(form.email)?;
        require_new_password(form.password, form.confirm)?;

        self.client
            .register(form.name.trim(), form.email.trim(), form.password)
    }

    /// First reset step; errors when no account exists for `email`
    pub fn reset_start(&self, email: &str) -> ExpenseResult<()> {
        require(email, "Email is required")?;
        if self.client.reset_start(email.trim())? {
            Ok(())
        } else {
            Err(ExpenseError::Validation(
                "No account found with that email. Check your details.".into(),
            ))
        }
    }

    /// Second reset step
    pub fn reset_password(&self, email: &str, password: &str, confirm: &str) -> ExpenseResult<()> {
        require_new_password(password, confirm)?;
        self.client.reset_password(email.trim(), password)
    }
}

/// Forget the session locally; the API keeps no server-side session
pub fn logout(ctx: &mut AppContext) -> ExpenseResult<Route> {
    ctx.clear_session()?;
    Ok(Route::Login)
}

/// A 401 from the login endpoint means bad credentials, not an expired
/// session, so it is reported as a plain API error
fn credentials_rejected(err: ExpenseError) -> ExpenseError {
    match err {
        ExpenseError::Unauthorized { message } => ExpenseError::Api {
            status: 401,
            message,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use tempfile::TempDir;

    fn unreachable_client() -> ApiClient {
        // Port 9 (discard) is never served in test environments
        ApiClient::new("http://127.0.0.1:9", None).unwrap()
    }

    #[test]
    fn test_rejected_login_is_not_a_session_problem() {
        let err = credentials_rejected(ExpenseError::Unauthorized {
            message: Some("Invalid credentials".into()),
        });
        assert!(!err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");

        let feedback = crate::feedback::Feedback::from_error(&err, "Login failed");
        assert!(feedback.hint.is_none());

        let err = credentials_rejected(ExpenseError::Unauthorized { message: None });
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_login_requires_fields() {
        let dir = TempDir::new().unwrap();
        let mut ctx =
            AppContext::load(ExpensePaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        let client = unreachable_client();
        let err = AuthService::new(&client)
            .login(&mut ctx, "", "secret")
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_register_validates_before_calling_api() {
        let client = unreachable_client();
        let service = AuthService::new(&client);
        let err = service
            .register(&Registration {
                name: "Ana",
                email: "not-an-email",
                password: "longenough",
                confirm: "longenough",
            })
            .unwrap_err();
        assert_eq!(err.user_message(""), "Invalid email format");
    }

    #[test]
    fn test_reset_checks_confirmation() {
        let client = unreachable_client();
        let err = AuthService::new(&client)
            .reset_password("ana@example.com", "longenough", "nope")
            .unwrap_err();
        assert_eq!(err.user_message(""), "Passwords do not match");
    }

    #[test]
    fn test_logout_routes_to_login() {
        let dir = TempDir::new().unwrap();
        let mut ctx =
            AppContext::load(ExpensePaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        ctx.store_login("tok".into(), None).unwrap();
        assert_eq!(logout(&mut ctx).unwrap(), Route::Login);
        assert!(!ctx.is_authenticated());
    }
}

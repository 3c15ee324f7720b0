//! Page routes and the login guard
//!
//! Protected routes require a session token; without one they resolve to
//! [`Route::Login`]. Legacy paths redirect to their current page and unknown
//! paths land on the dashboard.

use std::fmt;
use std::str::FromStr;

/// A page of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ResetPassword,
    Dashboard,
    Transactions,
    SavingPlan,
    Accounts,
    Profile,
    Settings,
}

impl Route {
    /// Every route, public ones first
    pub const ALL: [Route; 9] = [
        Route::Login,
        Route::Register,
        Route::ResetPassword,
        Route::Dashboard,
        Route::Transactions,
        Route::SavingPlan,
        Route::Accounts,
        Route::Profile,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::ResetPassword => "/reset-password",
            Self::Dashboard => "/",
            Self::Transactions => "/transactions",
            Self::SavingPlan => "/plans/savings",
            Self::Accounts => "/plans/accounts",
            Self::Profile => "/profile",
            Self::Settings => "/settings",
        }
    }

    /// Reachable without logging in
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register | Self::ResetPassword)
    }

    /// Map a path to a route, applying redirects
    pub fn resolve(path: &str) -> Self {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "/saving-plan" | "/plans" => Self::SavingPlan,
            other => Self::ALL
                .iter()
                .copied()
                .find(|r| r.path() == other)
                .unwrap_or(Self::Dashboard),
        }
    }

    /// Apply the login guard
    pub fn guard(self, authenticated: bool) -> Self {
        if self.is_public() || authenticated {
            self
        } else {
            Self::Login
        }
    }

    /// Where a successful login lands
    pub fn after_login() -> Self {
        Self::Dashboard
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::resolve(s))
    }
}

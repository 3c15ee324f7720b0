//! Application context
//!
//! [`AppContext`] owns the persisted client state: settings, the login
//! session, and where both live on disk. CLI handlers and the TUI receive it
//! explicitly; nothing else reads or writes those files.

use crate::api::ApiClient;
use crate::config::settings::DashboardPeriod;
use crate::config::{ExpensePaths, Session, Settings, Theme};
use crate::error::ExpenseResult;
use crate::models::{CardId, Period, PlanId, SessionUser};
use crate::reports::dashboard::current_year;

/// Persisted client state plus per-run overrides
#[derive(Debug, Clone)]
pub struct AppContext {
    paths: ExpensePaths,
    settings: Settings,
    session: Session,
    /// `--api-url` / `EXPENSE_API_URL`, not persisted
    api_url_override: Option<String>,
}

impl AppContext {
    /// Load settings and session from `paths`
    pub fn load(paths: ExpensePaths) -> ExpenseResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let session = Session::load(&paths)?;
        Ok(Self {
            paths,
            settings,
            session,
            api_url_override: None,
        })
    }

    /// Override the API base URL for this run only
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        self.api_url_override = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Effective API base URL
    pub fn api_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .unwrap_or(&self.settings.api_url)
    }

    /// An API client carrying the current token
    pub fn client(&self) -> ExpenseResult<ApiClient> {
        ApiClient::new(self.api_url(), self.session.token.clone())
    }

    /// Persist a fresh login
    pub fn store_login(&mut self, token: String, user: Option<SessionUser>) -> ExpenseResult<()> {
        self.session.clear();
        self.session.token = Some(token);
        self.session.user = user;
        self.session.save(&self.paths)?;
        tracing::info!("session stored");
        Ok(())
    }

    /// Refresh the cached display info (after a profile update)
    pub fn update_user(&mut self, user: SessionUser) -> ExpenseResult<()> {
        self.session.user = Some(user);
        self.session.save(&self.paths)
    }

    /// Forget the token and user info
    pub fn clear_session(&mut self) -> ExpenseResult<()> {
        self.session.clear();
        self.session.save(&self.paths)?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> ExpenseResult<()> {
        self.settings.theme = theme;
        self.settings.save(&self.paths)
    }

    /// Flip light/dark and persist; returns the new theme
    pub fn toggle_theme(&mut self) -> ExpenseResult<Theme> {
        let theme = self.settings.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Persist the API base URL
    pub fn set_api_url(&mut self, url: &str) -> ExpenseResult<()> {
        // Validate by building a client before saving
        ApiClient::new(url, None)?;
        self.settings.api_url = url.trim().to_string();
        self.settings.save(&self.paths)
    }

    /// Remembered dashboard period and year
    pub fn dashboard_selection(&self) -> (Period, i32) {
        let year = self.settings.dashboard_year.unwrap_or_else(current_year);
        let period = match self.settings.dashboard_period {
            DashboardPeriod::All => Period::All,
            DashboardPeriod::Month(month) => {
                Period::month(year, month).unwrap_or(Period::All)
            }
        };
        (period, year)
    }

    pub fn remember_dashboard(&mut self, period: Period, year: i32) -> ExpenseResult<()> {
        self.settings.dashboard_period = match period {
            Period::All => DashboardPeriod::All,
            Period::Month { month, .. } => DashboardPeriod::Month(month),
        };
        self.settings.dashboard_year = Some(year);
        self.settings.save(&self.paths)
    }

    pub fn selected_account(&self) -> Option<CardId> {
        self.settings.selected_account
    }

    pub fn remember_account(&mut self, id: Option<CardId>) -> ExpenseResult<()> {
        if self.settings.selected_account == id {
            return Ok(());
        }
        self.settings.selected_account = id;
        self.settings.save(&self.paths)
    }

    pub fn selected_plan(&self) -> Option<PlanId> {
        self.settings.selected_plan
    }

    pub fn remember_plan(&mut self, id: Option<PlanId>) -> ExpenseResult<()> {
        if self.settings.selected_plan == id {
            return Ok(());
        }
        self.settings.selected_plan = id;
        self.settings.save(&self.paths)
    }

    pub fn page_size(&self) -> usize {
        self.settings.page_size
    }

    pub fn set_page_size(&mut self, size: usize) -> ExpenseResult<()> {
        self.settings.page_size = size;
        self.settings.save(&self.paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        AppContext::load(ExpensePaths::with_base_dir(dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_login_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        assert!(!ctx.is_authenticated());

        ctx.store_login(
            "tok".into(),
            Some(SessionUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
            }),
        )
        .unwrap();

        let reloaded = context(&dir);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.session().display_name(), Some("Ana"));

        let mut reloaded = reloaded;
        reloaded.clear_session().unwrap();
        assert!(!context(&dir).is_authenticated());
    }

    #[test]
    fn test_api_url_override() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir).with_api_url(Some("http://127.0.0.1:9".into()));
        assert_eq!(ctx.api_url(), "http://127.0.0.1:9");
        assert_eq!(context(&dir).api_url(), "http://localhost:4000");
    }

    #[test]
    fn test_theme_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        assert_eq!(ctx.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(context(&dir).theme(), Theme::Dark);
    }

    #[test]
    fn test_dashboard_selection_persists() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        ctx.remember_dashboard(Period::month(2024, 11).unwrap(), 2024)
            .unwrap();

        let (period, year) = context(&dir).dashboard_selection();
        assert_eq!(period, Period::month(2024, 11).unwrap());
        assert_eq!(year, 2024);
    }

    #[test]
    fn test_remembered_selections() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        ctx.remember_account(Some(CardId::new(3))).unwrap();
        ctx.remember_plan(Some(PlanId::new(8))).unwrap();

        let reloaded = context(&dir);
        assert_eq!(reloaded.selected_account(), Some(CardId::new(3)));
        assert_eq!(reloaded.selected_plan(), Some(PlanId::new(8)));
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        assert!(ctx.set_api_url("ftp://nope").is_err());
        assert_eq!(ctx.api_url(), "http://localhost:4000");
    }
}

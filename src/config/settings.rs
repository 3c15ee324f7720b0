//! User settings for Expense Control
//!
//! Manages user preferences: the API base URL, theme, and the filters each
//! page remembers between runs (dashboard period, selected account, selected
//! savings plan).

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use super::theme::Theme;
use crate::error::ExpenseError;
use crate::models::{CardId, PlanId};

/// Default API base URL when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Which period the dashboard was last showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", tag = "kind", content = "month")]
pub enum DashboardPeriod {
    /// The all-time view
    #[default]
    All,
    /// A single month (1-12) of the remembered year
    Month(u32),
}

/// User settings for Expense Control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the REST API (without the `/api` suffix)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Light or dark theme
    #[serde(default)]
    pub theme: Theme,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Last dashboard period
    #[serde(default)]
    pub dashboard_period: DashboardPeriod,

    /// Last dashboard year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_year: Option<i32>,

    /// Last selected account on the accounts page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_account: Option<CardId>,

    /// Last selected savings plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_plan: Option<PlanId>,

    /// Default page size for paginated tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_page_size() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: default_api_url(),
            theme: Theme::default(),
            currency_symbol: default_currency(),
            dashboard_period: DashboardPeriod::default(),
            dashboard_year: None,
            selected_account: None,
            selected_plan: None,
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            ExpenseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://localhost:4000");
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.dashboard_period, DashboardPeriod::All);
        assert_eq!(settings.page_size, 10);
        assert!(settings.selected_account.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.theme = Theme::Dark;
        settings.dashboard_period = DashboardPeriod::Month(11);
        settings.dashboard_year = Some(2025);
        settings.selected_plan = Some(PlanId::new(7));

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.dashboard_period, DashboardPeriod::Month(11));
        assert_eq!(loaded.dashboard_year, Some(2025));
        assert_eq!(loaded.selected_plan, Some(PlanId::new(7)));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.api_url, DEFAULT_API_URL);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}

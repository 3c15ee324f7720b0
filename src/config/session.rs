//! Login session persistence
//!
//! The session file holds the bearer token plus the display info the API
//! returned at login, so the status bar can greet the user without a request.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::SessionUser;

/// The persisted login session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Name shown in greetings, if known
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }

    /// Forget the token and user info
    pub fn clear(&mut self) {
        if let Some(token) = self.token.as_mut() {
            token.zeroize();
        }
        self.token = None;
        self.user = None;
    }

    /// Load the session, or an empty one if no file exists
    pub fn load(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let path = paths.session_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read session file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse session file: {}", e)))
    }

    /// Save the session; an unauthenticated session removes the file
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        let path = paths.session_file();

        if !self.is_authenticated() {
            if path.exists() {
                std::fs::remove_file(&path).map_err(|e| {
                    ExpenseError::Io(format!("Failed to remove session file: {}", e))
                })?;
            }
            return Ok(());
        }

        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        write_private(&path, contents.as_bytes())
            .map_err(|e| ExpenseError::Io(format!("Failed to write session file: {}", e)))
    }
}

/// Write `contents` so that only the owner can read it (Unix)
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // `mode` only applies on creation; tighten files left by older versions
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)
}

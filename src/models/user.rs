//! User profile and auth payloads

use serde::{Deserialize, Serialize};

/// Display info cached with the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Profile returned by `/user/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub created_at: Option<String>,
    pub last_login_at: Option<String>,
}

impl From<&UserProfile> for SessionUser {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// Response of `/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Response of `/auth/reset-start`
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(default)]
pub struct ResetStartResponse {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_without_user() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert_eq!(resp.token, "t");
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_profile_fields() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@example.com","createdAt":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(profile.created_at.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert!(profile.last_login_at.is_none());
        assert_eq!(SessionUser::from(&profile).name, "Ana");
    }
}

//! Shared form validation rules

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExpenseError, ExpenseResult};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Minimum password length everywhere
pub const MIN_PASSWORD_LEN: usize = 8;

/// Loose `something@host.tld` check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// 8+ characters with a lower-case letter, an upper-case letter and a digit
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn require(value: &str, message: &str) -> ExpenseResult<()> {
    if value.trim().is_empty() {
        Err(ExpenseError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

pub(crate) fn require_email(email: &str) -> ExpenseResult<()> {
    require(email, "Email is required")?;
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ExpenseError::Validation("Invalid email format".into()))
    }
}

/// A new password of minimum length that matches its confirmation
pub(crate) fn require_new_password(password: &str, confirm: &str) -> ExpenseResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ExpenseError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password != confirm {
        return Err(ExpenseError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_strong_password() {
        assert!(is_strong_password("Abcdefg1"));
        assert!(!is_strong_password("abcdefg1"));
        assert!(!is_strong_password("ABCDEFG1"));
        assert!(!is_strong_password("Abcdefgh"));
        assert!(!is_strong_password("Abc1"));
    }

    #[test]
    fn test_new_password_rules() {
        assert!(require_new_password("longenough", "longenough").is_ok());
        let err = require_new_password("short", "short").unwrap_err();
        assert_eq!(err.user_message(""), "Password must be at least 8 characters");
        let err = require_new_password("longenough", "different").unwrap_err();
        assert_eq!(err.user_message(""), "Passwords do not match");
    }
}

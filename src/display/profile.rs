//! Profile display formatting

use chrono::{DateTime, Local};

use crate::models::UserProfile;

/// Render an API timestamp in local time, or pass it through unchanged
fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_profile(profile: &UserProfile) -> String {
    let mut output = String::new();
    output.push_str(&format!("Name:        {}\n", profile.name));
    output.push_str(&format!("Email:       {}\n", profile.email));
    output.push_str(&format!("Member since {}\n", format_timestamp(profile.created_at.as_deref())));
    output.push_str(&format!("Last login   {}\n", format_timestamp(profile.last_login_at.as_deref())));
    output
}

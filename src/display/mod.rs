//! Display formatting for terminal output
//!
//! Provides utilities for formatting API data for terminal display: tables
//! for lists and aligned key/value blocks for single records.

pub mod account;
pub mod budget;
pub mod profile;
pub mod savings;
pub mod transaction;

pub use account::{format_card_list, format_card_summary};
pub use budget::format_budget_list;
pub use profile::format_profile;
pub use savings::format_plan_list;
pub use transaction::{
    format_filtered_transactions, format_transaction_details, format_transaction_table,
};

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 8), "a longe…");
        assert_eq!(truncate("añoñoño", 4), "año…");
    }
}

//! Card (account) model
//!
//! A card is a named payment source that transactions are attributed to.

use serde::{Deserialize, Serialize};

use super::ids::CardId;

/// Colour used when a card has none
pub const DEFAULT_CARD_COLOR: &str = "#0ea5e9";

/// A payment card / account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    pub name: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub last4: Option<String>,
}

fn default_color() -> String {
    DEFAULT_CARD_COLOR.to_string()
}

impl Card {
    /// "Visa •••• 1234", or just the name without digits
    pub fn label(&self) -> String {
        match self.last4.as_deref().filter(|l| !l.is_empty()) {
            Some(last4) => format!("{} •••• {}", self.name, last4),
            None => self.name.clone(),
        }
    }
}

/// Body for creating or updating a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardInput {
    pub name: String,
    pub color: String,
    pub last4: String,
}

/// Keep only digits, at most four of them
pub fn sanitize_last4(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(4).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_last4() {
        assert_eq!(sanitize_last4("12a34-56"), "1234");
        assert_eq!(sanitize_last4("**99"), "99");
        assert_eq!(sanitize_last4(""), "");
    }

    #[test]
    fn test_default_color() {
        let card: Card = serde_json::from_str(r#"{"id":1,"name":"Visa"}"#).unwrap();
        assert_eq!(card.color, DEFAULT_CARD_COLOR);
        assert_eq!(card.label(), "Visa");
    }

    #[test]
    fn test_label_with_digits() {
        let card: Card =
            serde_json::from_str(r##"{"id":1,"name":"Visa","color":"#000","last4":"4242"}"##)
                .unwrap();
        assert_eq!(card.label(), "Visa •••• 4242");
    }
}

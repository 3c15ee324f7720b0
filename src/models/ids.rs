//! Strongly-typed ID wrappers for all entity types
//!
//! The API hands out integer primary keys. Wrapping them keeps a card id from
//! being passed where a category id is expected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Accepts `7` or `"7"` on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

pub(crate) fn deserialize_wire_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match WireId::deserialize(deserializer)? {
        WireId::Number(n) => Ok(n),
        WireId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw API id
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw id used in API paths
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_wire_id(deserializer).map(Self)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accept the prefixed form shown in tables, too
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(CardId, "card-");
define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(PlanId, "plan-");
define_id!(ContributionId, "con-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CardId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("7".parse::<CardId>().unwrap(), CardId::new(7));
        assert_eq!("card-7".parse::<CardId>().unwrap(), CardId::new(7));
        assert!("abc".parse::<CardId>().is_err());
    }

    #[test]
    fn test_id_accepts_number_or_string() {
        let a: PlanId = serde_json::from_str("3").unwrap();
        let b: PlanId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "3");
    }

    #[test]
    fn test_different_id_types_not_mixable() {
        // CardId and CategoryId are distinct types; only raw values compare
        let card = CardId::new(1);
        let category = CategoryId::new(1);
        assert_eq!(card.get(), category.get());
    }
}

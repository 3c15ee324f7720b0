//! Monthly budget model
//!
//! A budget is an expense ceiling for one month. The API is loose about types
//! here: month and year arrive as strings or numbers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::BudgetId;
use super::money::Money;

/// A monthly expense ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// Month, 1-12
    #[serde(deserialize_with = "deserialize_loose_u32", serialize_with = "serialize_month")]
    pub month: u32,

    #[serde(deserialize_with = "deserialize_loose_i32", serialize_with = "serialize_year")]
    pub year: i32,

    pub amount: Money,
}

impl Budget {
    /// "11/2025"
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

/// Body for creating or updating a budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetInput {
    #[serde(serialize_with = "serialize_month")]
    pub month: u32,
    #[serde(serialize_with = "serialize_year")]
    pub year: i32,
    pub amount: Money,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(i64),
    Text(String),
}

fn loose_to_i64<E: serde::de::Error>(value: Loose) -> Result<i64, E> {
    match value {
        Loose::Number(n) => Ok(n),
        Loose::Text(s) => s.trim().parse().map_err(E::custom),
    }
}

fn deserialize_loose_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = loose_to_i64(Loose::deserialize(deserializer)?)?;
    u32::try_from(n).map_err(serde::de::Error::custom)
}

fn deserialize_loose_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let n = loose_to_i64(Loose::deserialize(deserializer)?)?;
    i32::try_from(n).map_err(serde::de::Error::custom)
}

fn serialize_month<S: Serializer>(month: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:02}", month))
}

fn serialize_year<S: Serializer>(year: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&year.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_fields() {
        let a: Budget =
            serde_json::from_str(r#"{"id":1,"month":"03","year":"2025","amount":"500"}"#).unwrap();
        let b: Budget =
            serde_json::from_str(r#"{"id":1,"month":3,"year":2025,"amount":500}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.label(), "03/2025");
    }

    #[test]
    fn test_input_serializes_padded_strings() {
        let input = BudgetInput {
            month: 4,
            year: 2025,
            amount: Money::from_cents(25_000),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["month"], "04");
        assert_eq!(value["year"], "2025");
        assert_eq!(value["amount"], 250.0);
    }
}

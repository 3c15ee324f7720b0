//! Category model
//!
//! Categories are managed by the backend and are read-only here.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// A user-defined expense or income label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: TransactionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Categories usable for the given transaction type
pub fn categories_for(categories: &[Category], kind: TransactionType) -> Vec<&Category> {
    categories.iter().filter(|c| c.kind == kind).collect()
}

/// Look up a category name by id
pub fn category_name(categories: &[Category], id: CategoryId) -> Option<&str> {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Category> {
        serde_json::from_str(
            r##"[{"id":1,"name":"Food","type":"expense","color":"#f00"},
                {"id":2,"name":"Salary","type":"income"}]"##,
        )
        .unwrap()
    }

    #[test]
    fn test_filter_by_kind() {
        let categories = sample();
        let income = categories_for(&categories, TransactionType::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].name, "Salary");
    }

    #[test]
    fn test_lookup_name() {
        let categories = sample();
        assert_eq!(category_name(&categories, CategoryId::new(1)), Some("Food"));
        assert_eq!(category_name(&categories, CategoryId::new(9)), None);
    }
}

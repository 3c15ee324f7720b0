//! Transaction model
//!
//! The API has returned transactions in a few shapes over time: flat
//! `categoryId`/`cardId`, capitalized `CategoryId`/`CardId` foreign keys, and
//! nested `Category { id, name }` / `Card { id, name }` objects. All of them
//! are normalized into [`Transaction`] on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CardId, CategoryId, TransactionId};
use super::money::Money;

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Card => write!(f, "card"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTransaction", rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub description: String,

    pub amount: Money,

    /// Date string exactly as stored by the API
    pub date: String,

    pub payment_method: PaymentMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<CardId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// The amount with the sign of its effect on the balance
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelatedRef {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    id: TransactionId,
    #[serde(rename = "type", default)]
    kind: TransactionType,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    amount: Money,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    payment_method: Option<PaymentMethod>,

    #[serde(default, deserialize_with = "deserialize_opt_id")]
    category_id: Option<i64>,
    #[serde(rename = "CategoryId", default, deserialize_with = "deserialize_opt_id")]
    category_id_fk: Option<i64>,
    #[serde(rename = "Category", default)]
    category: Option<RelatedRef>,

    #[serde(default, deserialize_with = "deserialize_opt_id")]
    card_id: Option<i64>,
    #[serde(rename = "CardId", default, deserialize_with = "deserialize_opt_id")]
    card_id_fk: Option<i64>,
    #[serde(rename = "Card", default)]
    card: Option<RelatedRef>,
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        let category_id = raw
            .category_id
            .or(raw.category_id_fk)
            .or_else(|| raw.category.as_ref().and_then(|c| c.id))
            .map(CategoryId::new);
        let card_id = raw
            .card_id
            .or(raw.card_id_fk)
            .or_else(|| raw.card.as_ref().and_then(|c| c.id))
            .map(CardId::new);

        Self {
            id: raw.id,
            kind: raw.kind,
            description: raw.description.unwrap_or_default(),
            amount: raw.amount,
            date: raw.date.unwrap_or_default(),
            payment_method: raw.payment_method.unwrap_or_default(),
            category_id,
            category_name: raw.category.and_then(|c| c.name),
            card_id,
            card_name: raw.card.and_then(|c| c.name),
        }
    }
}

/// Accepts a number, a numeric string, `null` or an empty string
fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(i64),
        Text(String),
    }

    match Option::<Wire>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Wire::Number(n)) => Ok(Some(n)),
        Some(Wire::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Wire::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Body for creating or updating a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub amount: Money,
    pub date: String,
    pub payment_method: PaymentMethod,
    pub category_id: Option<CategoryId>,
    pub card_id: Option<CardId>,
}

impl TransactionInput {
    /// Start an edit from an existing transaction
    pub fn from_existing(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            description: txn.description.clone(),
            amount: txn.amount,
            date: txn.date.clone(),
            payment_method: txn.payment_method,
            category_id: txn.category_id,
            card_id: txn.card_id,
        }
    }
}

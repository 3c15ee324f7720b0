//! Transaction service
//!
//! Loads everything the transactions page needs and validates transaction
//! forms before they reach the API. Every mutation is followed by a refetch
//! on the caller's side; nothing is merged locally.

use crate::api::ApiClient;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    Budget, Card, Category, PaymentMethod, Transaction, TransactionId, TransactionInput,
    TransactionType,
};

/// Everything the transactions page shows
#[derive(Debug, Clone, Default)]
pub struct TransactionsData {
    pub categories: Vec<Category>,
    pub cards: Vec<Card>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch categories, cards, transactions and budgets
    pub fn load(&self) -> ExpenseResult<TransactionsData> {
        Ok(TransactionsData {
            categories: self.client.categories()?,
            cards: self.client.cards()?,
            transactions: self.client.transactions()?,
            budgets: self.client.budgets()?,
        })
    }

    /// Fetch only the transaction list
    pub fn list(&self) -> ExpenseResult<Vec<Transaction>> {
        self.client.transactions()
    }

    /// Record an expense
    pub fn add_expense(&self, mut input: TransactionInput) -> ExpenseResult<()> {
        input.kind = TransactionType::Expense;
        self.create(input)
    }

    /// Record an income (always cash)
    pub fn add_income(&self, mut input: TransactionInput) -> ExpenseResult<()> {
        input.kind = TransactionType::Income;
        self.create(input)
    }

    fn create(&self, mut input: TransactionInput) -> ExpenseResult<()> {
        normalize_and_validate(&mut input)?;
        self.client.create_transaction(&input)?;
        tracing::info!(kind = %input.kind, amount = %input.amount, "transaction created");
        Ok(())
    }

    /// Replace an existing transaction
    pub fn update(&self, id: TransactionId, mut input: TransactionInput) -> ExpenseResult<()> {
        normalize_and_validate(&mut input)?;
        self.client.update_transaction(id, &input)?;
        tracing::info!(%id, "transaction updated");
        Ok(())
    }

    pub fn delete(&self, id: TransactionId) -> ExpenseResult<()> {
        self.client.delete_transaction(id)?;
        tracing::info!(%id, "transaction deleted");
        Ok(())
    }
}

/// Apply the form rules to a transaction body.
///
/// Income is always cash and never carries a card; a card payment must name
/// a card. A cash expense may still be attributed to an account.
pub fn normalize_and_validate(input: &mut TransactionInput) -> ExpenseResult<()> {
    input.description = input.description.trim().to_string();
    input.date = input.date.trim().to_string();

    if input.kind == TransactionType::Income {
        input.payment_method = PaymentMethod::Cash;
        input.card_id = None;
    }

    if input.description.is_empty() {
        return Err(ExpenseError::Validation("Description is required".into()));
    }
    if !input.amount.is_positive() {
        return Err(ExpenseError::Validation(
            "Amount must be greater than 0".into(),
        ));
    }
    if input.date.is_empty() {
        return Err(ExpenseError::Validation("Date is required".into()));
    }
    if input.payment_method == PaymentMethod::Card && input.card_id.is_none() {
        return Err(ExpenseError::Validation(
            "Please select a card for card payments".into(),
        ));
    }
    Ok(())
}

/// Find a category by id or case-insensitive name
pub fn find_category<'c>(categories: &'c [Category], identifier: &str) -> ExpenseResult<&'c Category> {
    let identifier = identifier.trim();
    let by_id = identifier
        .parse()
        .ok()
        .and_then(|id| categories.iter().find(|c| c.id == id));
    by_id
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(identifier))
        })
        .ok_or_else(|| ExpenseError::category_not_found(identifier))
}

/// Find a card by id or case-insensitive name
pub fn find_card<'c>(cards: &'c [Card], identifier: &str) -> ExpenseResult<&'c Card> {
    let identifier = identifier.trim();
    let by_id = identifier
        .parse()
        .ok()
        .and_then(|id| cards.iter().find(|c| c.id == id));
    by_id
        .or_else(|| cards.iter().find(|c| c.name.eq_ignore_ascii_case(identifier)))
        .ok_or_else(|| ExpenseError::card_not_found(identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardId, CategoryId, Money};

    fn input(kind: TransactionType, method: PaymentMethod) -> TransactionInput {
        TransactionInput {
            kind,
            description: " Lunch ".into(),
            amount: Money::from_cents(1_250),
            date: "2025-11-09".into(),
            payment_method: method,
            category_id: Some(CategoryId::new(1)),
            card_id: Some(CardId::new(2)),
        }
    }

    #[test]
    fn test_income_forces_cash() {
        let mut body = input(TransactionType::Income, PaymentMethod::Card);
        normalize_and_validate(&mut body).unwrap();
        assert_eq!(body.payment_method, PaymentMethod::Cash);
        assert_eq!(body.card_id, None);
        assert_eq!(body.description, "Lunch");
    }

    #[test]
    fn test_card_payment_needs_card() {
        let mut body = input(TransactionType::Expense, PaymentMethod::Card);
        body.card_id = None;
        let err = normalize_and_validate(&mut body).unwrap_err();
        assert_eq!(
            err.user_message(""),
            "Please select a card for card payments"
        );
    }

    #[test]
    fn test_required_fields() {
        let mut body = input(TransactionType::Expense, PaymentMethod::Cash);
        body.description = "  ".into();
        assert_eq!(
            normalize_and_validate(&mut body).unwrap_err().user_message(""),
            "Description is required"
        );

        let mut body = input(TransactionType::Expense, PaymentMethod::Cash);
        body.amount = Money::zero();
        assert_eq!(
            normalize_and_validate(&mut body).unwrap_err().user_message(""),
            "Amount must be greater than 0"
        );
    }

    #[test]
    fn test_cash_expense_keeps_account() {
        let mut body = input(TransactionType::Expense, PaymentMethod::Cash);
        normalize_and_validate(&mut body).unwrap();
        assert_eq!(body.card_id, Some(CardId::new(2)));
    }

    #[test]
    fn test_find_by_id_or_name() {
        let categories = vec![
            Category {
                id: CategoryId::new(4),
                name: "Food".into(),
                kind: TransactionType::Expense,
                color: None,
            },
            Category {
                id: CategoryId::new(7),
                name: "Salary".into(),
                kind: TransactionType::Income,
                color: None,
            },
        ];
        assert_eq!(find_category(&categories, "7").unwrap().name, "Salary");
        assert_eq!(find_category(&categories, "cat-4").unwrap().name, "Food");
        assert_eq!(find_category(&categories, "food").unwrap().id, CategoryId::new(4));
        assert!(find_category(&categories, "Rent").unwrap_err().is_not_found());
    }
}

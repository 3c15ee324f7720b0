//! Account service
//!
//! Accounts are the API's cards. Besides card CRUD this covers the accounts
//! page: the remembered selection, a server-paged transaction list for the
//! selected card, and a per-card income/expense summary.

use crate::api::{ApiClient, TransactionPage};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::card::{sanitize_last4, DEFAULT_CARD_COLOR};
use crate::models::{
    Card, CardId, CardInput, Money, PaymentMethod, Transaction, TransactionId, TransactionInput,
    TransactionType,
};
use crate::services::pagination::{PageSize, Paginator};

/// Income, expense and balance of one card over all its transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardSummary {
    pub income: Money,
    pub expense: Money,
}

impl CardSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();
        for txn in transactions {
            match txn.kind {
                TransactionType::Income => summary.income += txn.amount,
                TransactionType::Expense => summary.expense += txn.amount,
            }
        }
        summary
    }

    pub fn balance(&self) -> Money {
        self.income - self.expense
    }
}

/// Service for account management
pub struct AccountService<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> ExpenseResult<Vec<Card>> {
        self.client.cards()
    }

    /// Create a new account
    pub fn create(&self, name: &str, color: Option<&str>, last4: &str) -> ExpenseResult<Card> {
        let input = card_input(name, color, last4)?;
        let card = self.client.create_card(&input)?;
        tracing::info!(id = %card.id, name = %card.name, "account created");
        Ok(card)
    }

    /// Replace an account's name, colour and digits
    pub fn update(&self, id: CardId, name: &str, color: Option<&str>, last4: &str) -> ExpenseResult<()> {
        let input = card_input(name, color, last4)?;
        self.client.update_card(id, &input)?;
        tracing::info!(%id, "account updated");
        Ok(())
    }

    /// Delete an account; the API deletes its transactions too
    pub fn delete(&self, id: CardId) -> ExpenseResult<()> {
        self.client.delete_card(id)?;
        tracing::info!(%id, "account deleted");
        Ok(())
    }

    /// Fetch one page of a card's transactions.
    ///
    /// The returned pager carries the server's total with `page` clamped into
    /// range; a page past the end is refetched as the last page. A server
    /// that ignores the paging parameters returns the whole list, which is
    /// sliced here.
    pub fn transactions_page(
        &self,
        card: CardId,
        page: usize,
        size: PageSize,
    ) -> ExpenseResult<(Vec<Transaction>, Paginator)> {
        let requested = page.max(1);
        let mut pager = Paginator::new(size);
        let TransactionPage { items, total } =
            self.client
                .card_transactions_page(card, requested, size.get())?;

        if items.len() > size.get() {
            pager.set_total(items.len());
            pager.go_to(requested);
            let rows = pager.page_slice(&items).to_vec();
            return Ok((rows, pager));
        }

        pager.set_total(total);
        pager.go_to(requested);
        if pager.page() != requested {
            let last = self
                .client
                .card_transactions_page(card, pager.page(), size.get())?;
            return Ok((last.items, pager));
        }
        Ok((items, pager))
    }

    /// Income/expense over every transaction of the card
    pub fn summary(&self, card: CardId) -> ExpenseResult<CardSummary> {
        let all = self.client.card_transactions(card)?;
        Ok(CardSummary::from_transactions(&all))
    }

    /// Record a transaction against a card
    pub fn add_transaction(&self, card: CardId, mut input: TransactionInput) -> ExpenseResult<()> {
        prepare_for_card(card, &mut input)?;
        self.client.create_transaction(&input)?;
        tracing::info!(%card, kind = %input.kind, "account transaction created");
        Ok(())
    }

    /// Replace a transaction, keeping it on the card
    pub fn update_transaction(
        &self,
        card: CardId,
        id: TransactionId,
        mut input: TransactionInput,
    ) -> ExpenseResult<()> {
        prepare_for_card(card, &mut input)?;
        self.client.update_transaction(id, &input)
    }

    pub fn delete_transaction(&self, id: TransactionId) -> ExpenseResult<()> {
        self.client.delete_transaction(id)
    }
}

/// The remembered card if it still exists, else the first card
pub fn select(cards: &[Card], remembered: Option<CardId>) -> Option<&Card> {
    remembered
        .and_then(|id| cards.iter().find(|c| c.id == id))
        .or_else(|| cards.first())
}

fn card_input(name: &str, color: Option<&str>, last4: &str) -> ExpenseResult<CardInput> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ExpenseError::Validation("Account name is required".into()));
    }
    let color = color
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CARD_COLOR);
    Ok(CardInput {
        name: name.to_string(),
        color: color.to_string(),
        last4: sanitize_last4(last4),
    })
}

/// Account-page rules: the card is always set, income is cash
fn prepare_for_card(card: CardId, input: &mut TransactionInput) -> ExpenseResult<()> {
    input.description = input.description.trim().to_string();
    if input.description.is_empty() {
        return Err(ExpenseError::Validation("Description is required".into()));
    }
    if !input.amount.is_positive() {
        return Err(ExpenseError::Validation(
            "Amount must be greater than 0".into(),
        ));
    }
    if input.kind == TransactionType::Income {
        input.payment_method = PaymentMethod::Cash;
    }
    if input.date.trim().is_empty() {
        input.date = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    }
    input.card_id = Some(card);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    fn card(id: i64, name: &str) -> Card {
        Card {
            id: CardId::new(id),
            name: name.into(),
            color: DEFAULT_CARD_COLOR.into(),
            last4: None,
        }
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let cards = vec![card(1, "Visa"), card(2, "Cash")];
        assert_eq!(select(&cards, Some(CardId::new(2))).unwrap().name, "Cash");
        assert_eq!(select(&cards, Some(CardId::new(9))).unwrap().name, "Visa");
        assert_eq!(select(&cards, None).unwrap().name, "Visa");
        assert!(select(&[], Some(CardId::new(1))).is_none());
    }

    #[test]
    fn test_card_input_rules() {
        let input = card_input(" Visa ", None, "12-34-56").unwrap();
        assert_eq!(input.name, "Visa");
        assert_eq!(input.color, DEFAULT_CARD_COLOR);
        assert_eq!(input.last4, "1234");

        let err = card_input("  ", Some("#000"), "").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_summary_from_transactions() {
        let txns: Vec<Transaction> = serde_json::from_str(
            r#"[{"id":1,"type":"income","description":"a","amount":100,"date":"2025-01-01"},
                {"id":2,"type":"expense","description":"b","amount":30.5,"date":"2025-01-02"},
                {"id":3,"type":"expense","description":"c","amount":"9.5","date":"2025-01-03"}]"#,
        )
        .unwrap();
        let summary = CardSummary::from_transactions(&txns);
        assert_eq!(summary.income.cents(), 10_000);
        assert_eq!(summary.expense.cents(), 4_000);
        assert_eq!(summary.balance().cents(), 6_000);
    }

    #[test]
    fn test_prepare_for_card() {
        let mut input = TransactionInput {
            kind: TransactionType::Income,
            description: "Refund".into(),
            amount: Money::from_cents(500),
            date: String::new(),
            payment_method: PaymentMethod::Card,
            category_id: Some(CategoryId::new(1)),
            card_id: None,
        };
        prepare_for_card(CardId::new(3), &mut input).unwrap();
        assert_eq!(input.card_id, Some(CardId::new(3)));
        assert_eq!(input.payment_method, PaymentMethod::Cash);
        assert_eq!(input.date.len(), 10);

        input.amount = Money::zero();
        assert!(prepare_for_card(CardId::new(3), &mut input).is_err());
    }
}

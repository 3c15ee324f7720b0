//! Account CLI commands
//!
//! Implements the accounts page: card CRUD, the remembered selection, and
//! the selected card's paged transactions and summary.

use clap::Subcommand;

use crate::context::AppContext;
use crate::display::account::{format_card_list, format_card_summary};
use crate::display::transaction::format_transaction_table;
use crate::error::{ExpenseError, ExpenseResult, ResultExt};
use crate::feedback::Feedback;
use crate::models::{Card, Money, PaymentMethod, TransactionId, TransactionInput, Transaction};
use crate::routes::Route;
use crate::services::account::select;
use crate::services::pagination::PageSize;
use crate::services::transaction::{find_card, find_category};
use crate::services::AccountService;

use super::transaction::Kind;
use super::{print_feedback, require_session, today};

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List all accounts
    List,
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Colour, e.g. "#0ea5e9"
        #[arg(long)]
        color: Option<String>,
        /// Last four card digits
        #[arg(long, default_value = "")]
        last4: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        last4: Option<String>,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Make an account the selected one
    Select {
        /// Account name or ID
        account: String,
    },
    /// Show an account's summary and one page of its transactions
    Show {
        /// Account name or ID; defaults to the selected account
        account: Option<String>,
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page (10, 20 or 50)
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Record a transaction on the selected account
    AddTransaction {
        #[arg(value_enum)]
        kind: Kind,
        description: String,
        amount: Money,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// cash or card (income is always cash)
        #[arg(short = 'M', long, default_value = "cash")]
        method: PaymentMethod,
    },
    /// Edit a transaction of the selected account
    EditTransaction {
        id: TransactionId,
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<Kind>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<Money>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'M', long)]
        method: Option<PaymentMethod>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a transaction of the selected account
    DeleteTransaction {
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(ctx: &mut AppContext, cmd: AccountCommands) -> ExpenseResult<()> {
    let client = require_session(ctx, Route::Accounts)?;
    let service = AccountService::new(&client);
    let symbol = ctx.settings().currency_symbol.clone();

    match cmd {
        AccountCommands::List => {
            let cards = service.list().context("Failed to load accounts")?;
            let selected = select(&cards, ctx.selected_account()).map(|c| c.id);
            print!("{}", format_card_list(&cards, selected));
        }

        AccountCommands::Create { name, color, last4 } => {
            let card = service
                .create(&name, color.as_deref(), &last4)
                .context("Failed to create account")?;
            if ctx.selected_account().is_none() {
                ctx.remember_account(Some(card.id))?;
            }
            print_feedback(&Feedback::success(format!("Account created: {}", card.label())));
        }

        AccountCommands::Edit {
            account,
            name,
            color,
            last4,
        } => {
            let cards = service.list().context("Failed to load accounts")?;
            let card = find_card(&cards, &account)?;

            if name.is_none() && color.is_none() && last4.is_none() {
                println!("No changes specified. Use --name, --color or --last4.");
                return Ok(());
            }

            service
                .update(
                    card.id,
                    name.as_deref().unwrap_or(&card.name),
                    Some(color.as_deref().unwrap_or(&card.color)),
                    last4
                        .as_deref()
                        .unwrap_or(card.last4.as_deref().unwrap_or_default()),
                )
                .context("Failed to update account")?;
            print_feedback(&Feedback::success("Account updated"));
        }

        AccountCommands::Delete { account, force } => {
            let cards = service.list().context("Failed to load accounts")?;
            let card = find_card(&cards, &account)?;

            if !force {
                println!("About to delete account: {}", card.label());
                println!("This also deletes every transaction recorded on it.");
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(card.id).context("Failed to delete account")?;
            if ctx.selected_account() == Some(card.id) {
                ctx.remember_account(None)?;
            }
            print_feedback(&Feedback::success(format!("Account deleted: {}", card.name)));
        }

        AccountCommands::Select { account } => {
            let cards = service.list().context("Failed to load accounts")?;
            let card = find_card(&cards, &account)?;
            ctx.remember_account(Some(card.id))?;
            print_feedback(&Feedback::success(format!("Selected account: {}", card.label())));
        }

        AccountCommands::Show {
            account,
            page,
            limit,
        } => {
            let cards = service.list().context("Failed to load accounts")?;
            let card = resolve_account(ctx, &cards, account.as_deref())?;

            let summary = service
                .summary(card.id)
                .context("Failed to load account summary")?;
            let (items, pager) = service
                .transactions_page(card.id, page, PageSize::server(limit))
                .context("Failed to load transactions")?;

            print!("{}", format_card_summary(card, &summary, &symbol));
            println!();
            let rows: Vec<&Transaction> = items.iter().collect();
            print!("{}", format_transaction_table(&rows, &[], &cards, &symbol));
            println!("{}", pager.label());
        }

        AccountCommands::AddTransaction {
            kind,
            description,
            amount,
            category,
            date,
            method,
        } => {
            let cards = service.list().context("Failed to load accounts")?;
            let card = resolve_account(ctx, &cards, None)?;
            let category_id = match category {
                Some(category) => Some(find_category(&client.categories()?, &category)?.id),
                None => None,
            };

            let input = TransactionInput {
                kind: kind.into(),
                description,
                amount,
                date: date.unwrap_or_else(today),
                payment_method: method,
                category_id,
                card_id: Some(card.id),
            };
            let (done, failed) = match kind {
                Kind::Expense => ("Expense added", "Failed to add expense"),
                Kind::Income => ("Income added", "Failed to add income"),
            };
            service.add_transaction(card.id, input).context(failed)?;
            print_feedback(&Feedback::success(format!("{} to {}", done, card.name)));
        }

        AccountCommands::EditTransaction {
            id,
            kind,
            description,
            amount,
            date,
            method,
            category,
        } => {
            let cards = service.list().context("Failed to load accounts")?;
            let card = resolve_account(ctx, &cards, None)?;
            let existing = client
                .card_transactions(card.id)
                .context("Failed to load transactions")?;
            let txn = existing
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| ExpenseError::NotFound {
                    entity_type: "Transaction",
                    identifier: id.to_string(),
                })?;

            let mut input = TransactionInput::from_existing(txn);
            if let Some(kind) = kind {
                input.kind = kind.into();
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(amount) = amount {
                input.amount = amount;
            }
            if let Some(date) = date {
                input.date = date;
            }
            if let Some(method) = method {
                input.payment_method = method;
            }
            if let Some(category) = category {
                input.category_id = Some(find_category(&client.categories()?, &category)?.id);
            }

            service
                .update_transaction(card.id, id, input)
                .context("Failed to save changes")?;
            print_feedback(&Feedback::success("Changes saved"));
        }

        AccountCommands::DeleteTransaction { id, force } => {
            if !force {
                println!("About to delete transaction {}", id);
                println!("Use --force to confirm deletion");
                return Ok(());
            }
            service
                .delete_transaction(id)
                .context("Failed to delete transaction")?;
            print_feedback(&Feedback::success("Transaction deleted"));
        }
    }

    Ok(())
}

/// The named account, else the remembered one, else the first
fn resolve_account<'c>(ctx: &mut AppContext, cards: &'c [Card], account: Option<&str>) -> ExpenseResult<&'c Card> {
    let card = match account {
        Some(account) => find_card(cards, account)?,
        None => select(cards, ctx.selected_account()).ok_or_else(|| {
            ExpenseError::Validation("No accounts yet. Create one with `expense account create`.".into())
        })?,
    };
    ctx.remember_account(Some(card.id))?;
    Ok(card)
}

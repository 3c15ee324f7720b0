//! Transaction CLI commands
//!
//! Implements the transactions page: a filtered, paginated list plus the
//! add/edit/delete forms.

use clap::{Args, Subcommand, ValueEnum};

use crate::context::AppContext;
use crate::display::transaction::{format_filtered_transactions, format_transaction_details};
use crate::error::{ExpenseError, ExpenseResult, ResultExt};
use crate::feedback::Feedback;
use crate::models::{Money, PaymentMethod, TransactionId, TransactionInput, TransactionType};
use crate::routes::Route;
use crate::services::filter::{PaymentFilter, TransactionFilter, TypeFilter};
use crate::services::pagination::{PageSize, Paginator};
use crate::services::transaction::{find_card, find_category, TransactionsData};
use crate::services::TransactionService;

use super::{parse_month, print_feedback, require_session, today, MonthArg};

/// Kind of transaction to add
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Expense,
    Income,
}

impl From<Kind> for TransactionType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => TransactionType::Expense,
            Kind::Income => TransactionType::Income,
        }
    }
}

/// Filter options shared by `list` and `export transactions`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Month window (1-12, YYYY-MM or a month name); defaults to this month
    #[arg(short, long, value_parser = parse_month)]
    pub month: Option<MonthArg>,
    /// Year window; defaults to this year
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Ignore the month and show the whole year
    #[arg(long)]
    pub whole_year: bool,
    /// all, expense or income
    #[arg(short = 't', long = "type", default_value = "all")]
    pub kind: TypeFilter,
    /// all, cash or card
    #[arg(long, default_value = "all")]
    pub method: PaymentFilter,
    /// Category name or ID
    #[arg(short, long)]
    pub category: Option<String>,
}

impl FilterArgs {
    /// Build the filter, resolving the category against the loaded list
    pub fn to_filter(&self, data: &TransactionsData) -> ExpenseResult<TransactionFilter> {
        let mut filter = TransactionFilter::default();
        if let Some(month) = self.month {
            filter.month = month.month;
        }
        if let Some(year) = self.month.map_or(self.year, |m| m.year_or(self.year)) {
            filter.year = year;
        }
        filter.whole_year = self.whole_year;
        filter.kind = self.kind;
        filter.payment = self.method;
        filter.category = match &self.category {
            Some(category) => Some(find_category(&data.categories, category)?.id),
            None => None,
        };
        Ok(filter)
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// List transactions for a month or year
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page (5, 10 or 20); defaults to the saved setting
        #[arg(long)]
        page_size: Option<PageSize>,
    },
    /// Show one transaction
    Show {
        /// Transaction ID
        id: TransactionId,
    },
    /// Record an expense or income
    Add {
        /// expense or income
        #[arg(value_enum)]
        kind: Kind,
        /// What it was for
        description: String,
        /// Amount, e.g. 12.50
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
        /// Account name or ID, required for card payments
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// Change to expense or income
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
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Account name or ID
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(ctx: &mut AppContext, cmd: TransactionCommands) -> ExpenseResult<()> {
    let client = require_session(ctx, Route::Transactions)?;
    let service = TransactionService::new(&client);
    let symbol = ctx.settings().currency_symbol.clone();

    match cmd {
        TransactionCommands::List {
            filter,
            page,
            page_size,
        } => {
            let data = service.load().context("Failed to load data")?;
            let filter = filter.to_filter(&data)?;
            let rows = filter.apply(&data.transactions);

            let size = page_size.unwrap_or_else(|| PageSize::local(ctx.page_size()));
            let mut pager = Paginator::new(size);
            pager.set_total(rows.len());
            pager.go_to(page);
            let page_rows = &rows[pager.range()];

            print!(
                "{}",
                format_filtered_transactions(&filter, page_rows, &data.categories, &data.cards, &symbol)
            );
            if !rows.is_empty() {
                println!("{}", pager.label());
            }
        }

        TransactionCommands::Show { id } => {
            let data = service.load().context("Failed to load data")?;
            let txn = data
                .transactions
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| transaction_not_found(id))?;
            print!(
                "{}",
                format_transaction_details(txn, &data.categories, &data.cards, &symbol)
            );
        }

        TransactionCommands::Add {
            kind,
            description,
            amount,
            category,
            date,
            method,
            account,
        } => {
            let data = service.load().context("Failed to load data")?;
            let input = TransactionInput {
                kind: kind.into(),
                description,
                amount,
                date: date.unwrap_or_else(today),
                payment_method: method,
                category_id: resolve_category(&data, category.as_deref())?,
                card_id: resolve_card(&data, account.as_deref())?,
            };

            match kind {
                Kind::Expense => {
                    service.add_expense(input).context("Failed to add expense")?;
                    print_feedback(&Feedback::success("Expense added"));
                }
                Kind::Income => {
                    service.add_income(input).context("Failed to add income")?;
                    print_feedback(&Feedback::success("Income added"));
                }
            }
        }

        TransactionCommands::Edit {
            id,
            kind,
            description,
            amount,
            date,
            method,
            category,
            account,
        } => {
            let data = service.load().context("Failed to load data")?;
            let txn = data
                .transactions
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| transaction_not_found(id))?;

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
            if category.is_some() {
                input.category_id = resolve_category(&data, category.as_deref())?;
            }
            if account.is_some() {
                input.card_id = resolve_card(&data, account.as_deref())?;
            }

            service.update(id, input).context("Failed to save changes")?;
            print_feedback(&Feedback::success("Changes saved"));
        }

        TransactionCommands::Delete { id, force } => {
            if !force {
                let data = service.load().context("Failed to load data")?;
                let txn = data
                    .transactions
                    .iter()
                    .find(|t| t.id == id)
                    .ok_or_else(|| transaction_not_found(id))?;
                println!("About to delete transaction:");
                print!(
                    "{}",
                    format_transaction_details(txn, &data.categories, &data.cards, &symbol)
                );
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service
                .delete(id)
                .context("Failed to delete transaction")?;
            print_feedback(&Feedback::success("Transaction deleted"));
        }
    }

    Ok(())
}

fn transaction_not_found(id: TransactionId) -> ExpenseError {
    ExpenseError::NotFound {
        entity_type: "Transaction",
        identifier: id.to_string(),
    }
}

fn resolve_category(
    data: &TransactionsData,
    category: Option<&str>,
) -> ExpenseResult<Option<crate::models::CategoryId>> {
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(category) => Ok(Some(find_category(&data.categories, category)?.id)),
        None => Ok(None),
    }
}

fn resolve_card(data: &TransactionsData, account: Option<&str>) -> ExpenseResult<Option<crate::models::CardId>> {
    match account.map(str::trim).filter(|a| !a.is_empty()) {
        Some(account) => Ok(Some(find_card(&data.cards, account)?.id)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId};

    #[test]
    fn test_filter_args_resolve_category() {
        let data = TransactionsData {
            categories: vec![Category {
                id: CategoryId::new(5),
                name: "Food".into(),
                kind: TransactionType::Expense,
                color: None,
            }],
            ..TransactionsData::default()
        };
        let args = FilterArgs {
            month: Some(MonthArg::new(2)),
            year: Some(2024),
            whole_year: false,
            kind: "expense".parse().unwrap(),
            method: PaymentFilter::All,
            category: Some("food".into()),
        };
        let filter = args.to_filter(&data).unwrap();
        assert_eq!(filter.month, 2);
        assert_eq!(filter.year, 2024);
        assert_eq!(filter.category, Some(CategoryId::new(5)));
        assert_eq!(filter.kind, TypeFilter::Only(TransactionType::Expense));

        let missing = FilterArgs {
            category: Some("Rent".into()),
            ..args
        };
        assert!(missing.to_filter(&data).unwrap_err().is_not_found());

        let dated = FilterArgs {
            month: Some(MonthArg {
                month: 5,
                year: Some(2023),
            }),
            category: None,
            ..missing
        };
        let filter = dated.to_filter(&data).unwrap();
        assert_eq!((filter.year, filter.month), (2023, 5));
    }
}

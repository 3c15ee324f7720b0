//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Data is loaded synchronously from the API when a view is opened or
//! refreshed; failures become notifications instead of aborting the loop.

use crate::api::ApiClient;
use crate::config::theme::Palette;
use crate::context::AppContext;
use crate::error::{ExpenseError, ExpenseResult};
use crate::feedback::Feedback;
use crate::models::{Card, ContributionId, Period, SavingsPlan, Transaction, TransactionId};
use crate::reports::{DashboardReport, HistorySource, SavingsReport};
use crate::routes::Route;
use crate::services::pagination::{PageSize, Paginator};
use crate::services::{
    account, savings, AccountService, CardSummary, DashboardService, SavingsService,
    TransactionFilter, TransactionService, TransactionsData,
};

use super::widgets::{Notification, NotificationQueue};

/// Rows per page on the accounts view
pub const ACCOUNT_PAGE_SIZE: usize = 10;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Transactions,
    Accounts,
    Savings,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Dashboard,
        ActiveView::Transactions,
        ActiveView::Accounts,
        ActiveView::Savings,
    ];

    /// The view for a start route; pages without a view open the dashboard
    pub fn from_route(route: Route) -> Self {
        match route {
            Route::Transactions => Self::Transactions,
            Route::Accounts => Self::Accounts,
            Route::SavingPlan => Self::Savings,
            _ => Self::Dashboard,
        }
    }

    pub fn route(self) -> Route {
        match self {
            Self::Dashboard => Route::Dashboard,
            Self::Transactions => Route::Transactions,
            Self::Accounts => Route::Accounts,
            Self::Savings => Route::SavingPlan,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Accounts => "Accounts",
            Self::Savings => "Savings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

/// A deletion waiting for y/n
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    Transaction(TransactionId),
    Contribution(ContributionId),
}

impl PendingDelete {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Transaction(_) => "Delete this transaction?",
            Self::Contribution(_) => "Delete this contribution?",
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Confirm(PendingDelete),
}

/// Main application state
pub struct App<'a> {
    /// Persisted settings and session
    pub ctx: &'a mut AppContext,

    client: ApiClient,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_view: ActiveView,

    pub active_dialog: ActiveDialog,

    pub notifications: NotificationQueue,

    // Dashboard
    pub period: Period,
    pub year: i32,
    pub dashboard: Option<DashboardReport>,

    // Transactions
    pub data: TransactionsData,
    pub filter: TransactionFilter,
    pub transaction_pager: Paginator,
    pub selected_transaction_index: usize,

    // Accounts
    pub cards: Vec<Card>,
    pub selected_card_index: usize,
    pub account_rows: Vec<Transaction>,
    pub account_pager: Paginator,
    pub account_summary: Option<CardSummary>,
    pub selected_account_row: usize,

    // Savings
    pub plans: Vec<SavingsPlan>,
    pub selected_plan_index: usize,
    pub savings: Option<SavingsReport>,
    pub selected_history_index: usize,
}

impl<'a> App<'a> {
    /// Create the app for an authenticated context
    pub fn new(ctx: &'a mut AppContext, start: Route) -> ExpenseResult<Self> {
        if start.guard(ctx.is_authenticated()) == Route::Login {
            return Err(ExpenseError::Unauthorized {
                message: Some("You are not logged in. Run `expense login` first.".into()),
            });
        }
        let client = ctx.client()?;
        let (period, year) = ctx.dashboard_selection();
        let page_size = PageSize::local(ctx.page_size());

        Ok(Self {
            client,
            should_quit: false,
            active_view: ActiveView::from_route(start),
            active_dialog: ActiveDialog::None,
            notifications: NotificationQueue::new(),
            period,
            year,
            dashboard: None,
            data: TransactionsData::default(),
            filter: TransactionFilter::default(),
            transaction_pager: Paginator::new(page_size),
            selected_transaction_index: 0,
            cards: Vec::new(),
            selected_card_index: 0,
            account_rows: Vec::new(),
            account_pager: Paginator::new(PageSize::server(ACCOUNT_PAGE_SIZE)),
            account_summary: None,
            selected_account_row: 0,
            plans: Vec::new(),
            selected_plan_index: 0,
            savings: None,
            selected_history_index: 0,
            ctx,
        })
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn palette(&self) -> Palette {
        self.ctx.theme().palette()
    }

    /// Queue a banner
    pub fn notify(&mut self, feedback: Feedback) {
        self.notifications.push(Notification::from_feedback(&feedback));
    }

    /// Queue an error banner for a failed operation
    pub fn notify_error(&mut self, err: &ExpenseError, fallback: &str) {
        tracing::warn!(error = %err, "{}", fallback);
        self.notify(Feedback::from_error(err, fallback));
    }

    /// Drop expired notifications
    pub fn tick(&mut self) {
        self.notifications.remove_expired();
    }

    /// Switch to a different view and load it
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.refresh();
    }

    /// Reload the data behind the active view
    pub fn refresh(&mut self) {
        match self.active_view {
            ActiveView::Dashboard => self.load_dashboard(),
            ActiveView::Transactions => self.load_transactions(),
            ActiveView::Accounts => self.load_accounts(),
            ActiveView::Savings => self.load_savings(),
        }
    }

    pub fn toggle_theme(&mut self) {
        match self.ctx.toggle_theme() {
            Ok(theme) => self.notify(Feedback::info(format!("Theme: {}", theme))),
            Err(err) => self.notify_error(&err, "Could not save the theme"),
        }
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    // Dashboard

    pub fn load_dashboard(&mut self) {
        let result = DashboardService::new(&self.client).load(self.period, self.year);
        match result {
            Ok(report) => {
                self.dashboard = Some(report);
                if let Err(err) = self.ctx.remember_dashboard(self.period, self.year) {
                    tracing::warn!(error = %err, "failed to persist dashboard selection");
                }
            }
            Err(err) => {
                self.dashboard = None;
                self.notify_error(&err, "Failed to load dashboard");
            }
        }
    }

    /// Step the dashboard month; from the all-time view this starts at the
    /// current month
    pub fn shift_period(&mut self, forward: bool) {
        self.period = match self.period {
            Period::All => Period::current_month(),
            period if forward => period.next(),
            period => period.prev(),
        };
        if let Some(year) = self.period.year() {
            self.year = year;
        }
        self.load_dashboard();
    }

    /// Step the year shown by the annual chart (and the month, if any)
    pub fn shift_year(&mut self, delta: i32) {
        self.year += delta;
        if let Period::Month { month, .. } = self.period {
            self.period = Period::Month {
                year: self.year,
                month,
            };
        }
        self.load_dashboard();
    }

    pub fn toggle_all_time(&mut self) {
        self.period = match self.period {
            Period::All => Period::Month {
                year: self.year,
                month: chrono::Datelike::month(&chrono::Local::now().date_naive()),
            },
            Period::Month { .. } => Period::All,
        };
        self.load_dashboard();
    }

    // Transactions

    pub fn load_transactions(&mut self) {
        let result = TransactionService::new(&self.client).load();
        match result {
            Ok(data) => {
                self.data = data;
                self.sync_transaction_pager();
            }
            Err(err) => self.notify_error(&err, "Failed to load data"),
        }
    }

    /// Rows matching the current filter
    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        self.filter.apply(&self.data.transactions)
    }

    /// Re-clamp the page and selection after the filtered rows change
    pub fn sync_transaction_pager(&mut self) {
        let total = self.filtered_transactions().len();
        self.transaction_pager.set_total(total);
        let on_page = self.transaction_pager.range().len();
        self.selected_transaction_index = self
            .selected_transaction_index
            .min(on_page.saturating_sub(1));
    }

    /// The highlighted transaction on the current page
    pub fn selected_transaction(&self) -> Option<&Transaction> {
        let rows = self.filtered_transactions();
        let range = self.transaction_pager.range();
        rows.get(range.start + self.selected_transaction_index)
            .copied()
    }

    pub fn update_filter(&mut self, change: impl FnOnce(&mut TransactionFilter)) {
        change(&mut self.filter);
        self.transaction_pager.go_to(1);
        self.selected_transaction_index = 0;
        self.sync_transaction_pager();
    }

    pub fn cycle_page_size(&mut self) {
        let size = self.transaction_pager.page_size().cycle();
        self.transaction_pager.set_page_size(size);
        self.sync_transaction_pager();
        if let Err(err) = self.ctx.set_page_size(size.get()) {
            tracing::warn!(error = %err, "failed to persist page size");
        }
    }

    // Accounts

    pub fn load_accounts(&mut self) {
        let result = AccountService::new(&self.client).list();
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.selected_card_index = account::select(&self.cards, self.ctx.selected_account())
                    .and_then(|card| self.cards.iter().position(|c| c.id == card.id))
                    .unwrap_or(0);
                self.account_pager.go_to(1);
                self.load_account_page();
            }
            Err(err) => self.notify_error(&err, "Failed to load accounts"),
        }
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected_card_index)
    }

    /// Load the selected card's current page and totals
    pub fn load_account_page(&mut self) {
        let Some(card) = self.selected_card().map(|c| c.id) else {
            self.account_rows.clear();
            self.account_summary = None;
            return;
        };
        if let Err(err) = self.ctx.remember_account(Some(card)) {
            tracing::warn!(error = %err, "failed to persist selected account");
        }

        let service = AccountService::new(&self.client);
        let page = service.transactions_page(card, self.account_pager.page(), self.account_pager.page_size());
        let summary = service.summary(card);

        match page {
            Ok((rows, pager)) => {
                self.account_rows = rows;
                self.account_pager = pager;
                self.selected_account_row = 0;
            }
            Err(err) => self.notify_error(&err, "Failed to load transactions"),
        }
        match summary {
            Ok(summary) => self.account_summary = Some(summary),
            Err(err) => {
                self.account_summary = None;
                self.notify_error(&err, "Failed to load account totals");
            }
        }
    }

    pub fn shift_card(&mut self, forward: bool) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len();
        self.selected_card_index = if forward {
            (self.selected_card_index + 1) % len
        } else {
            (self.selected_card_index + len - 1) % len
        };
        self.account_pager.go_to(1);
        self.load_account_page();
    }

    pub fn account_page(&mut self, forward: bool) {
        let target = if forward {
            self.account_pager.page() + 1
        } else {
            self.account_pager.page().saturating_sub(1)
        };
        // The pager clamps, so only refetch when the page actually moves
        let before = self.account_pager.page();
        self.account_pager.go_to(target);
        if self.account_pager.page() != before {
            self.load_account_page();
        }
    }

    // Savings

    pub fn load_savings(&mut self) {
        let result = SavingsService::new(&self.client).plans();
        match result {
            Ok(plans) => {
                self.plans = plans;
                self.selected_plan_index = savings::select(&self.plans, self.ctx.selected_plan())
                    .and_then(|plan| self.plans.iter().position(|p| p.id == plan.id))
                    .unwrap_or(0);
                self.load_plan();
            }
            Err(err) => self.notify_error(&err, "Failed to load plans"),
        }
    }

    pub fn selected_plan(&self) -> Option<&SavingsPlan> {
        self.plans.get(self.selected_plan_index)
    }

    pub fn load_plan(&mut self) {
        let Some(plan) = self.selected_plan().cloned() else {
            self.savings = None;
            return;
        };
        if let Err(err) = self.ctx.remember_plan(Some(plan.id)) {
            tracing::warn!(error = %err, "failed to persist selected plan");
        }

        let page = self.savings.as_ref().map(|r| r.pager.page()).unwrap_or(1);
        let pager = Paginator::new(PageSize::local(self.ctx.page_size()));
        let result = SavingsService::new(&self.client).report(plan, pager);
        match result {
            Ok(mut report) => {
                report.pager.go_to(page);
                self.selected_history_index = 0;
                self.savings = Some(report);
            }
            Err(err) => {
                self.savings = None;
                self.notify_error(&err, "Failed to load plan summary");
            }
        }
    }

    pub fn shift_plan(&mut self, forward: bool) {
        if self.plans.is_empty() {
            return;
        }
        let len = self.plans.len();
        self.selected_plan_index = if forward {
            (self.selected_plan_index + 1) % len
        } else {
            (self.selected_plan_index + len - 1) % len
        };
        self.savings = None;
        self.load_plan();
    }

    /// Page through the savings history locally
    pub fn savings_page(&mut self, forward: bool) {
        if let Some(report) = self.savings.as_mut() {
            if forward {
                report.pager.next_page();
            } else {
                report.pager.prev_page();
            }
            self.selected_history_index = 0;
        }
    }

    // Selection

    /// Move the row highlight within the current page
    pub fn move_selection(&mut self, down: bool) {
        let (index, len) = match self.active_view {
            ActiveView::Transactions => (
                &mut self.selected_transaction_index,
                self.transaction_pager.range().len(),
            ),
            ActiveView::Accounts => (&mut self.selected_account_row, self.account_rows.len()),
            ActiveView::Savings => (
                &mut self.selected_history_index,
                self.savings.as_ref().map_or(0, |r| r.page_rows().len()),
            ),
            ActiveView::Dashboard => return,
        };
        if down {
            if *index + 1 < len {
                *index += 1;
            }
        } else {
            *index = index.saturating_sub(1);
        }
    }

    /// Page forward or back in the active view
    pub fn page(&mut self, forward: bool) {
        match self.active_view {
            ActiveView::Transactions => {
                if forward {
                    self.transaction_pager.next_page();
                } else {
                    self.transaction_pager.prev_page();
                }
                self.selected_transaction_index = 0;
            }
            ActiveView::Accounts => self.account_page(forward),
            ActiveView::Savings => self.savings_page(forward),
            ActiveView::Dashboard => {}
        }
    }

    // Deletion

    /// Ask to delete the highlighted row, if it can be deleted
    pub fn request_delete(&mut self) {
        let pending = match self.active_view {
            ActiveView::Transactions => self
                .selected_transaction()
                .map(|t| PendingDelete::Transaction(t.id)),
            ActiveView::Accounts => self
                .account_rows
                .get(self.selected_account_row)
                .map(|t| PendingDelete::Transaction(t.id)),
            ActiveView::Savings => {
                let row = self
                    .savings
                    .as_ref()
                    .and_then(|r| r.page_rows().get(self.selected_history_index))
                    .map(|row| row.source);
                match row {
                    Some(HistorySource::Manual(id)) => Some(PendingDelete::Contribution(id)),
                    Some(HistorySource::Auto(_)) => {
                        self.notify(Feedback::warning(
                            "Linked-category transactions are read-only here",
                        ));
                        None
                    }
                    None => None,
                }
            }
            ActiveView::Dashboard => None,
        };
        if let Some(pending) = pending {
            self.open_dialog(ActiveDialog::Confirm(pending));
        }
    }

    /// Carry out a confirmed deletion and reload the view
    pub fn confirm_delete(&mut self, pending: PendingDelete) {
        self.close_dialog();
        let (result, success, failure) = match pending {
            PendingDelete::Transaction(id) => (
                TransactionService::new(&self.client).delete(id),
                "Transaction deleted",
                "Failed to delete transaction",
            ),
            PendingDelete::Contribution(id) => (
                SavingsService::new(&self.client).delete_contribution(id),
                "Contribution deleted",
                "Failed to delete contribution",
            ),
        };
        match result {
            Ok(()) => {
                self.notify(Feedback::success(success));
                self.refresh();
            }
            Err(err) => self.notify_error(&err, failure),
        }
    }
}

//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the open
//! dialog and the active view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    match app.active_dialog {
        ActiveDialog::Help => {
            // Any key closes help
            app.close_dialog();
            Ok(())
        }
        ActiveDialog::Confirm(pending) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(pending),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
                _ => {}
            }
            Ok(())
        }
        ActiveDialog::None => handle_normal_key(app, key),
    }
}

/// Handle keys with no dialog open
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Char('1') => {
            app.switch_view(ActiveView::Dashboard);
            return Ok(());
        }
        KeyCode::Char('2') => {
            app.switch_view(ActiveView::Transactions);
            return Ok(());
        }
        KeyCode::Char('3') => {
            app.switch_view(ActiveView::Accounts);
            return Ok(());
        }
        KeyCode::Char('4') => {
            app.switch_view(ActiveView::Savings);
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.refresh();
            return Ok(());
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return Ok(());
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(true);
            return Ok(());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(false);
            return Ok(());
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            app.page(true);
            return Ok(());
        }
        KeyCode::Char('b') | KeyCode::PageUp => {
            app.page(false);
            return Ok(());
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.request_delete();
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Dashboard => handle_dashboard_key(app, key),
        ActiveView::Transactions => handle_transactions_key(app, key),
        ActiveView::Accounts => handle_accounts_key(app, key),
        ActiveView::Savings => handle_savings_key(app, key),
    }
    Ok(())
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.shift_period(false),
        KeyCode::Right | KeyCode::Char('l') => app.shift_period(true),
        KeyCode::Char('[') => app.shift_year(-1),
        KeyCode::Char(']') => app.shift_year(1),
        KeyCode::Char('a') => app.toggle_all_time(),
        _ => {}
    }
}

fn handle_transactions_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.update_filter(|f| f.shift_month(-1)),
        KeyCode::Right | KeyCode::Char('l') => app.update_filter(|f| f.shift_month(1)),
        KeyCode::Char('[') => app.update_filter(|f| f.year -= 1),
        KeyCode::Char(']') => app.update_filter(|f| f.year += 1),
        KeyCode::Char('a') => app.update_filter(|f| f.whole_year = !f.whole_year),
        KeyCode::Char('f') => app.update_filter(|f| f.kind = f.kind.cycle()),
        KeyCode::Char('p') => app.update_filter(|f| f.payment = f.payment.cycle()),
        KeyCode::Char('s') => app.cycle_page_size(),
        _ => {}
    }
}

fn handle_accounts_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => app.shift_card(false),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => app.shift_card(true),
        _ => {}
    }
}

fn handle_savings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => app.shift_plan(false),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => app.shift_plan(true),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use crate::context::AppContext;
    use crate::models::{Money, Transaction, TransactionId, TransactionType};
    use crate::routes::Route;
    use crate::services::filter::TypeFilter;
    use crate::tui::app::PendingDelete;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn txn(id: i64, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind: TransactionType::Expense,
            description: format!("t{}", id),
            amount: Money::from_cents(100),
            date: date.to_string(),
            payment_method: Default::default(),
            category_id: None,
            category_name: None,
            card_id: None,
            card_name: None,
        }
    }

    fn logged_in(dir: &TempDir) -> AppContext {
        let mut ctx =
            AppContext::load(ExpensePaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        ctx.store_login("tok".into(), None).unwrap();
        ctx
    }

    #[test]
    fn test_quit_and_help() {
        let dir = TempDir::new().unwrap();
        let mut ctx = logged_in(&dir);
        let mut app = App::new(&mut ctx, Route::Transactions).unwrap();

        handle_event(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!app.should_quit, "first key only closes help");
        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_filter_keys_and_delete_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut ctx = logged_in(&dir);
        let mut app = App::new(&mut ctx, Route::Transactions).unwrap();
        app.filter = crate::services::TransactionFilter::for_month(2025, 11);
        app.data.transactions = vec![txn(1, "2025-11-02"), txn(2, "2025-11-03")];
        app.sync_transaction_pager();

        handle_event(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.filter.kind, TypeFilter::All.cycle());

        handle_event(&mut app, key(KeyCode::Char('f'))).unwrap();
        handle_event(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.filter.kind, TypeFilter::All);

        handle_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        handle_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(
            app.active_dialog,
            ActiveDialog::Confirm(PendingDelete::Transaction(TransactionId::new(2)))
        );
        handle_event(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.active_dialog, ActiveDialog::None);
    }

    #[test]
    fn test_month_keys_shift_window() {
        let dir = TempDir::new().unwrap();
        let mut ctx = logged_in(&dir);
        let mut app = App::new(&mut ctx, Route::Transactions).unwrap();
        app.filter = crate::services::TransactionFilter::for_month(2025, 1);

        handle_event(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!((app.filter.month, app.filter.year), (12, 2024));
        handle_event(&mut app, key(KeyCode::Char(']'))).unwrap();
        assert_eq!(app.filter.year, 2025);
    }
}

//! Transaction filter pipeline
//!
//! Filters the full transaction list by type, payment method, category and a
//! month/year window. Dates arrive as whatever string the API stored, so the
//! month and year are extracted leniently; rows whose date cannot be read are
//! dropped.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::models::period::month_name_es;
use crate::models::{CategoryId, PaymentMethod, Transaction, TransactionType};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid ISO regex"));
static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid US regex"));

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y-%m-%d",
];

/// Month (1-12) and year of a date string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthYear {
    pub month: u32,
    pub year: i32,
}

/// Extract month and year from a stored date string.
///
/// Tries ISO `YYYY-MM-DD`, then US `MM/DD/YYYY`, then general date parsing.
/// Returns `None` when nothing matches.
pub fn extract_month_year(date: &str) -> Option<MonthYear> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if let Some(caps) = ISO_DATE.captures(date) {
        return Some(MonthYear {
            year: caps[1].parse().ok()?,
            month: caps[2].parse().ok()?,
        });
    }

    if let Some(caps) = US_DATE.captures(date) {
        return Some(MonthYear {
            year: caps[3].parse().ok()?,
            month: caps[1].parse().ok()?,
        });
    }

    parse_fallback(date).map(|d| MonthYear {
        month: d.month(),
        year: d.year(),
    })
}

fn parse_fallback(date: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(date) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        })
}

/// Which transaction types to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    fn matches(self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == kind,
        }
    }

    /// all → expense → income → all
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Only(TransactionType::Expense),
            Self::Only(TransactionType::Expense) => Self::Only(TransactionType::Income),
            Self::Only(TransactionType::Income) => Self::All,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(kind) => write!(f, "{}", kind),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Which payment methods to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentFilter {
    #[default]
    All,
    Only(PaymentMethod),
}

impl PaymentFilter {
    fn matches(self, method: PaymentMethod) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == method,
        }
    }

    /// all → cash → card → all
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Only(PaymentMethod::Cash),
            Self::Only(PaymentMethod::Cash) => Self::Only(PaymentMethod::Card),
            Self::Only(PaymentMethod::Card) => Self::All,
        }
    }
}

impl fmt::Display for PaymentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(method) => write!(f, "{}", method),
        }
    }
}

impl FromStr for PaymentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Filter state for the transactions page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: TypeFilter,
    pub payment: PaymentFilter,
    pub category: Option<CategoryId>,
    /// Month 1-12
    pub month: u32,
    pub year: i32,
    /// Ignore the month and keep the whole year
    pub whole_year: bool,
}

impl Default for TransactionFilter {
    /// Everything in the current month
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::for_month(today.year(), today.month())
    }
}

impl TransactionFilter {
    /// No type/payment/category restriction, one month window
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            kind: TypeFilter::All,
            payment: PaymentFilter::All,
            category: None,
            month,
            year,
            whole_year: false,
        }
    }

    /// Whether one transaction passes every predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.kind.matches(txn.kind)
            && self.payment.matches(txn.payment_method)
            && self.category.map_or(true, |c| txn.category_id == Some(c))
            && self.matches_date(&txn.date)
    }

    fn matches_date(&self, date: &str) -> bool {
        match extract_month_year(date) {
            None => false,
            Some(my) if self.whole_year => my.year == self.year,
            Some(my) => my.year == self.year && my.month == self.month,
        }
    }

    /// Apply the filter, preserving source order
    pub fn apply<'t>(&self, transactions: &'t [Transaction]) -> Vec<&'t Transaction> {
        let unreadable = transactions
            .iter()
            .filter(|t| extract_month_year(&t.date).is_none())
            .count();
        if unreadable > 0 {
            tracing::debug!(unreadable, "dropped transactions with unreadable dates");
        }

        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    /// Heading for the date window ("noviembre 2025", or "2025" for the whole year)
    pub fn window_label(&self) -> String {
        if self.whole_year {
            self.year.to_string()
        } else {
            format!("{} {}", month_name_es(self.month), self.year)
        }
    }

    /// Message shown when the filter matches nothing
    pub fn empty_message(&self) -> String {
        format!("No transactions for {}", self.window_label())
    }

    /// Step the month window, wrapping across years
    pub fn shift_month(&mut self, delta: i32) {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        self.year = index.div_euclid(12);
        self.month = index.rem_euclid(12) as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId};

    fn txn(id: i64, kind: TransactionType, method: PaymentMethod, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind,
            description: format!("t{}", id),
            amount: Money::from_cents(1000),
            date: date.to_string(),
            payment_method: method,
            category_id: Some(CategoryId::new(id % 2)),
            category_name: None,
            card_id: None,
            card_name: None,
        }
    }

    #[test]
    fn test_extract_iso_and_us() {
        assert_eq!(
            extract_month_year("2025-11-09"),
            Some(MonthYear { month: 11, year: 2025 })
        );
        assert_eq!(
            extract_month_year("3/09/2025"),
            Some(MonthYear { month: 3, year: 2025 })
        );
    }

    #[test]
    fn test_extract_fallbacks() {
        assert_eq!(
            extract_month_year("2025-02-01T10:00:00.000Z"),
            Some(MonthYear { month: 2, year: 2025 })
        );
        assert_eq!(
            extract_month_year("2024-12-31 23:59:59"),
            Some(MonthYear { month: 12, year: 2024 })
        );
        assert_eq!(
            extract_month_year("2024/07/04"),
            Some(MonthYear { month: 7, year: 2024 })
        );
        assert_eq!(
            extract_month_year("March 5, 2025"),
            Some(MonthYear { month: 3, year: 2025 })
        );
        assert_eq!(extract_month_year("yesterday"), None);
        assert_eq!(extract_month_year(""), None);
    }

    #[test]
    fn test_month_window() {
        let all = vec![
            txn(1, TransactionType::Expense, PaymentMethod::Cash, "2025-11-01"),
            txn(2, TransactionType::Income, PaymentMethod::Cash, "11/15/2025"),
            txn(3, TransactionType::Expense, PaymentMethod::Card, "2025-10-31"),
            txn(4, TransactionType::Expense, PaymentMethod::Cash, "2024-11-02"),
            txn(5, TransactionType::Expense, PaymentMethod::Cash, "garbage"),
        ];

        let filter = TransactionFilter::for_month(2025, 11);
        let ids: Vec<i64> = filter.apply(&all).iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);

        let mut year = filter;
        year.whole_year = true;
        let ids: Vec<i64> = year.apply(&all).iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_conjunctive_predicates() {
        let all = vec![
            txn(1, TransactionType::Expense, PaymentMethod::Cash, "2025-11-01"),
            txn(2, TransactionType::Expense, PaymentMethod::Card, "2025-11-02"),
            txn(3, TransactionType::Income, PaymentMethod::Cash, "2025-11-03"),
        ];

        let mut filter = TransactionFilter::for_month(2025, 11);
        filter.kind = TypeFilter::Only(TransactionType::Expense);
        filter.payment = PaymentFilter::Only(PaymentMethod::Card);
        let ids: Vec<i64> = filter.apply(&all).iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![2]);

        let mut by_category = TransactionFilter::for_month(2025, 11);
        by_category.category = Some(CategoryId::new(1));
        let ids: Vec<i64> = by_category.apply(&all).iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_message() {
        let mut filter = TransactionFilter::for_month(2025, 11);
        assert_eq!(filter.empty_message(), "No transactions for noviembre 2025");
        filter.whole_year = true;
        assert_eq!(filter.empty_message(), "No transactions for 2025");
    }

    #[test]
    fn test_shift_month_wraps() {
        let mut filter = TransactionFilter::for_month(2025, 1);
        filter.shift_month(-1);
        assert_eq!((filter.year, filter.month), (2024, 12));
        filter.shift_month(1);
        assert_eq!((filter.year, filter.month), (2025, 1));
        filter.shift_month(13);
        assert_eq!((filter.year, filter.month), (2026, 2));
    }

    #[test]
    fn test_filter_cycles() {
        assert_eq!(TypeFilter::All.cycle().cycle().cycle(), TypeFilter::All);
        assert_eq!(
            PaymentFilter::All.cycle(),
            PaymentFilter::Only(PaymentMethod::Cash)
        );
        assert_eq!("card".parse::<PaymentFilter>().unwrap().to_string(), "card");
        assert_eq!("ALL".parse::<TypeFilter>().unwrap(), TypeFilter::All);
    }
}

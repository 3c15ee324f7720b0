//! Reporting period for the statistics endpoints
//!
//! `/stats/summary` and `/stats/export` take a `period` query parameter that is
//! either `all` or a `YYYY-MM` month.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Spanish month names used in headings ("noviembre 2025")
pub const MONTH_NAMES_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// English month names used in CLI/TUI selectors
pub const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Spanish long month name for 1-12
pub fn month_name_es(month: u32) -> &'static str {
    MONTH_NAMES_ES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

/// English long month name for 1-12
pub fn month_name_en(month: u32) -> &'static str {
    MONTH_NAMES_EN
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

/// A statistics period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    /// Every transaction ever recorded
    #[default]
    All,
    /// A calendar month
    Month { year: i32, month: u32 },
}

impl Period {
    /// Create a monthly period
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self::Month { year, month })
    }

    /// Get the current monthly period
    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Year of a monthly period
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Month { year, .. } => Some(*year),
        }
    }

    /// Get the previous month (January wraps to December of the prior year)
    pub fn prev(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Month { year, month } => {
                if *month == 1 {
                    Self::Month {
                        year: *year - 1,
                        month: 12,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
        }
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Month { year, month } => {
                if *month == 12 {
                    Self::Month {
                        year: *year + 1,
                        month: 1,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month + 1,
                    }
                }
            }
        }
    }

    /// The twelve months of a year, January first
    pub fn months_of(year: i32) -> [Period; 12] {
        std::array::from_fn(|i| Self::Month {
            year,
            month: i as u32 + 1,
        })
    }

    /// Human-readable label ("All Time", "November 2025")
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Time".to_string(),
            Self::Month { year, month } => format!("{} {}", month_name_en(*month), year),
        }
    }

    /// Whether a calendar date falls in this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    /// Formats: `all`, `2025-01`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        if year.len() != 4 {
            return Err(PeriodParseError::InvalidFormat(s.to_string()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::month(year, month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "Invalid period '{}'. Use 'all' or YYYY-MM", s)
            }
            Self::InvalidMonth(m) => write!(f, "Invalid month: {} (expected 1-12)", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

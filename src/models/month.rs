//! Calendar month representation
//!
//! A `SelectedMonth` always denotes the first day of a calendar month. It is
//! the unit that scopes income labels, expense date ranges and every summary.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve canonical month names, in calendar order
pub const MONTH_NAMES: [&str; 12] = [
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

/// Look up a month number (1-12) from its English name, ignoring case
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|idx| idx as u32 + 1)
}

/// A calendar month, normalized to its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectedMonth {
    first_day: NaiveDate,
}

impl SelectedMonth {
    /// Create a month from a year and a month number (1-12)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The month containing today (local time)
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// Parse a "MMMM yyyy" label such as "March 2026"
    pub fn parse_label(label: &str) -> Option<Self> {
        let (name, year) = label.trim().rsplit_once(' ')?;
        let month = month_number(name)?;
        let year: i32 = year.trim().parse().ok()?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day
            .pred_opt()
            .unwrap_or(self.first_day)
    }

    /// The English month name
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.first_day.month0() as usize]
    }

    /// The "MMMM yyyy" label stamped on incomes
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year())
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }

    pub fn next(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }
}

impl Default for SelectedMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SelectedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number("  march "), Some(3));
        assert_eq!(month_number("DECEMBER"), Some(12));
        assert_eq!(month_number("Smarch"), None);
    }

    #[test]
    fn test_containing_normalizes_to_first_day() {
        let month = SelectedMonth::containing(date(2025, 2, 17));
        assert_eq!(month.first_day(), date(2025, 2, 1));
    }

    #[test]
    fn test_last_day() {
        assert_eq!(SelectedMonth::new(2024, 2).unwrap().last_day(), date(2024, 2, 29));
        assert_eq!(SelectedMonth::new(2025, 2).unwrap().last_day(), date(2025, 2, 28));
        assert_eq!(SelectedMonth::new(2025, 12).unwrap().last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let month = SelectedMonth::new(2025, 4).unwrap();
        assert!(month.contains(date(2025, 4, 1)));
        assert!(month.contains(date(2025, 4, 30)));
        assert!(!month.contains(date(2025, 3, 31)));
        assert!(!month.contains(date(2025, 5, 1)));
    }

    #[test]
    fn test_label_round_trip() {
        let month = SelectedMonth::new(2026, 3).unwrap();
        assert_eq!(month.label(), "March 2026");
        assert_eq!(SelectedMonth::parse_label("March 2026"), Some(month));
        assert_eq!(SelectedMonth::parse_label("March"), None);
    }

    #[test]
    fn test_next_and_prev_wrap_years() {
        let december = SelectedMonth::new(2025, 12).unwrap();
        assert_eq!(december.next(), SelectedMonth::new(2026, 1).unwrap());
        assert_eq!(december.next().prev(), december);
    }

    #[test]
    fn test_invalid_month() {
        assert!(SelectedMonth::new(2025, 13).is_none());
        assert!(SelectedMonth::new(2025, 0).is_none());
    }
}

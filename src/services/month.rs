//! Month selector service
//!
//! Turns a month name picked by the user into a `SelectedMonth`, anchored to
//! an explicit reference year.

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::month::month_number;
use crate::models::SelectedMonth;

/// Service for month selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSelector {
    reference_year: i32,
}

impl MonthSelector {
    /// Create a selector for a fixed year
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Create a selector from the configured year policy
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.effective_year())
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Resolve a month name ("march", " March ") to the first day of that
    /// month in the reference year
    pub fn select(&self, label: &str) -> BudgetResult<SelectedMonth> {
        let month = month_number(label).ok_or_else(|| {
            BudgetError::Validation(format!("Unknown month: '{}'", label.trim()))
        })?;

        SelectedMonth::new(self.reference_year, month).ok_or_else(|| {
            BudgetError::Validation(format!(
                "Month out of range: {} {}",
                label.trim(),
                self.reference_year
            ))
        })
    }

    /// Resolve either a bare month name or a full "MMMM yyyy" label
    pub fn resolve(&self, input: &str) -> BudgetResult<SelectedMonth> {
        match SelectedMonth::parse_label(input) {
            Some(month) => Ok(month),
            None => self.select(input),
        }
    }

    /// The month containing today
    pub fn current(&self) -> SelectedMonth {
        SelectedMonth::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_select_is_first_of_month() {
        let selector = MonthSelector::new(2026);
        let march = selector.select("March").unwrap();

        assert_eq!(march.first_day(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(march.label(), "March 2026");
    }

    #[test]
    fn test_select_ignores_case_and_whitespace() {
        let selector = MonthSelector::new(2026);
        assert_eq!(
            selector.select("  february ").unwrap(),
            SelectedMonth::new(2026, 2).unwrap()
        );
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let selector = MonthSelector::new(2026);
        let err = selector.select("Smarch").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_resolve_accepts_full_label() {
        let selector = MonthSelector::new(2026);
        assert_eq!(
            selector.resolve("December 2025").unwrap(),
            SelectedMonth::new(2025, 12).unwrap()
        );
        assert_eq!(
            selector.resolve("June").unwrap(),
            SelectedMonth::new(2026, 6).unwrap()
        );
    }

    #[test]
    fn test_from_settings_uses_reference_year() {
        let settings = Settings {
            reference_year: Some(2024),
            ..Settings::default()
        };
        assert_eq!(MonthSelector::from_settings(&settings).reference_year(), 2024);
    }
}

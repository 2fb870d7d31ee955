//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths (i64) so that sums and differences
//! are exact. Display always uses two decimals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored in hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a record may carry (one trillion units)
    ///
    /// Keeps any realistic number of records summable without overflow.
    pub const MAX: Money = Money(100_000_000_000_000);

    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use budgetiq::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use budgetiq::models::Money;
    /// assert_eq!(Money::from_units(80000).cents(), 8_000_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the magnitude is at most [`Money::MAX`]
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0 as u64
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Amount as a floating point number, for spreadsheet cells
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "$10.50", "1,500", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix('₹')
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();
        let s: String = s.chars().filter(|c| *c != ',').collect();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());
        let out_of_range = || MoneyParseError::OutOfRange(original.to_string());

        let (whole, fraction) = s.split_once('.').unwrap_or((s.as_str(), ""));
        if fraction.contains('.') || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        // Pad or truncate to 2 digits
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(out_of_range)?;
        let amount = Self(if negative { -cents } else { cents });
        if !amount.is_within_limit() {
            return Err(out_of_range());
        }
        Ok(amount)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Saturates at the `i64` bounds instead of overflowing
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Self(acc.0.saturating_add(m.0)))
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount {} exceeds the maximum of {}", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(150000).to_string(), "150000.00");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "    0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(65000).format_with_symbol("₹"), "₹65000.00");
        assert_eq!(Money::from_cents(-250).format_with_symbol("₹"), "-₹2.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("80000").unwrap().cents(), 8_000_000);
        assert_eq!(Money::parse("1,500").unwrap().cents(), 150_000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("₹").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_parse_rejects_amounts_past_the_limit() {
        assert!(matches!(
            Money::parse("999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert_eq!(Money::parse("1000000000000").unwrap(), Money::MAX);
        assert!(Money::parse("1000000000000.01").is_err());
    }

    #[test]
    fn test_sum_of_large_amounts_does_not_panic() {
        let huge = [Money::from_cents(i64::MAX / 2 + 1); 2];
        let total: Money = huge.iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let capped = [Money::MAX; 2];
        assert_eq!(
            capped.iter().sum::<Money>(),
            Money::MAX.checked_add(Money::MAX).unwrap()
        );
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
    }
}

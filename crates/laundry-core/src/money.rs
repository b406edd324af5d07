//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! All amounts are kept in the smallest currency unit (`i64`). Prices per
//! kilogram, totals, payments and change never touch floating point, so a
//! receipt always adds up: `paid - total == change` exactly.
//!
//! ## Usage
//! ```rust
//! use laundry_core::money::Money;
//!
//! let price = Money::from_minor(700_000); // 7000.00
//! let paid = Money::from_minor(1_000_000);
//!
//! assert_eq!((paid - price).minor(), 300_000);
//! assert_eq!(price.to_string(), "7000.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Number of minor units in one major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// A monetary value in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use laundry_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(7000).minor(), 700_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Parses an operator-entered amount such as `"7000"` or `"7000.50"`.
    ///
    /// At most two decimal places are accepted. Thousands separators are not.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() || minor.len() > 2 {
            return None;
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let major: i64 = major.parse().ok()?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().ok()? * 10,
            _ => minor.parse().ok()?,
        };

        let value = major.checked_mul(MINOR_PER_MAJOR)?.checked_add(minor)?;
        Some(Money(if negative { -value } else { value }))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }
}

/// Renders `major.minor` with exactly two decimals; the currency symbol is
/// the front end's concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / MINOR_PER_MAJOR as u64,
            abs % MINOR_PER_MAJOR as u64
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(700_000).to_string(), "7000.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("7000"), Some(Money::from_major(7000)));
        assert_eq!(Money::parse(" 12.5 "), Some(Money::from_minor(1250)));
        assert_eq!(Money::parse("12.05"), Some(Money::from_minor(1205)));
        assert_eq!(Money::parse("-3.10"), Some(Money::from_minor(-310)));

        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse(".50"), None);
        assert_eq!(Money::parse("1.234"), None);
        assert_eq!(Money::parse("1,000"), None);
        assert_eq!(Money::parse("abc"), None);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(250);

        assert_eq!((a + b).minor(), 1250);
        assert_eq!((b - a).minor(), -750);
        assert!((b - a).is_negative());

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.minor(), 1500);
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_minor(1000);
        assert_eq!(a.checked_add(Money::from_minor(5)), Some(Money::from_minor(1005)));
        assert_eq!(a.checked_sub(Money::from_minor(5)), Some(Money::from_minor(995)));

        assert_eq!(Money::from_minor(i64::MAX).checked_add(Money::from_minor(1)), None);
        assert_eq!(Money::from_minor(i64::MIN).checked_sub(Money::from_minor(1)), None);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_minor(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}

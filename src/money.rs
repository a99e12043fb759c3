//! Fixed-point currency amounts with 2 decimal places.
//!
//! Uses `rust_decimal` internally with scale enforcement so fines add up
//! exactly and always print as `12.00`, never `12` or `11.999999`.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A currency amount that keeps exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use library_engine::Money;
///
/// let fine = Money::from_str("2").unwrap().checked_times(6).unwrap();
/// assert_eq!(fine.to_string(), "12.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates a new `Money` from a `Decimal`, normalizing to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Creates an amount from minor units, e.g. `from_cents(200)` is `2.00`.
    pub fn from_cents(cents: i64) -> Self {
        Money::new(Decimal::new(cents, Self::SCALE))
    }

    /// Multiplies the amount by a whole count (days, items, ...).
    ///
    /// Returns `None` if the product does not fit.
    pub fn checked_times(self, count: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(count)).map(Money::new)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money::new(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        assert_eq!(Money::from_str("1").unwrap().to_string(), "1.00");
        assert_eq!(Money::from_str("1.5").unwrap().to_string(), "1.50");
        assert_eq!(Money::from_str("  2.25  ").unwrap().to_string(), "2.25");
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(200).to_string(), "2.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_checked_times_and_sum() {
        let rate = Money::from_cents(200);
        assert_eq!(rate.checked_times(6).unwrap().to_string(), "12.00");
        assert!(rate.checked_times(0).unwrap().is_zero());

        let total: Money = [rate, rate.checked_times(2).unwrap(), Money::ZERO]
            .into_iter()
            .sum();
        assert_eq!(total.to_string(), "6.00");
    }

    #[test]
    fn test_checked_times_overflow() {
        let huge = Money::new(Decimal::MAX);
        assert!(huge.checked_times(2).is_none());
        assert!(Money::from_cents(200).checked_times(i64::MAX).is_some());
    }

    #[test]
    fn test_add_assign_preserves_scale() {
        let mut total = Money::ZERO;
        total += Money::from_str("0.5").unwrap();
        total += Money::from_str("1.25").unwrap();
        assert_eq!(total.to_string(), "1.75");
    }
}

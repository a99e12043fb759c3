//! Overdue fine policy.

use crate::error::{EngineError, Result};
use crate::money::Money;
use chrono::{DateTime, Utc};

/// Maps a loan's duration to the fine owed on return.
///
/// Loans of up to `grace_days` whole days are free; every whole day beyond
/// that costs `daily_rate`. Days are counted from the elapsed time between
/// the two instants, not from calendar fields, so timezone and DST shifts
/// never change the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinePolicy {
    /// Whole days a loan may run without a fine.
    pub grace_days: i64,

    /// Charge per whole day past the grace period.
    pub daily_rate: Money,
}

impl FinePolicy {
    pub const DEFAULT_GRACE_DAYS: i64 = 14;

    /// Creates a policy with the given grace period and daily rate.
    pub fn new(grace_days: i64, daily_rate: Money) -> Self {
        FinePolicy {
            grace_days,
            daily_rate,
        }
    }

    /// Whole days elapsed between `issued` and `returned`, truncated toward zero.
    pub fn elapsed_days(issued: DateTime<Utc>, returned: DateTime<Utc>) -> i64 {
        returned.signed_duration_since(issued).num_days()
    }

    /// Computes the fine for a loan issued at `issued` and returned at `returned`.
    ///
    /// Fails with [`EngineError::Overflow`] when an extreme grace period or
    /// rate pushes the day count or the amount out of range.
    pub fn fine(&self, issued: DateTime<Utc>, returned: DateTime<Utc>) -> Result<Money> {
        let days = Self::elapsed_days(issued, returned);
        if days <= self.grace_days {
            return Ok(Money::ZERO);
        }

        days.checked_sub(self.grace_days)
            .and_then(|over| self.daily_rate.checked_times(over))
            .ok_or(EngineError::Overflow { what: "fine" })
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        FinePolicy::new(Self::DEFAULT_GRACE_DAYS, Money::from_cents(200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_within_grace_period_is_free() {
        let policy = FinePolicy::default();
        let fine = policy.fine(issued(), issued() + Duration::days(10)).unwrap();
        assert!(fine.is_zero());
    }

    #[test]
    fn test_exactly_fourteen_days_is_not_overdue() {
        let policy = FinePolicy::default();
        let fine = policy.fine(issued(), issued() + Duration::days(14)).unwrap();
        assert!(fine.is_zero());
    }

    #[test]
    fn test_twenty_days_charges_six_days() {
        let policy = FinePolicy::default();
        let fine = policy.fine(issued(), issued() + Duration::days(20)).unwrap();
        assert_eq!(fine.to_string(), "12.00");
    }

    #[test]
    fn test_partial_days_are_truncated() {
        let policy = FinePolicy::default();
        let returned = issued() + Duration::days(15) + Duration::hours(23);
        assert_eq!(policy.fine(issued(), returned).unwrap().to_string(), "2.00");

        let just_short = issued() + Duration::days(15) - Duration::seconds(1);
        assert!(policy.fine(issued(), just_short).unwrap().is_zero());
    }

    #[test]
    fn test_return_before_issue_is_free() {
        let policy = FinePolicy::default();
        let fine = policy.fine(issued(), issued() - Duration::days(30)).unwrap();
        assert!(fine.is_zero());
    }

    #[test]
    fn test_custom_policy() {
        let policy = FinePolicy::new(7, Money::from_cents(50));
        let fine = policy.fine(issued(), issued() + Duration::days(10)).unwrap();
        assert_eq!(fine.to_string(), "1.50");
    }

    #[test]
    fn test_extreme_grace_period_errors_instead_of_overflowing() {
        let policy = FinePolicy::new(i64::MIN, Money::from_cents(200));
        let err = policy
            .fine(issued(), issued() + Duration::days(1))
            .unwrap_err();
        assert!(matches!(err, EngineError::Overflow { what: "fine" }));
    }

    #[test]
    fn test_extreme_rate_errors_instead_of_overflowing() {
        let rate = Money::new(rust_decimal::Decimal::MAX);
        let policy = FinePolicy::new(0, rate);
        let err = policy
            .fine(issued(), issued() + Duration::days(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::Overflow { .. }));
    }
}

//! Inclusive calendar-date range for a stay
//!
//! Pure value type. Validation takes "today" as an explicit argument so
//! callers (and tests) control the reference day; nothing here reads the
//! clock.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Maximum stay length in days, unless the caller overrides it.
pub const DEFAULT_MAX_STAY_DAYS: i64 = 30;

/// Inclusive `[start, end]` calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Validate the range against the given reference day.
    ///
    /// Fails with `InvalidRange` when start >= end, `PastDate` when the stay
    /// begins before `today`, and `RangeTooLong` when the span exceeds
    /// `max_days`.
    pub fn validate(&self, today: NaiveDate, max_days: i64) -> DomainResult<()> {
        if self.start >= self.end {
            return Err(DomainError::InvalidRange);
        }
        if self.start < today {
            return Err(DomainError::PastDate);
        }
        if self.num_days() > max_days {
            return Err(DomainError::RangeTooLong { max_days });
        }
        Ok(())
    }

    /// Span length in days (end - start).
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Inclusive-bounds overlap: `[s1,e1]` and `[s2,e2]` overlap iff
    /// `s1 <= e2 && s2 <= e1`.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether `day` falls inside the range (bounds included).
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn valid_range_passes() {
        let range = StayRange::new(d(2025, 12, 15), d(2025, 12, 17));
        assert!(range.validate(d(2025, 12, 1), DEFAULT_MAX_STAY_DAYS).is_ok());
    }

    #[test]
    fn start_not_before_end_is_invalid() {
        let range = StayRange::new(d(2025, 12, 17), d(2025, 12, 15));
        assert!(matches!(
            range.validate(d(2025, 12, 1), DEFAULT_MAX_STAY_DAYS),
            Err(DomainError::InvalidRange)
        ));

        let same_day = StayRange::new(d(2025, 12, 15), d(2025, 12, 15));
        assert!(matches!(
            same_day.validate(d(2025, 12, 1), DEFAULT_MAX_STAY_DAYS),
            Err(DomainError::InvalidRange)
        ));
    }

    #[test]
    fn past_start_is_rejected() {
        let range = StayRange::new(d(2025, 12, 15), d(2025, 12, 17));
        assert!(matches!(
            range.validate(d(2025, 12, 16), DEFAULT_MAX_STAY_DAYS),
            Err(DomainError::PastDate)
        ));
    }

    #[test]
    fn start_on_today_is_allowed() {
        let range = StayRange::new(d(2025, 12, 15), d(2025, 12, 17));
        assert!(range.validate(d(2025, 12, 15), DEFAULT_MAX_STAY_DAYS).is_ok());
    }

    #[test]
    fn over_thirty_days_is_too_long() {
        let range = StayRange::new(d(2025, 12, 1), d(2026, 1, 1));
        assert!(matches!(
            range.validate(d(2025, 11, 1), DEFAULT_MAX_STAY_DAYS),
            Err(DomainError::RangeTooLong { max_days: 30 })
        ));

        // Exactly 30 days is fine
        let range = StayRange::new(d(2025, 12, 1), d(2025, 12, 31));
        assert!(range.validate(d(2025, 11, 1), DEFAULT_MAX_STAY_DAYS).is_ok());
    }

    #[test]
    fn inclusive_overlap() {
        let a = StayRange::new(d(2025, 12, 15), d(2025, 12, 17));
        let b = StayRange::new(d(2025, 12, 17), d(2025, 12, 19));
        let c = StayRange::new(d(2025, 12, 18), d(2025, 12, 20));

        assert!(a.overlaps(&b)); // shared boundary day counts
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn contains_checks_bounds() {
        let range = StayRange::new(d(2025, 12, 15), d(2025, 12, 17));
        assert!(range.contains(d(2025, 12, 15)));
        assert!(range.contains(d(2025, 12, 17)));
        assert!(!range.contains(d(2025, 12, 18)));
    }
}

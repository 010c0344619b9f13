//! Booking conflict resolution
//!
//! Pure functions over a candidate range and the existing booking set.
//! Persistence and locking are the caller's responsibility.

use super::{Booking, StayRange};
use crate::domain::{DomainError, DomainResult};

/// One existing booking intersecting a candidate range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingStay {
    pub booking_id: String,
    pub user_name: String,
    pub stay: StayRange,
}

impl From<&Booking> for ConflictingStay {
    fn from(b: &Booking) -> Self {
        Self {
            booking_id: b.id.clone(),
            user_name: b.user_name.clone(),
            stay: b.stay,
        }
    }
}

/// Find all non-cancelled bookings whose inclusive span intersects
/// `candidate`, sorted by start date.
///
/// `exclude_id` removes one booking from consideration so the update path
/// does not conflict with itself. Cancelled bookings never conflict,
/// regardless of dates.
pub fn conflicting_stays(
    candidate: &StayRange,
    existing: &[Booking],
    exclude_id: Option<&str>,
) -> Vec<ConflictingStay> {
    let mut hits: Vec<ConflictingStay> = existing
        .iter()
        .filter(|b| !b.is_cancelled())
        .filter(|b| exclude_id != Some(b.id.as_str()))
        .filter(|b| b.stay.overlaps(candidate))
        .map(ConflictingStay::from)
        .collect();
    hits.sort_by_key(|c| c.stay.start);
    hits
}

/// Accept/reject decision for a candidate range.
pub fn check_no_conflict(
    candidate: &StayRange,
    existing: &[Booking],
    exclude_id: Option<&str>,
) -> DomainResult<()> {
    let conflicts = conflicting_stays(candidate, existing, exclude_id);
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Conflict(conflicts))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn booking(name: &str, start: NaiveDate, end: NaiveDate) -> Booking {
        Booking::new("user-x", name, StayRange::new(start, end), None)
    }

    #[test]
    fn overlapping_booking_is_reported() {
        let existing = vec![booking("Dana", d(2025, 12, 15), d(2025, 12, 17))];
        let candidate = StayRange::new(d(2025, 12, 16), d(2025, 12, 18));

        let err = check_no_conflict(&candidate, &existing, None).unwrap_err();
        match err {
            DomainError::Conflict(conflicts) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].user_name, "Dana");
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn disjoint_ranges_do_not_conflict() {
        let existing = vec![booking("Dana", d(2025, 12, 15), d(2025, 12, 17))];
        let candidate = StayRange::new(d(2025, 12, 18), d(2025, 12, 20));
        assert!(check_no_conflict(&candidate, &existing, None).is_ok());
    }

    #[test]
    fn cancelled_booking_never_conflicts() {
        let mut b = booking("Dana", d(2025, 12, 15), d(2025, 12, 17));
        b.cancel();
        let existing = vec![b];
        let candidate = StayRange::new(d(2025, 12, 15), d(2025, 12, 17));
        assert!(check_no_conflict(&candidate, &existing, None).is_ok());
    }

    #[test]
    fn update_path_excludes_self() {
        let b = booking("Dana", d(2025, 12, 15), d(2025, 12, 17));
        let id = b.id.clone();
        let existing = vec![b];
        let candidate = StayRange::new(d(2025, 12, 16), d(2025, 12, 19));

        assert!(check_no_conflict(&candidate, &existing, Some(&id)).is_ok());
        assert!(check_no_conflict(&candidate, &existing, None).is_err());
    }

    #[test]
    fn conflicts_sorted_by_start_date() {
        let existing = vec![
            booking("Omer", d(2025, 12, 20), d(2025, 12, 22)),
            booking("Dana", d(2025, 12, 15), d(2025, 12, 17)),
        ];
        let candidate = StayRange::new(d(2025, 12, 16), d(2025, 12, 21));

        let conflicts = conflicting_stays(&candidate, &existing, None);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].user_name, "Dana");
        assert_eq!(conflicts[1].user_name, "Omer");
    }

    #[test]
    fn shared_boundary_day_conflicts() {
        let existing = vec![booking("Dana", d(2025, 12, 15), d(2025, 12, 17))];
        let candidate = StayRange::new(d(2025, 12, 17), d(2025, 12, 19));
        assert!(check_no_conflict(&candidate, &existing, None).is_err());
    }
}

//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};

use super::StayRange;

/// Booking lifecycle state
///
/// Cancellation is a soft state transition; bookings are never physically
/// deleted. Cancelled bookings are excluded from conflict checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    /// Booking holds its date range on the calendar
    Active,
    /// Booking cancelled by the owner
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A date-range claim on the shared house by one user
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: String,
    /// Owner user ID
    pub user_id: String,
    /// Owner display name (denormalized for conflict messages and lists)
    pub user_name: String,
    /// Inclusive stay dates
    pub stay: StayRange,
    /// Free-text notes
    pub notes: Option<String>,
    /// Current lifecycle state
    pub status: BookingStatus,
    /// Exit checklist submitted for this stay
    pub checklist_completed: bool,
    /// Linked exit checklist, once submitted
    pub checklist_id: Option<String>,
    /// Exit reminder already dispatched for the final day
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        stay: StayRange,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            stay,
            notes,
            status: BookingStatus::Active,
            checklist_completed: false,
            checklist_id: None,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Cancel this booking. Idempotent.
    pub fn cancel(&mut self) {
        if self.status != BookingStatus::Cancelled {
            self.status = BookingStatus::Cancelled;
            self.touch();
        }
    }

    /// Link a submitted exit checklist
    pub fn mark_checklist_completed(&mut self, checklist_id: impl Into<String>) {
        self.checklist_completed = true;
        self.checklist_id = Some(checklist_id.into());
        self.touch();
    }

    /// Record that the final-day exit reminder was dispatched
    pub fn mark_reminder_sent(&mut self) {
        self.reminder_sent = true;
        self.touch();
    }

    /// Move the stay to a new range (update path; conflict check is the
    /// caller's job)
    pub fn reschedule(&mut self, stay: StayRange) {
        self.stay = stay;
        self.touch();
    }

    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        !self.is_cancelled() && self.stay.contains(day)
    }

    pub fn ends_on(&self, day: NaiveDate) -> bool {
        !self.is_cancelled() && self.stay.end == day
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
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

    fn sample_booking() -> Booking {
        Booking::new(
            "user-1",
            "Dana",
            StayRange::new(d(2025, 12, 15), d(2025, 12, 17)),
            Some("family weekend".into()),
        )
    }

    #[test]
    fn new_booking_has_soft_defaults() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Active);
        assert!(!b.checklist_completed);
        assert!(!b.reminder_sent);
        assert!(b.checklist_id.is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut b = sample_booking();
        b.cancel();
        assert!(b.is_cancelled());
        let stamped = b.updated_at;

        b.cancel();
        assert!(b.is_cancelled());
        assert_eq!(b.updated_at, stamped);
    }

    #[test]
    fn checklist_linkage() {
        let mut b = sample_booking();
        b.mark_checklist_completed("cl-9");
        assert!(b.checklist_completed);
        assert_eq!(b.checklist_id.as_deref(), Some("cl-9"));
    }

    #[test]
    fn ends_on_ignores_cancelled() {
        let mut b = sample_booking();
        assert!(b.ends_on(d(2025, 12, 17)));
        b.cancel();
        assert!(!b.ends_on(d(2025, 12, 17)));
    }

    #[test]
    fn active_on_covers_full_span() {
        let b = sample_booking();
        assert!(b.is_active_on(d(2025, 12, 15)));
        assert!(b.is_active_on(d(2025, 12, 16)));
        assert!(b.is_active_on(d(2025, 12, 17)));
        assert!(!b.is_active_on(d(2025, 12, 18)));
    }

    #[test]
    fn status_roundtrip() {
        for status in &[BookingStatus::Active, BookingStatus::Cancelled] {
            assert_eq!(&BookingStatus::from_str(status.as_str()), status);
        }
    }
}

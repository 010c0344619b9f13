//! Booking service
//!
//! Validates stay ranges, resolves conflicts against the live calendar and
//! drives the booking lifecycle. The conflict check and the insert run under
//! one async mutex so two in-process requests for overlapping dates cannot
//! both pass the check; a multi-process deployment additionally needs a
//! transactional write at the store.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use metrics::counter;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::booking::{
    check_no_conflict, conflicting_stays, Booking, ConflictingStay, StayRange,
    DEFAULT_MAX_STAY_DAYS,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::notifications::events::BookingEvent;
use crate::notifications::{Event, SharedEventBus};

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
    max_stay_days: i64,
    // Serializes conflict-check + write (see module docs)
    calendar_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self {
            repos,
            events,
            max_stay_days: DEFAULT_MAX_STAY_DAYS,
            calendar_lock: Mutex::new(()),
        }
    }

    pub fn with_max_stay_days(mut self, max_stay_days: i64) -> Self {
        self.max_stay_days = max_stay_days;
        self
    }

    /// Create a booking for the given user.
    ///
    /// Fails with `InvalidRange` / `PastDate` / `RangeTooLong` on a bad
    /// range, `NotFound` when the user does not exist, and `Conflict` naming
    /// every intersecting stay otherwise.
    pub async fn create_booking(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        notes: Option<String>,
    ) -> DomainResult<Booking> {
        let stay = StayRange::new(start, end);
        stay.validate(Utc::now().date_naive(), self.max_stay_days)?;

        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let _guard = self.calendar_lock.lock().await;

        let existing = self.repos.bookings().find_active().await?;
        check_no_conflict(&stay, &existing, None)?;

        let booking = Booking::new(&user.id, &user.name, stay, notes);
        self.repos.bookings().save(booking.clone()).await?;

        counter!("homeshare_bookings_created_total").increment(1);
        info!(
            booking_id = %booking.id,
            user_id = %user.id,
            stay = %booking.stay,
            "Booking created"
        );

        self.events.publish(Event::BookingCreated(BookingEvent {
            booking_id: booking.id.clone(),
            user_id: booking.user_id.clone(),
            user_name: booking.user_name.clone(),
            start_date: booking.stay.start,
            end_date: booking.stay.end,
            timestamp: Utc::now(),
        }));

        Ok(booking)
    }

    /// Move an existing booking to a new range, re-running the conflict
    /// check with the booking itself excluded so it cannot collide with its
    /// own old dates.
    pub async fn update_booking_dates(
        &self,
        booking_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Booking> {
        let stay = StayRange::new(start, end);
        stay.validate(Utc::now().date_naive(), self.max_stay_days)?;

        let mut booking = self.get_booking(booking_id).await?;
        if booking.is_cancelled() {
            return Err(DomainError::Validation(
                "Cannot reschedule a cancelled booking".into(),
            ));
        }

        let _guard = self.calendar_lock.lock().await;

        let existing = self.repos.bookings().find_active().await?;
        check_no_conflict(&stay, &existing, Some(booking_id))?;

        booking.reschedule(stay);
        self.repos.bookings().update(booking.clone()).await?;
        info!(booking_id, stay = %booking.stay, "Booking rescheduled");
        Ok(booking)
    }

    /// Cancel a booking. Cancelling an already-cancelled booking is a no-op
    /// returning the same cancelled state.
    pub async fn cancel_booking(&self, booking_id: &str) -> DomainResult<Booking> {
        let mut booking = self.get_booking(booking_id).await?;
        if booking.is_cancelled() {
            return Ok(booking);
        }

        booking.cancel();
        self.repos.bookings().update(booking.clone()).await?;

        counter!("homeshare_bookings_cancelled_total").increment(1);
        info!(booking_id, "Booking cancelled");

        self.events.publish(Event::BookingCancelled(BookingEvent {
            booking_id: booking.id.clone(),
            user_id: booking.user_id.clone(),
            user_name: booking.user_name.clone(),
            start_date: booking.stay.start,
            end_date: booking.stay.end,
            timestamp: Utc::now(),
        }));

        Ok(booking)
    }

    pub async fn get_booking(&self, booking_id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))
    }

    /// Bookings, optionally filtered by owner, sorted by start date
    pub async fn list_bookings(&self, user_id: Option<&str>) -> DomainResult<Vec<Booking>> {
        match user_id {
            Some(uid) => self.repos.bookings().find_for_user(uid).await,
            None => self.repos.bookings().find_all().await,
        }
    }

    /// Which stays would the given range collide with right now
    pub async fn find_conflicts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_booking_id: Option<&str>,
    ) -> DomainResult<Vec<ConflictingStay>> {
        let candidate = StayRange::new(start, end);
        let existing = self.repos.bookings().find_active().await?;
        Ok(conflicting_stays(&candidate, &existing, exclude_booking_id))
    }

    /// Non-cancelled bookings whose span covers `today`
    pub async fn today_bookings(&self, today: NaiveDate) -> DomainResult<Vec<Booking>> {
        let all = self.repos.bookings().find_active().await?;
        Ok(all.into_iter().filter(|b| b.is_active_on(today)).collect())
    }

    /// Non-cancelled bookings starting within the next `days` days
    pub async fn upcoming_bookings(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> DomainResult<Vec<Booking>> {
        let horizon = today + chrono::Duration::days(days);
        let all = self.repos.bookings().find_active().await?;
        Ok(all
            .into_iter()
            .filter(|b| b.stay.start >= today && b.stay.start <= horizon)
            .collect())
    }

    /// Link a submitted exit checklist to its booking
    pub async fn mark_exit_checklist_completed(
        &self,
        booking_id: &str,
        checklist_id: &str,
    ) -> DomainResult<()> {
        let mut booking = self.get_booking(booking_id).await?;
        booking.mark_checklist_completed(checklist_id);
        self.repos.bookings().update(booking).await?;
        info!(booking_id, checklist_id, "Exit checklist linked to booking");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::notifications::create_event_bus;
    use chrono::Duration;

    async fn service_with_user() -> (BookingService, String) {
        let store = Arc::new(InMemoryStore::new());
        let user = User::new("dana@example.com", "Dana");
        let user_id = user.id.clone();
        store.users().save(user).await.unwrap();

        let service = BookingService::new(store, create_event_bus());
        (service, user_id)
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[tokio::test]
    async fn create_and_conflict_and_rebook_after_cancel() {
        let (service, user_a) = service_with_user().await;

        let start = today() + Duration::days(10);
        let end = start + Duration::days(2);

        // User A books first
        let booking_a = service
            .create_booking(&user_a, start, end, None)
            .await
            .unwrap();

        // Overlapping range is rejected, naming A's span
        let err = service
            .create_booking(&user_a, start + Duration::days(1), end + Duration::days(1), None)
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict(conflicts) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].user_name, "Dana");
                assert_eq!(conflicts[0].stay, booking_a.stay);
            }
            other => panic!("expected Conflict, got {:?}", other),
        }

        // After cancelling A, the same range is free again
        service.cancel_booking(&booking_a.id).await.unwrap();
        service
            .create_booking(&user_a, start + Duration::days(1), end + Duration::days(1), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_ranges_are_rejected_before_any_write() {
        let (service, user) = service_with_user().await;

        let t = today();
        assert!(matches!(
            service.create_booking(&user, t + Duration::days(3), t + Duration::days(3), None).await,
            Err(DomainError::InvalidRange)
        ));
        assert!(matches!(
            service.create_booking(&user, t - Duration::days(1), t + Duration::days(1), None).await,
            Err(DomainError::PastDate)
        ));
        assert!(matches!(
            service.create_booking(&user, t + Duration::days(1), t + Duration::days(40), None).await,
            Err(DomainError::RangeTooLong { .. })
        ));
        assert!(service.list_bookings(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (service, _) = service_with_user().await;
        let t = today();
        assert!(matches!(
            service
                .create_booking("ghost", t + Duration::days(1), t + Duration::days(2), None)
                .await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let (service, user) = service_with_user().await;
        let t = today();
        let booking = service
            .create_booking(&user, t + Duration::days(1), t + Duration::days(3), None)
            .await
            .unwrap();

        let first = service.cancel_booking(&booking.id).await.unwrap();
        assert!(first.is_cancelled());

        let second = service.cancel_booking(&booking.id).await.unwrap();
        assert!(second.is_cancelled());
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn update_does_not_conflict_with_itself() {
        let (service, user) = service_with_user().await;
        let t = today();
        let booking = service
            .create_booking(&user, t + Duration::days(5), t + Duration::days(8), None)
            .await
            .unwrap();

        // Shift by one day, overlapping its own old range
        let updated = service
            .update_booking_dates(&booking.id, t + Duration::days(6), t + Duration::days(9))
            .await
            .unwrap();
        assert_eq!(updated.stay.start, t + Duration::days(6));
    }

    #[tokio::test]
    async fn update_conflicts_with_other_bookings() {
        let (service, user) = service_with_user().await;
        let t = today();
        let first = service
            .create_booking(&user, t + Duration::days(5), t + Duration::days(8), None)
            .await
            .unwrap();
        let _second = service
            .create_booking(&user, t + Duration::days(10), t + Duration::days(12), None)
            .await
            .unwrap();

        let result = service
            .update_booking_dates(&first.id, t + Duration::days(9), t + Duration::days(11))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn today_and_upcoming_filters() {
        let (service, user) = service_with_user().await;
        let t = today();

        let current = service
            .create_booking(&user, t, t + Duration::days(2), None)
            .await
            .unwrap();
        let later = service
            .create_booking(&user, t + Duration::days(10), t + Duration::days(12), None)
            .await
            .unwrap();

        let todays = service.today_bookings(t).await.unwrap();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].id, current.id);

        let upcoming = service.upcoming_bookings(t, 30).await.unwrap();
        assert_eq!(upcoming.len(), 2);

        let near = service.upcoming_bookings(t, 5).await.unwrap();
        assert_eq!(near.len(), 1);
        assert_ne!(near[0].id, later.id);
    }
}

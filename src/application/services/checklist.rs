//! Checklist service
//!
//! Creates exit checklists, appends entries and drives the validated
//! submission. A submission also links the checklist to its booking; that
//! linkage is best-effort and must not undo an already-committed submission.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::checklist::{EntryCategory, ExitChecklist};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::notifications::events::ChecklistSubmittedEvent;
use crate::notifications::{Event, SharedEventBus};

pub struct ChecklistService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
}

impl ChecklistService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self { repos, events }
    }

    /// Create a checklist, optionally linked to a booking. Standalone
    /// checklists (no booking) are allowed.
    pub async fn create_checklist(
        &self,
        user_id: &str,
        booking_id: Option<String>,
    ) -> DomainResult<ExitChecklist> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        if let Some(ref bid) = booking_id {
            self.repos
                .bookings()
                .find_by_id(bid)
                .await?
                .ok_or_else(|| DomainError::not_found("Booking", "id", bid.clone()))?;
        }

        let checklist = ExitChecklist::new(&user.id, &user.name, booking_id);
        self.repos.checklists().save(checklist.clone()).await?;
        info!(checklist_id = %checklist.id, user_id, "Checklist created");
        Ok(checklist)
    }

    pub async fn get_checklist(&self, checklist_id: &str) -> DomainResult<ExitChecklist> {
        self.repos
            .checklists()
            .find_by_id(checklist_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Checklist", "id", checklist_id))
    }

    pub async fn list_checklists(&self, user_id: Option<&str>) -> DomainResult<Vec<ExitChecklist>> {
        match user_id {
            Some(uid) => self.repos.checklists().find_for_user(uid).await,
            None => self.repos.checklists().find_all().await,
        }
    }

    /// Append a text-or-photo entry. Notes are required; photos optional.
    pub async fn add_entry(
        &self,
        checklist_id: &str,
        category: EntryCategory,
        notes: &str,
        photo_url: Option<String>,
    ) -> DomainResult<ExitChecklist> {
        let mut checklist = self.get_checklist(checklist_id).await?;
        if checklist.is_complete {
            return Err(DomainError::Validation(
                "Cannot add entries to a submitted checklist".into(),
            ));
        }

        checklist.add_entry(category, notes, photo_url);
        self.repos.checklists().update(checklist.clone()).await?;
        Ok(checklist)
    }

    /// Validate and submit. On success marks the linked booking; a failure
    /// there is logged and does not fail the submission.
    pub async fn validate_and_submit(&self, checklist_id: &str) -> DomainResult<ExitChecklist> {
        let mut checklist = self.get_checklist(checklist_id).await?;
        let already_complete = checklist.is_complete;

        checklist.submit()?;
        if already_complete {
            return Ok(checklist);
        }
        self.repos.checklists().update(checklist.clone()).await?;

        if let Some(ref booking_id) = checklist.booking_id {
            match self.repos.bookings().find_by_id(booking_id).await {
                Ok(Some(mut booking)) => {
                    booking.mark_checklist_completed(&checklist.id);
                    if let Err(e) = self.repos.bookings().update(booking).await {
                        warn!(booking_id, error = %e, "Failed to link checklist to booking");
                    }
                }
                Ok(None) => warn!(booking_id, "Linked booking vanished before checklist linkage"),
                Err(e) => warn!(booking_id, error = %e, "Failed to load booking for linkage"),
            }
        }

        info!(checklist_id, "Checklist submitted");
        self.events
            .publish(Event::ChecklistSubmitted(ChecklistSubmittedEvent {
                checklist_id: checklist.id.clone(),
                user_id: checklist.user_id.clone(),
                user_name: checklist.user_name.clone(),
                booking_id: checklist.booking_id.clone(),
                timestamp: Utc::now(),
            }));

        Ok(checklist)
    }

    pub async fn incomplete_checklists(
        &self,
        user_id: Option<&str>,
    ) -> DomainResult<Vec<ExitChecklist>> {
        Ok(self
            .list_checklists(user_id)
            .await?
            .into_iter()
            .filter(|c| !c.is_complete)
            .collect())
    }

    /// Most recent checklists, newest first
    pub async fn recent_checklists(&self, limit: usize) -> DomainResult<Vec<ExitChecklist>> {
        let mut all = self.repos.checklists().find_all().await?;
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, StayRange};
    use crate::domain::user::User;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::notifications::create_event_bus;
    use chrono::{Duration, Utc};

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: ChecklistService,
        user_id: String,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let user = User::new("dana@example.com", "Dana");
        let user_id = user.id.clone();
        store.users().save(user).await.unwrap();

        let service = ChecklistService::new(store.clone(), create_event_bus());
        Fixture {
            store,
            service,
            user_id,
        }
    }

    async fn booking_for(fix: &Fixture) -> Booking {
        let start = Utc::now().date_naive() + Duration::days(1);
        let booking = Booking::new(
            &fix.user_id,
            "Dana",
            StayRange::new(start, start + Duration::days(2)),
            None,
        );
        fix.store.bookings().save(booking.clone()).await.unwrap();
        booking
    }

    #[tokio::test]
    async fn create_requires_existing_booking_when_linked() {
        let fix = fixture().await;
        assert!(matches!(
            fix.service
                .create_checklist(&fix.user_id, Some("ghost".into()))
                .await,
            Err(DomainError::NotFound { .. })
        ));

        // Standalone checklist is fine
        let cl = fix.service.create_checklist(&fix.user_id, None).await.unwrap();
        assert!(cl.booking_id.is_none());
    }

    #[tokio::test]
    async fn submit_incomplete_names_missing_category() {
        let fix = fixture().await;
        let cl = fix.service.create_checklist(&fix.user_id, None).await.unwrap();

        fix.service
            .add_entry(&cl.id, EntryCategory::Refrigerator, "shelves wiped", None)
            .await
            .unwrap();
        fix.service
            .add_entry(&cl.id, EntryCategory::Freezer, "emptied out", None)
            .await
            .unwrap();

        match fix.service.validate_and_submit(&cl.id).await {
            Err(DomainError::IncompleteCategory { category, .. }) => {
                assert_eq!(category, "closet")
            }
            other => panic!("expected IncompleteCategory, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn successful_submit_links_booking() {
        let fix = fixture().await;
        let booking = booking_for(&fix).await;
        let cl = fix
            .service
            .create_checklist(&fix.user_id, Some(booking.id.clone()))
            .await
            .unwrap();

        for (category, notes) in [
            (EntryCategory::Refrigerator, "shelves wiped"),
            (EntryCategory::Freezer, "emptied and defrosted"),
            (EntryCategory::Closet, "linens folded"),
        ] {
            fix.service
                .add_entry(&cl.id, category, notes, None)
                .await
                .unwrap();
        }

        let submitted = fix.service.validate_and_submit(&cl.id).await.unwrap();
        assert!(submitted.is_complete);

        let booking = fix
            .store
            .bookings()
            .find_by_id(&booking.id)
            .await
            .unwrap()
            .unwrap();
        assert!(booking.checklist_completed);
        assert_eq!(booking.checklist_id.as_deref(), Some(cl.id.as_str()));
    }

    #[tokio::test]
    async fn entries_rejected_after_submission() {
        let fix = fixture().await;
        let cl = fix.service.create_checklist(&fix.user_id, None).await.unwrap();
        for (category, notes) in [
            (EntryCategory::Refrigerator, "shelves wiped"),
            (EntryCategory::Freezer, "emptied and defrosted"),
            (EntryCategory::Closet, "linens folded"),
        ] {
            fix.service
                .add_entry(&cl.id, category, notes, None)
                .await
                .unwrap();
        }
        fix.service.validate_and_submit(&cl.id).await.unwrap();

        assert!(fix
            .service
            .add_entry(&cl.id, EntryCategory::General, "late note", None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn resubmit_is_a_no_op() {
        let fix = fixture().await;
        let cl = fix.service.create_checklist(&fix.user_id, None).await.unwrap();
        for (category, notes) in [
            (EntryCategory::Refrigerator, "shelves wiped"),
            (EntryCategory::Freezer, "emptied and defrosted"),
            (EntryCategory::Closet, "linens folded"),
        ] {
            fix.service
                .add_entry(&cl.id, category, notes, None)
                .await
                .unwrap();
        }
        let first = fix.service.validate_and_submit(&cl.id).await.unwrap();
        let second = fix.service.validate_and_submit(&cl.id).await.unwrap();
        assert_eq!(first.submitted_at, second.submitted_at);
    }
}

//! Maintenance service
//!
//! Issue reporting and the assignment/completion/reopen lifecycle.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::maintenance::{MaintenanceRequest, MaintenanceStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::notifications::events::{MaintenanceEvent, MaintenanceStatusEvent};
use crate::notifications::{Event, SharedEventBus};

pub struct MaintenanceService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
}

impl MaintenanceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self { repos, events }
    }

    /// Report a new issue. Field rules live on the model.
    pub async fn report(
        &self,
        reporter_id: &str,
        description: &str,
        location: &str,
        photo_urls: Vec<String>,
    ) -> DomainResult<MaintenanceRequest> {
        let reporter = self
            .repos
            .users()
            .find_by_id(reporter_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", reporter_id))?;

        let request = MaintenanceRequest::new(
            &reporter.id,
            &reporter.name,
            description,
            location,
            photo_urls,
        );
        request.validate()?;

        self.repos.maintenance().save(request.clone()).await?;
        info!(request_id = %request.id, location, "Maintenance request reported");

        self.events
            .publish(Event::MaintenanceReported(MaintenanceEvent {
                request_id: request.id.clone(),
                reporter_id: request.reporter_id.clone(),
                reporter_name: request.reporter_name.clone(),
                location: request.location.clone(),
                timestamp: Utc::now(),
            }));

        Ok(request)
    }

    pub async fn get_request(&self, request_id: &str) -> DomainResult<MaintenanceRequest> {
        self.repos
            .maintenance()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| DomainError::not_found("MaintenanceRequest", "id", request_id))
    }

    pub async fn list_requests(
        &self,
        status: Option<MaintenanceStatus>,
    ) -> DomainResult<Vec<MaintenanceRequest>> {
        match status {
            Some(s) => self.repos.maintenance().find_by_status(s).await,
            None => self.repos.maintenance().find_all().await,
        }
    }

    pub async fn assign(&self, request_id: &str, assignee_id: &str) -> DomainResult<MaintenanceRequest> {
        let assignee = self
            .repos
            .users()
            .find_by_id(assignee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", assignee_id))?;

        let mut request = self.get_request(request_id).await?;
        let old_status = request.status;
        request.assign_to(&assignee.id, &assignee.name)?;
        self.repos.maintenance().update(request.clone()).await?;

        self.publish_status_change(&request, old_status);
        Ok(request)
    }

    pub async fn complete(
        &self,
        request_id: &str,
        resolution_notes: &str,
        by_user_id: &str,
    ) -> DomainResult<MaintenanceRequest> {
        let by = self
            .repos
            .users()
            .find_by_id(by_user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", by_user_id))?;

        let mut request = self.get_request(request_id).await?;
        let old_status = request.status;
        request.complete(resolution_notes, &by.id, &by.name)?;
        self.repos.maintenance().update(request.clone()).await?;
        info!(request_id, "Maintenance request completed");

        self.publish_status_change(&request, old_status);
        Ok(request)
    }

    /// Mark a completed request as unfixed, sending it back to pending.
    pub async fn reopen(
        &self,
        request_id: &str,
        reason: &str,
        by_user_id: &str,
    ) -> DomainResult<MaintenanceRequest> {
        let by = self
            .repos
            .users()
            .find_by_id(by_user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", by_user_id))?;

        let mut request = self.get_request(request_id).await?;
        let old_status = request.status;
        request.reopen(reason, &by.id, &by.name)?;
        self.repos.maintenance().update(request.clone()).await?;
        info!(request_id, reason, "Maintenance request reopened");

        self.publish_status_change(&request, old_status);
        Ok(request)
    }

    pub async fn cancel(&self, request_id: &str) -> DomainResult<MaintenanceRequest> {
        let mut request = self.get_request(request_id).await?;
        let old_status = request.status;
        request.cancel()?;
        self.repos.maintenance().update(request.clone()).await?;

        self.publish_status_change(&request, old_status);
        Ok(request)
    }

    fn publish_status_change(&self, request: &MaintenanceRequest, old_status: MaintenanceStatus) {
        self.events
            .publish(Event::MaintenanceStatusChanged(MaintenanceStatusEvent {
                request_id: request.id.clone(),
                old_status: old_status.as_str().to_string(),
                new_status: request.status.as_str().to_string(),
                timestamp: Utc::now(),
            }));
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::notifications::create_event_bus;

    async fn fixture() -> (MaintenanceService, String, String) {
        let store = Arc::new(InMemoryStore::new());

        let reporter = User::new("dana@example.com", "Dana");
        let reporter_id = reporter.id.clone();
        store.users().save(reporter).await.unwrap();

        let fixer = User::new("avi@example.com", "Avi");
        let fixer_id = fixer.id.clone();
        store.users().save(fixer).await.unwrap();

        (
            MaintenanceService::new(store, create_event_bus()),
            reporter_id,
            fixer_id,
        )
    }

    #[tokio::test]
    async fn report_assign_complete_reopen_cycle() {
        let (svc, reporter, fixer) = fixture().await;

        let request = svc
            .report(&reporter, "Kitchen faucet is dripping constantly", "kitchen", vec![])
            .await
            .unwrap();
        assert_eq!(request.status, MaintenanceStatus::Pending);

        let request = svc.assign(&request.id, &fixer).await.unwrap();
        assert_eq!(request.status, MaintenanceStatus::InProgress);
        assert_eq!(request.assigned_to_name.as_deref(), Some("Avi"));

        let request = svc
            .complete(&request.id, "replaced the washer", &fixer)
            .await
            .unwrap();
        assert_eq!(request.status, MaintenanceStatus::Completed);
        assert_eq!(request.completed_by_name.as_deref(), Some("Avi"));

        let request = svc
            .reopen(&request.id, "still dripping", &reporter)
            .await
            .unwrap();
        assert_eq!(request.status, MaintenanceStatus::Pending);
        assert_eq!(request.reopened_by_name.as_deref(), Some("Dana"));
    }

    #[tokio::test]
    async fn report_rejects_short_description() {
        let (svc, reporter, _) = fixture().await;
        assert!(matches!(
            svc.report(&reporter, "broken", "kitchen", vec![]).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn status_filter_lists_only_matching() {
        let (svc, reporter, fixer) = fixture().await;

        let open = svc
            .report(&reporter, "Kitchen faucet is dripping constantly", "kitchen", vec![])
            .await
            .unwrap();
        let closed = svc
            .report(&reporter, "Shutter stuck on the second floor", "bedroom", vec![])
            .await
            .unwrap();
        svc.complete(&closed.id, "lubricated the rail", &fixer)
            .await
            .unwrap();

        let pending = svc
            .list_requests(Some(MaintenanceStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open.id);

        let completed = svc
            .list_requests(Some(MaintenanceStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, closed.id);
    }

    #[tokio::test]
    async fn reopen_requires_completed_state() {
        let (svc, reporter, _) = fixture().await;
        let request = svc
            .report(&reporter, "Kitchen faucet is dripping constantly", "kitchen", vec![])
            .await
            .unwrap();
        assert!(svc.reopen(&request.id, "nope", &reporter).await.is_err());
    }
}

//! Checklist repository interface

use async_trait::async_trait;

use super::model::ExitChecklist;
use crate::domain::DomainResult;

#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Save a new checklist (with any initial entries)
    async fn save(&self, checklist: ExitChecklist) -> DomainResult<()>;

    /// Find checklist by ID, entries included
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ExitChecklist>>;

    /// Find the checklist linked to a booking
    async fn find_by_booking(&self, booking_id: &str) -> DomainResult<Option<ExitChecklist>>;

    /// All checklists, newest first
    async fn find_all(&self) -> DomainResult<Vec<ExitChecklist>>;

    /// Checklists for one user, newest first
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<ExitChecklist>>;

    /// Update a checklist and replace its entry set
    async fn update(&self, checklist: ExitChecklist) -> DomainResult<()>;
}

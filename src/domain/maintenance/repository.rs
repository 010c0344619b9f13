//! Maintenance repository interface

use async_trait::async_trait;

use super::model::{MaintenanceRequest, MaintenanceStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Save a new maintenance request
    async fn save(&self, request: MaintenanceRequest) -> DomainResult<()>;

    /// Find request by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<MaintenanceRequest>>;

    /// Update an existing request
    async fn update(&self, request: MaintenanceRequest) -> DomainResult<()>;

    /// All requests, newest first
    async fn find_all(&self) -> DomainResult<Vec<MaintenanceRequest>>;

    /// Requests in one status, newest first
    async fn find_by_status(&self, status: MaintenanceStatus)
        -> DomainResult<Vec<MaintenanceRequest>>;
}

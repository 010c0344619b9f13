//! Maintenance DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::maintenance::MaintenanceRequest;

/// Request to report a maintenance issue
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceRequest {
    /// What is broken
    #[validate(length(min = 10, max = 2000))]
    pub description: String,
    /// Where in the house
    #[validate(length(min = 2, max = 200))]
    pub location: String,
    /// Up to five photo URLs
    #[validate(length(max = 5))]
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Request to assign an issue to a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRequest {
    /// Assignee user ID
    #[validate(length(min = 1))]
    pub user_id: String,
}

/// Request to complete an issue
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteRequest {
    /// How the issue was resolved
    #[validate(length(min = 5, max = 2000))]
    pub resolution_notes: String,
}

/// Request to reopen a completed issue
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReopenRequest {
    /// Why the fix did not hold
    #[validate(length(min = 1, max = 2000))]
    pub reason: String,
}

/// Maintenance request details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceDto {
    pub id: String,
    pub reporter_id: String,
    pub reporter_name: String,
    pub description: String,
    pub location: String,
    pub photo_urls: Vec<String>,
    pub status: String,
    pub assigned_to_id: Option<String>,
    pub assigned_to_name: Option<String>,
    pub resolution_notes: Option<String>,
    pub resolution_date: Option<String>,
    pub completed_by_name: Option<String>,
    pub reopen_reason: Option<String>,
    pub reopened_by_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&MaintenanceRequest> for MaintenanceDto {
    fn from(r: &MaintenanceRequest) -> Self {
        Self {
            id: r.id.clone(),
            reporter_id: r.reporter_id.clone(),
            reporter_name: r.reporter_name.clone(),
            description: r.description.clone(),
            location: r.location.clone(),
            photo_urls: r.photo_urls.clone(),
            status: r.status.as_str().to_string(),
            assigned_to_id: r.assigned_to_id.clone(),
            assigned_to_name: r.assigned_to_name.clone(),
            resolution_notes: r.resolution_notes.clone(),
            resolution_date: r.resolution_date.map(|t| t.to_rfc3339()),
            completed_by_name: r.completed_by_name.clone(),
            reopen_reason: r.reopen_reason.clone(),
            reopened_by_name: r.reopened_by_name.clone(),
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing maintenance requests
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListMaintenanceParams {
    /// Restrict to one status: pending, in_progress, completed, cancelled
    pub status: Option<String>,
}

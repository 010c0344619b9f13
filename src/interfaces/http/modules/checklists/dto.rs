//! Checklist DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::checklist::{ChecklistEntry, ExitChecklist};

/// Request to create an exit checklist
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChecklistRequest {
    /// Booking this checklist belongs to; omit for a standalone checklist
    pub booking_id: Option<String>,
}

/// Request to append an entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddEntryRequest {
    /// Category: refrigerator, freezer, closet, general
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    /// Notes about the entry (photos are optional, notes are not)
    #[validate(length(min = 1, max = 2000))]
    pub notes: String,
    /// URL of an uploaded photo
    pub photo_url: Option<String>,
}

/// Checklist entry in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistEntryDto {
    pub category: String,
    pub notes: String,
    pub photo_url: Option<String>,
    pub position: u32,
    pub created_at: String,
}

impl From<&ChecklistEntry> for ChecklistEntryDto {
    fn from(e: &ChecklistEntry) -> Self {
        Self {
            category: e.category.as_str().to_string(),
            notes: e.notes.clone(),
            photo_url: e.photo_url.clone(),
            position: e.position,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

/// Checklist details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub booking_id: Option<String>,
    pub entries: Vec<ChecklistEntryDto>,
    pub important_notes: Option<String>,
    pub is_complete: bool,
    pub submitted_at: Option<String>,
    pub created_at: String,
}

impl From<&ExitChecklist> for ChecklistDto {
    fn from(c: &ExitChecklist) -> Self {
        Self {
            id: c.id.clone(),
            user_id: c.user_id.clone(),
            user_name: c.user_name.clone(),
            booking_id: c.booking_id.clone(),
            entries: c.entries.iter().map(ChecklistEntryDto::from).collect(),
            important_notes: c.important_notes.clone(),
            is_complete: c.is_complete,
            submitted_at: c.submitted_at.map(|t| t.to_rfc3339()),
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing checklists
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListChecklistsParams {
    /// Restrict to one user's checklists
    pub user_id: Option<String>,
}

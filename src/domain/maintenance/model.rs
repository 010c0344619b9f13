//! Maintenance request domain entity

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Maximum photos attached to one request
pub const MAX_PHOTOS: usize = 5;

/// Maintenance request status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A maintenance issue reported for the house
#[derive(Debug, Clone)]
pub struct MaintenanceRequest {
    pub id: String,
    pub reporter_id: String,
    pub reporter_name: String,
    pub description: String,
    pub location: String,
    pub photo_urls: Vec<String>,
    pub status: MaintenanceStatus,

    pub assigned_to_id: Option<String>,
    pub assigned_to_name: Option<String>,

    pub resolution_notes: Option<String>,
    pub resolution_date: Option<DateTime<Utc>>,
    pub completed_by_id: Option<String>,
    pub completed_by_name: Option<String>,

    pub reopen_reason: Option<String>,
    pub reopened_by_id: Option<String>,
    pub reopened_by_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn new(
        reporter_id: impl Into<String>,
        reporter_name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        photo_urls: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            reporter_id: reporter_id.into(),
            reporter_name: reporter_name.into(),
            description: description.into(),
            location: location.into(),
            photo_urls,
            status: MaintenanceStatus::Pending,
            assigned_to_id: None,
            assigned_to_name: None,
            resolution_notes: None,
            resolution_date: None,
            completed_by_id: None,
            completed_by_name: None,
            reopen_reason: None,
            reopened_by_id: None,
            reopened_by_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.description.trim().len() < 10 {
            return Err(DomainError::Validation(
                "Description must be at least 10 characters".into(),
            ));
        }
        if self.location.trim().len() < 2 {
            return Err(DomainError::Validation("Location must be specified".into()));
        }
        if self.photo_urls.len() > MAX_PHOTOS {
            return Err(DomainError::Validation(format!(
                "Maximum {} photos allowed",
                MAX_PHOTOS
            )));
        }
        Ok(())
    }

    /// Assign to a user: pending -> in_progress
    pub fn assign_to(
        &mut self,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> DomainResult<()> {
        match self.status {
            MaintenanceStatus::Pending | MaintenanceStatus::InProgress => {
                self.assigned_to_id = Some(user_id.into());
                self.assigned_to_name = Some(user_name.into());
                self.status = MaintenanceStatus::InProgress;
                self.touch();
                Ok(())
            }
            other => Err(DomainError::Validation(format!(
                "Cannot assign a {} request",
                other
            ))),
        }
    }

    /// Complete with resolution notes: pending/in_progress -> completed
    pub fn complete(
        &mut self,
        resolution_notes: impl Into<String>,
        by_id: impl Into<String>,
        by_name: impl Into<String>,
    ) -> DomainResult<()> {
        let notes = resolution_notes.into();
        if notes.trim().len() < 5 {
            return Err(DomainError::Validation(
                "Resolution notes must be provided".into(),
            ));
        }
        match self.status {
            MaintenanceStatus::Pending | MaintenanceStatus::InProgress => {
                self.status = MaintenanceStatus::Completed;
                self.resolution_notes = Some(notes);
                self.resolution_date = Some(Utc::now());
                self.completed_by_id = Some(by_id.into());
                self.completed_by_name = Some(by_name.into());
                self.touch();
                Ok(())
            }
            other => Err(DomainError::Validation(format!(
                "Cannot complete a {} request",
                other
            ))),
        }
    }

    /// Reopen a completed request (mark as unfixed): completed -> pending
    pub fn reopen(
        &mut self,
        reason: impl Into<String>,
        by_id: impl Into<String>,
        by_name: impl Into<String>,
    ) -> DomainResult<()> {
        if self.status != MaintenanceStatus::Completed {
            return Err(DomainError::Validation(format!(
                "Only completed requests can be reopened (status: {})",
                self.status
            )));
        }
        self.status = MaintenanceStatus::Pending;
        self.reopen_reason = Some(reason.into());
        self.reopened_by_id = Some(by_id.into());
        self.reopened_by_name = Some(by_name.into());
        self.touch();
        Ok(())
    }

    /// Cancel an open request
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            MaintenanceStatus::Pending | MaintenanceStatus::InProgress => {
                self.status = MaintenanceStatus::Cancelled;
                self.touch();
                Ok(())
            }
            other => Err(DomainError::Validation(format!(
                "Cannot cancel a {} request",
                other
            ))),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> MaintenanceRequest {
        MaintenanceRequest::new(
            "user-1",
            "Dana",
            "Kitchen faucet is dripping constantly",
            "kitchen",
            vec![],
        )
    }

    #[test]
    fn new_request_is_pending_and_valid() {
        let r = sample_request();
        assert_eq!(r.status, MaintenanceStatus::Pending);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn short_description_is_invalid() {
        let r = MaintenanceRequest::new("user-1", "Dana", "broken", "kitchen", vec![]);
        assert!(r.validate().is_err());
    }

    #[test]
    fn too_many_photos_is_invalid() {
        let photos = (0..6).map(|i| format!("https://p/{i}.jpg")).collect();
        let r = MaintenanceRequest::new(
            "user-1",
            "Dana",
            "Kitchen faucet is dripping constantly",
            "kitchen",
            photos,
        );
        assert!(r.validate().is_err());
    }

    #[test]
    fn lifecycle_pending_in_progress_completed_reopen() {
        let mut r = sample_request();

        r.assign_to("user-2", "Avi").unwrap();
        assert_eq!(r.status, MaintenanceStatus::InProgress);
        assert_eq!(r.assigned_to_name.as_deref(), Some("Avi"));

        r.complete("replaced the washer", "user-2", "Avi").unwrap();
        assert_eq!(r.status, MaintenanceStatus::Completed);
        assert!(r.resolution_date.is_some());

        r.reopen("still dripping", "user-1", "Dana").unwrap();
        assert_eq!(r.status, MaintenanceStatus::Pending);
        assert_eq!(r.reopen_reason.as_deref(), Some("still dripping"));
    }

    #[test]
    fn reopen_requires_completed() {
        let mut r = sample_request();
        assert!(r.reopen("nope", "user-1", "Dana").is_err());
    }

    #[test]
    fn complete_requires_resolution_notes() {
        let mut r = sample_request();
        assert!(r.complete("ok", "user-2", "Avi").is_err());
        assert_eq!(r.status, MaintenanceStatus::Pending);
    }

    #[test]
    fn cancelled_request_rejects_transitions() {
        let mut r = sample_request();
        r.cancel().unwrap();
        assert!(r.assign_to("user-2", "Avi").is_err());
        assert!(r.complete("replaced the washer", "user-2", "Avi").is_err());
    }
}

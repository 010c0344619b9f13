//! Domain error taxonomy
//!
//! All validation and state errors surface as [`DomainError`] variants so
//! callers can pattern-match instead of string-matching. Infrastructure
//! failures are carried separately in [`DomainError::Storage`] and are never
//! conflated with client-input errors.

use thiserror::Error;

use super::booking::ConflictingStay;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Stay end date is not after the start date
    #[error("End date must be after start date")]
    InvalidRange,

    /// Stay starts before the current calendar day
    #[error("Cannot create bookings for past dates")]
    PastDate,

    /// Stay exceeds the maximum allowed duration
    #[error("Booking duration cannot exceed {max_days} days")]
    RangeTooLong { max_days: i64 },

    /// Candidate stay intersects one or more existing bookings
    #[error("Booking conflicts with existing bookings: {}", conflict_summary(.0))]
    Conflict(Vec<ConflictingStay>),

    /// A required checklist category is missing or has too-short notes
    #[error("Checklist category '{category}' needs at least one entry with notes of {min_notes} or more characters")]
    IncompleteCategory {
        category: &'static str,
        min_notes: usize,
    },

    /// Login attempted from a device other than the bound one
    #[error("Device not authorized: user {user_id} is bound to another device")]
    DeviceNotAuthorized { user_id: String },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Persistence-collaborator failure (wrapped, possibly transient)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }
}

fn conflict_summary(conflicts: &[ConflictingStay]) -> String {
    conflicts
        .iter()
        .map(|c| format!("{} ({})", c.user_name, c.stay))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::StayRange;
    use chrono::NaiveDate;

    #[test]
    fn conflict_message_names_each_owner_and_span() {
        let err = DomainError::Conflict(vec![
            ConflictingStay {
                booking_id: "b1".into(),
                user_name: "Dana".into(),
                stay: StayRange::new(
                    NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 12, 17).unwrap(),
                ),
            },
            ConflictingStay {
                booking_id: "b2".into(),
                user_name: "Omer".into(),
                stay: StayRange::new(
                    NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 12, 22).unwrap(),
                ),
            },
        ]);

        let msg = err.to_string();
        assert!(msg.contains("Dana (2025-12-15 - 2025-12-17)"));
        assert!(msg.contains("Omer (2025-12-20 - 2025-12-22)"));
    }

    #[test]
    fn storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::PastDate.is_transient());
        assert!(!DomainError::not_found("Booking", "id", "x").is_transient());
    }
}

//! Common API types
//!
//! The response envelope, the validated JSON extractor and the mapping from
//! domain errors to HTTP responses.

mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response wrapper
///
/// Every REST endpoint returns data in this envelope. On success:
/// `{"success": true, "data": {...}}`; on error:
/// `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// HTTP status for each domain error variant. Callers expect to map each
/// named condition to a distinct user-facing message, so the variants are
/// never flattened into one code.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidRange
        | DomainError::PastDate
        | DomainError::RangeTooLong { .. }
        | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::IncompleteCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::DeviceNotAuthorized { .. } => StatusCode::FORBIDDEN,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to the `(status, envelope)` handler error arm.
/// Infrastructure failures are surfaced as a generic message, never with
/// their internals.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(&err);
    let message = match &err {
        DomainError::Storage(detail) => {
            tracing::error!(error = %detail, "Storage failure surfaced to API");
            "Operation failed, please try again".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_domain_error_has_a_distinct_client_status() {
        assert_eq!(status_for(&DomainError::InvalidRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&DomainError::PastDate), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&DomainError::Conflict(vec![])),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::IncompleteCategory {
                category: "closet",
                min_notes: 5
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&DomainError::DeviceNotAuthorized {
                user_id: "u".into()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DomainError::not_found("Booking", "id", "x")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let (status, Json(body)) =
            error_response::<EmptyData>(DomainError::Storage("connection refused".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.unwrap().contains("connection refused"));
    }
}

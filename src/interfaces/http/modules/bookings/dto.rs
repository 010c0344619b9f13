//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::booking::Booking;

/// Request to create a new booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Inclusive stay start (YYYY-MM-DD)
    #[validate(length(min = 10, max = 10))]
    pub start_date: String,
    /// Inclusive stay end (YYYY-MM-DD)
    #[validate(length(min = 10, max = 10))]
    pub end_date: String,
    /// Free-text notes
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Request to move a booking to new dates
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingDatesRequest {
    /// Inclusive stay start (YYYY-MM-DD)
    #[validate(length(min = 10, max = 10))]
    pub start_date: String,
    /// Inclusive stay end (YYYY-MM-DD)
    #[validate(length(min = 10, max = 10))]
    pub end_date: String,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub start_date: String,
    pub end_date: String,
    pub notes: Option<String>,
    pub status: String,
    pub checklist_completed: bool,
    pub checklist_id: Option<String>,
    pub reminder_sent: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Booking> for BookingDto {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id.clone(),
            user_id: b.user_id.clone(),
            user_name: b.user_name.clone(),
            start_date: b.stay.start.to_string(),
            end_date: b.stay.end.to_string(),
            notes: b.notes.clone(),
            status: b.status.as_str().to_string(),
            checklist_completed: b.checklist_completed,
            checklist_id: b.checklist_id.clone(),
            reminder_sent: b.reminder_sent,
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing bookings
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListBookingsParams {
    /// Restrict to one owner's bookings
    pub user_id: Option<String>,
}

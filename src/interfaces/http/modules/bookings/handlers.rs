//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;

use crate::application::BookingService;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub booking_service: Arc<BookingService>,
}

fn parse_date<T>(
    raw: &str,
    field: &str,
) -> Result<NaiveDate, (StatusCode, Json<ApiResponse<T>>)> {
    raw.parse::<NaiveDate>().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Invalid {} (expected YYYY-MM-DD): {}",
                field, e
            ))),
        )
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid date range"),
        (status = 409, description = "Dates conflict with existing bookings")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let start = parse_date(&request.start_date, "start_date")?;
    let end = parse_date(&request.end_date, "end_date")?;

    let notes = request
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let booking = state
        .booking_service
        .create_booking(&current.user_id, start, end, notes)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from(&booking))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(ListBookingsParams),
    responses(
        (status = 200, description = "Bookings sorted by start date", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    Query(params): Query<ListBookingsParams>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let bookings = state
        .booking_service
        .list_bookings(params.user_id.as_deref())
        .await
        .map_err(error_response)?;

    let dtos: Vec<BookingDto> = bookings.iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .booking_service
        .get_booking(&booking_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from(&booking))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}/dates",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    request_body = UpdateBookingDatesRequest,
    responses(
        (status = 200, description = "Booking rescheduled", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "New dates conflict with existing bookings")
    )
)]
pub async fn update_booking_dates(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateBookingDatesRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let start = parse_date(&request.start_date, "start_date")?;
    let end = parse_date(&request.end_date, "end_date")?;

    let booking = state
        .booking_service
        .update_booking_dates(&booking_id, start, end)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from(&booking))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Cancelled booking (idempotent)", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .booking_service
        .cancel_booking(&booking_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from(&booking))))
}

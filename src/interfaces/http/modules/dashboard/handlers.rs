//! Dashboard summary handler

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::{BookingService, ChecklistService, MaintenanceService};
use crate::domain::maintenance::MaintenanceStatus;
use crate::interfaces::http::common::{error_response, ApiResponse};
use crate::interfaces::http::modules::bookings::dto::BookingDto;
use crate::interfaces::http::modules::checklists::dto::ChecklistDto;

/// Application state for the dashboard.
#[derive(Clone)]
pub struct DashboardAppState {
    pub booking_service: Arc<BookingService>,
    pub checklist_service: Arc<ChecklistService>,
    pub maintenance_service: Arc<MaintenanceService>,
}

/// Aggregated view for the home screen
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Stays covering today
    pub current_bookings_count: usize,
    /// Next stays within 30 days, at most five
    pub upcoming_bookings: Vec<BookingDto>,
    /// Open maintenance issues
    pub pending_maintenance_count: usize,
    /// Latest checklists, at most five
    pub recent_checklists: Vec<ChecklistDto>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Home-screen summary", body = ApiResponse<DashboardSummary>)
    )
)]
pub async fn get_summary(
    State(state): State<DashboardAppState>,
) -> Result<Json<ApiResponse<DashboardSummary>>, (StatusCode, Json<ApiResponse<DashboardSummary>>)>
{
    let today = Utc::now().date_naive();

    let current = state
        .booking_service
        .today_bookings(today)
        .await
        .map_err(error_response)?;

    let mut upcoming = state
        .booking_service
        .upcoming_bookings(today, 30)
        .await
        .map_err(error_response)?;
    upcoming.truncate(5);

    let pending = state
        .maintenance_service
        .list_requests(Some(MaintenanceStatus::Pending))
        .await
        .map_err(error_response)?;

    let recent = state
        .checklist_service
        .recent_checklists(5)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(DashboardSummary {
        current_bookings_count: current.len(),
        upcoming_bookings: upcoming.iter().map(BookingDto::from).collect(),
        pending_maintenance_count: pending.len(),
        recent_checklists: recent.iter().map(ChecklistDto::from).collect(),
    })))
}

//! Maintenance HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::application::MaintenanceService;
use crate::domain::maintenance::MaintenanceStatus;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::*;

/// Application state for maintenance handlers.
#[derive(Clone)]
pub struct MaintenanceAppState {
    pub maintenance_service: Arc<MaintenanceService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 200, description = "Issue reported", body = ApiResponse<MaintenanceDto>),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn report_issue(
    State(state): State<MaintenanceAppState>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, (StatusCode, Json<ApiResponse<MaintenanceDto>>)> {
    let created = state
        .maintenance_service
        .report(
            &current.user_id,
            &request.description,
            &request.location,
            request.photo_urls,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MaintenanceDto::from(&created))))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenance",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    params(ListMaintenanceParams),
    responses(
        (status = 200, description = "Maintenance requests, newest first", body = ApiResponse<Vec<MaintenanceDto>>)
    )
)]
pub async fn list_issues(
    State(state): State<MaintenanceAppState>,
    Query(params): Query<ListMaintenanceParams>,
) -> Result<
    Json<ApiResponse<Vec<MaintenanceDto>>>,
    (StatusCode, Json<ApiResponse<Vec<MaintenanceDto>>>),
> {
    let status = params.status.as_deref().map(MaintenanceStatus::from_str);

    let requests = state
        .maintenance_service
        .list_requests(status)
        .await
        .map_err(error_response)?;

    let dtos: Vec<MaintenanceDto> = requests.iter().map(MaintenanceDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenance/{request_id}",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    params(("request_id" = String, Path, description = "Maintenance request ID")),
    responses(
        (status = 200, description = "Request details", body = ApiResponse<MaintenanceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_issue(
    State(state): State<MaintenanceAppState>,
    Path(request_id): Path<String>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, (StatusCode, Json<ApiResponse<MaintenanceDto>>)> {
    let request = state
        .maintenance_service
        .get_request(&request_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MaintenanceDto::from(&request))))
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance/{request_id}/assign",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    params(("request_id" = String, Path, description = "Maintenance request ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Request assigned", body = ApiResponse<MaintenanceDto>),
        (status = 400, description = "Request is not open"),
        (status = 404, description = "Not found")
    )
)]
pub async fn assign_issue(
    State(state): State<MaintenanceAppState>,
    Path(request_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AssignRequest>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, (StatusCode, Json<ApiResponse<MaintenanceDto>>)> {
    let updated = state
        .maintenance_service
        .assign(&request_id, &request.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MaintenanceDto::from(&updated))))
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance/{request_id}/complete",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    params(("request_id" = String, Path, description = "Maintenance request ID")),
    request_body = CompleteRequest,
    responses(
        (status = 200, description = "Request completed", body = ApiResponse<MaintenanceDto>),
        (status = 400, description = "Missing resolution notes or bad state"),
        (status = 404, description = "Not found")
    )
)]
pub async fn complete_issue(
    State(state): State<MaintenanceAppState>,
    Path(request_id): Path<String>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CompleteRequest>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, (StatusCode, Json<ApiResponse<MaintenanceDto>>)> {
    let updated = state
        .maintenance_service
        .complete(&request_id, &request.resolution_notes, &current.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MaintenanceDto::from(&updated))))
}

#[utoipa::path(
    post,
    path = "/api/v1/maintenance/{request_id}/reopen",
    tag = "Maintenance",
    security(("bearer_auth" = [])),
    params(("request_id" = String, Path, description = "Maintenance request ID")),
    request_body = ReopenRequest,
    responses(
        (status = 200, description = "Request reopened", body = ApiResponse<MaintenanceDto>),
        (status = 400, description = "Request is not completed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn reopen_issue(
    State(state): State<MaintenanceAppState>,
    Path(request_id): Path<String>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ReopenRequest>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, (StatusCode, Json<ApiResponse<MaintenanceDto>>)> {
    let updated = state
        .maintenance_service
        .reopen(&request_id, &request.reason, &current.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(MaintenanceDto::from(&updated))))
}

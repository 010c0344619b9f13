//! Checklist HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::application::ChecklistService;
use crate::domain::checklist::EntryCategory;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::*;

/// Application state for checklist handlers.
#[derive(Clone)]
pub struct ChecklistAppState {
    pub checklist_service: Arc<ChecklistService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/checklists",
    tag = "Checklists",
    security(("bearer_auth" = [])),
    request_body = CreateChecklistRequest,
    responses(
        (status = 200, description = "Checklist created", body = ApiResponse<ChecklistDto>),
        (status = 404, description = "Linked booking not found")
    )
)]
pub async fn create_checklist(
    State(state): State<ChecklistAppState>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateChecklistRequest>,
) -> Result<Json<ApiResponse<ChecklistDto>>, (StatusCode, Json<ApiResponse<ChecklistDto>>)> {
    let checklist = state
        .checklist_service
        .create_checklist(&current.user_id, request.booking_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ChecklistDto::from(&checklist))))
}

#[utoipa::path(
    get,
    path = "/api/v1/checklists",
    tag = "Checklists",
    security(("bearer_auth" = [])),
    params(ListChecklistsParams),
    responses(
        (status = 200, description = "Checklists, newest first", body = ApiResponse<Vec<ChecklistDto>>)
    )
)]
pub async fn list_checklists(
    State(state): State<ChecklistAppState>,
    Query(params): Query<ListChecklistsParams>,
) -> Result<
    Json<ApiResponse<Vec<ChecklistDto>>>,
    (StatusCode, Json<ApiResponse<Vec<ChecklistDto>>>),
> {
    let checklists = state
        .checklist_service
        .list_checklists(params.user_id.as_deref())
        .await
        .map_err(error_response)?;

    let dtos: Vec<ChecklistDto> = checklists.iter().map(ChecklistDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/checklists/{checklist_id}",
    tag = "Checklists",
    security(("bearer_auth" = [])),
    params(("checklist_id" = String, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist details", body = ApiResponse<ChecklistDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_checklist(
    State(state): State<ChecklistAppState>,
    Path(checklist_id): Path<String>,
) -> Result<Json<ApiResponse<ChecklistDto>>, (StatusCode, Json<ApiResponse<ChecklistDto>>)> {
    let checklist = state
        .checklist_service
        .get_checklist(&checklist_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ChecklistDto::from(&checklist))))
}

#[utoipa::path(
    post,
    path = "/api/v1/checklists/{checklist_id}/entries",
    tag = "Checklists",
    security(("bearer_auth" = [])),
    params(("checklist_id" = String, Path, description = "Checklist ID")),
    request_body = AddEntryRequest,
    responses(
        (status = 200, description = "Entry appended", body = ApiResponse<ChecklistDto>),
        (status = 400, description = "Checklist already submitted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn add_entry(
    State(state): State<ChecklistAppState>,
    Path(checklist_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddEntryRequest>,
) -> Result<Json<ApiResponse<ChecklistDto>>, (StatusCode, Json<ApiResponse<ChecklistDto>>)> {
    let category = EntryCategory::from_str(&request.category);

    let checklist = state
        .checklist_service
        .add_entry(&checklist_id, category, &request.notes, request.photo_url)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ChecklistDto::from(&checklist))))
}

#[utoipa::path(
    post,
    path = "/api/v1/checklists/{checklist_id}/submit",
    tag = "Checklists",
    security(("bearer_auth" = [])),
    params(("checklist_id" = String, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist submitted", body = ApiResponse<ChecklistDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "A required category is missing or has too-short notes")
    )
)]
pub async fn submit_checklist(
    State(state): State<ChecklistAppState>,
    Path(checklist_id): Path<String>,
) -> Result<Json<ApiResponse<ChecklistDto>>, (StatusCode, Json<ApiResponse<ChecklistDto>>)> {
    let checklist = state
        .checklist_service
        .validate_and_submit(&checklist_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ChecklistDto::from(&checklist))))
}

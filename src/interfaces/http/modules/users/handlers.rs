//! User HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

use super::dto::*;

/// Application state for user handlers.
#[derive(Clone)]
pub struct UserAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All family members", body = ApiResponse<Vec<UserDto>>)
    )
)]
pub async fn list_users(
    State(state): State<UserAppState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, (StatusCode, Json<ApiResponse<Vec<UserDto>>>)> {
    let users = state.repos.users().find_all().await.map_err(error_response)?;
    let dtos: Vec<UserDto> = users.iter().map(UserDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_me(
    State(state): State<UserAppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&current.user_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            error_response(DomainError::not_found("User", "id", current.user_id.clone()))
        })?;

    Ok(Json(ApiResponse::success(UserDto::from(&user))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid profile fields")
    )
)]
pub async fn update_me(
    State(state): State<UserAppState>,
    Extension(current): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let mut user = state
        .repos
        .users()
        .find_by_id(&current.user_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            error_response(DomainError::not_found("User", "id", current.user_id.clone()))
        })?;

    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(language) = request.preferred_language {
        user.preferred_language = language;
    }
    if let Some(token) = request.notification_token {
        user.notification_token = Some(token);
    }
    user.validate().map_err(error_response)?;
    user.touch();

    state
        .repos
        .users()
        .update_profile(user.clone())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(UserDto::from(&user))))
}

//! Auth HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::application::{AuthService, DeviceInfo};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{error_response, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::dto::UserDto;

use super::dto::*;

/// Application state for auth handlers.
#[derive(Clone)]
pub struct AuthAppState {
    pub auth_service: Arc<AuthService>,
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login result", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid identity token"),
        (status = 403, description = "Device not authorized")
    )
)]
pub async fn login(
    State(state): State<AuthAppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    let device = DeviceInfo {
        device_id: request.device_info.device_id,
        device_name: request.device_info.device_name,
        platform: request.device_info.platform,
    };

    let outcome = state
        .auth_service
        .login(&request.token, device)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        user: UserDto::from(&outcome.user),
        session_token: outcome.session_token,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<EmptyData>)
    )
)]
pub async fn logout(
    State(state): State<AuthAppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<EmptyData>> {
    state.auth_service.invalidate_session(&current.user_id);
    Json(ApiResponse::success(EmptyData {}))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session is valid", body = ApiResponse<VerifySessionResponse>),
        (status = 401, description = "Invalid session")
    )
)]
pub async fn verify_session(
    State(state): State<AuthAppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<
    Json<ApiResponse<VerifySessionResponse>>,
    (StatusCode, Json<ApiResponse<VerifySessionResponse>>),
> {
    let user = state
        .repos
        .users()
        .find_by_id(&current.user_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            error_response(DomainError::not_found("User", "id", current.user_id.clone()))
        })?;

    Ok(Json(ApiResponse::success(VerifySessionResponse {
        valid: true,
        user: UserDto::from(&user),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fresh session token", body = ApiResponse<RefreshResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn refresh_token(
    State(state): State<AuthAppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<RefreshResponse>>, (StatusCode, Json<ApiResponse<RefreshResponse>>)> {
    let session_token = state
        .auth_service
        .refresh_session(&current.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(RefreshResponse { session_token })))
}

//! Auth DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::interfaces::http::modules::users::dto::UserDto;

/// Device descriptor sent with a login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeviceInfoDto {
    /// Stable client-generated device identifier
    #[validate(length(min = 1, max = 200))]
    pub device_id: String,
    /// Human-readable device name
    #[validate(length(min = 1, max = 200))]
    pub device_name: String,
    /// Platform: ios, android, web
    #[validate(length(min = 1, max = 50))]
    pub platform: String,
}

/// Login request: identity-provider token plus device info
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Identity-provider token
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(nested)]
    pub device_info: DeviceInfoDto,
}

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserDto,
    pub session_token: String,
}

/// Session verification response
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifySessionResponse {
    pub valid: bool,
    pub user: UserDto,
}

/// Session refresh response
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub session_token: String,
}

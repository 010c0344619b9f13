//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{User, UserDevice};

/// Device details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceDto {
    pub device_id: String,
    pub device_name: String,
    pub platform: String,
    pub last_login: String,
    pub is_active: bool,
}

impl From<&UserDevice> for DeviceDto {
    fn from(d: &UserDevice) -> Self {
        Self {
            device_id: d.device_id.clone(),
            device_name: d.device_name.clone(),
            platform: d.platform.clone(),
            last_login: d.last_login.to_rfc3339(),
            is_active: d.is_active,
        }
    }
}

/// User details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub preferred_language: String,
    pub is_active: bool,
    pub current_device: Option<DeviceDto>,
    pub device_history: Vec<DeviceDto>,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role.as_str().to_string(),
            preferred_language: u.preferred_language.clone(),
            is_active: u.is_active,
            current_device: u.current_device.as_ref().map(DeviceDto::from),
            device_history: u.device_history.iter().map(DeviceDto::from).collect(),
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Request to update the caller's profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// Display name
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    /// Display language: en, he
    #[validate(length(min = 2, max = 2))]
    pub preferred_language: Option<String>,
    /// Push registration token
    pub notification_token: Option<String>,
}

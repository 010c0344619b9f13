//! User repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{User, UserDevice};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user
    async fn save(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Find user by identity-provider uid
    async fn find_by_auth_uid(&self, auth_uid: &str) -> DomainResult<Option<User>>;

    /// All users
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Update profile fields (name, language, role, flags, auth linkage).
    /// Device bindings are mutated through `bind_device` only.
    async fn update_profile(&self, user: User) -> DomainResult<()>;

    /// Bind a new current device: the existing current device (if any) is
    /// appended to history, the new one becomes current.
    async fn bind_device(&self, user_id: &str, device: UserDevice) -> DomainResult<()>;

    /// Refresh the current device's last-login stamp (same-device re-login)
    async fn touch_device_login(&self, user_id: &str, when: DateTime<Utc>) -> DomainResult<()>;
}

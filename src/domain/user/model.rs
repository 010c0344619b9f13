//! User domain entity
//!
//! Family members of the shared house. Carries the current-device binding
//! used by the single-device login guard, plus the append-only history of
//! superseded devices.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    FamilyMember,
    Maintenance,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FamilyMember => "family_member",
            Self::Maintenance => "maintenance",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "maintenance" => Self::Maintenance,
            "admin" => Self::Admin,
            _ => Self::FamilyMember,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A device associated with a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDevice {
    pub device_id: String,
    pub device_name: String,
    pub platform: String,
    pub last_login: DateTime<Utc>,
    /// False once the device has been superseded
    pub is_active: bool,
}

impl UserDevice {
    pub fn new(
        device_id: impl Into<String>,
        device_name: impl Into<String>,
        platform: impl Into<String>,
        last_login: DateTime<Utc>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            device_name: device_name.into(),
            platform: platform.into(),
            last_login,
            is_active: true,
        }
    }
}

/// A family member user
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Display language, "en" or "he"
    pub preferred_language: String,
    pub is_active: bool,
    /// Identity-provider uid, set on first login
    pub auth_uid: Option<String>,
    /// Push registration token, if the client registered one
    pub notification_token: Option<String>,
    /// The single device currently authorized to log in
    pub current_device: Option<UserDevice>,
    /// Superseded devices, append-only, oldest first
    pub device_history: Vec<UserDevice>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            role: UserRole::FamilyMember,
            preferred_language: "en".to_string(),
            is_active: true,
            auth_uid: None,
            notification_token: None,
            current_device: None,
            device_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if self.name.trim().len() < 2 {
            return Err(DomainError::Validation(
                "Name must be at least 2 characters".into(),
            ));
        }
        if !matches!(self.preferred_language.as_str(), "en" | "he") {
            return Err(DomainError::Validation(
                "Invalid language preference".into(),
            ));
        }
        Ok(())
    }

    /// Single-device guard predicate: true on first login, or when the
    /// presented device matches the bound one.
    pub fn can_login_from_device(&self, device_id: &str) -> bool {
        match &self.current_device {
            None => true,
            Some(current) => current.device_id == device_id,
        }
    }

    /// Bind a new current device, pushing the previous one (unmodified apart
    /// from its active flag) into history. History is never deduplicated, so
    /// returning to a previously-seen device still appends a fresh entry for
    /// the device being replaced.
    pub fn set_device(&mut self, device: UserDevice) {
        if let Some(mut current) = self.current_device.take() {
            current.is_active = false;
            self.device_history.push(current);
        }
        self.current_device = Some(device);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str) -> UserDevice {
        UserDevice::new(id, format!("{} phone", id), "ios", Utc::now())
    }

    #[test]
    fn first_login_from_any_device_is_allowed() {
        let user = User::new("dana@example.com", "Dana");
        assert!(user.can_login_from_device("dev-1"));
        assert!(user.can_login_from_device("dev-2"));
    }

    #[test]
    fn bound_device_matches_only_itself() {
        let mut user = User::new("dana@example.com", "Dana");
        user.set_device(device("dev-1"));
        assert!(user.can_login_from_device("dev-1"));
        assert!(!user.can_login_from_device("dev-2"));
    }

    #[test]
    fn superseded_device_moves_to_history() {
        let mut user = User::new("dana@example.com", "Dana");
        user.set_device(device("dev-1"));
        user.set_device(device("dev-2"));

        assert_eq!(user.current_device.as_ref().unwrap().device_id, "dev-2");
        assert_eq!(user.device_history.len(), 1);
        assert_eq!(user.device_history[0].device_id, "dev-1");
        assert!(!user.device_history[0].is_active);
    }

    #[test]
    fn history_is_append_only_without_dedup() {
        let mut user = User::new("dana@example.com", "Dana");
        user.set_device(device("dev-1"));
        user.set_device(device("dev-2"));
        user.set_device(device("dev-1")); // back to a previously-seen device

        let ids: Vec<&str> = user
            .device_history
            .iter()
            .map(|d| d.device_id.as_str())
            .collect();
        assert_eq!(ids, vec!["dev-1", "dev-2"]);
        assert_eq!(user.current_device.as_ref().unwrap().device_id, "dev-1");
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut user = User::new("not-an-email", "Dana");
        assert!(user.validate().is_err());

        user.email = "dana@example.com".into();
        user.name = "D".into();
        assert!(user.validate().is_err());

        user.name = "Dana".into();
        user.preferred_language = "fr".into();
        assert!(user.validate().is_err());

        user.preferred_language = "he".into();
        assert!(user.validate().is_ok());
    }
}

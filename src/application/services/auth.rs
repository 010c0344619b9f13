//! Authentication service
//!
//! Login flow: verify the identity-provider token, get or create the user,
//! run the single-device guard, bind the device and issue a session token.
//! The guard check and the device-binding write run under one async mutex,
//! mirroring the booking service's calendar lock.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::auth::{create_token, verify_token, Claims, IdentityVerifier, JwtConfig};
use crate::domain::user::{User, UserDevice};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::notifications::events::UserLoggedInEvent;
use crate::notifications::{Event, SharedEventBus};

/// Device descriptor presented at login
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub device_id: String,
    pub device_name: String,
    pub platform: String,
}

/// Successful login result
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub session_token: String,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    verifier: Arc<dyn IdentityVerifier>,
    jwt: JwtConfig,
    events: SharedEventBus,
    /// When false, a device mismatch is logged but login proceeds,
    /// reproducing the behavior of deployments that disable the
    /// single-device restriction.
    enforce_single_device: bool,
    bind_lock: Mutex<()>,
}

impl AuthService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        verifier: Arc<dyn IdentityVerifier>,
        jwt: JwtConfig,
        events: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            verifier,
            jwt,
            events,
            enforce_single_device: true,
            bind_lock: Mutex::new(()),
        }
    }

    pub fn with_single_device_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_single_device = enforce;
        self
    }

    /// Full login flow. Fails with `Unauthorized` on a bad identity token
    /// and `DeviceNotAuthorized` when the presented device differs from the
    /// bound one (and enforcement is on).
    pub async fn login(&self, identity_token: &str, device: DeviceInfo) -> DomainResult<LoginOutcome> {
        let identity = self.verifier.verify(identity_token).await?;

        let _guard = self.bind_lock.lock().await;

        let user = self.get_or_create_user(&identity.uid, &identity.email, identity.name).await?;

        if !user.can_login_from_device(&device.device_id) {
            if self.enforce_single_device {
                warn!(
                    user_id = %user.id,
                    current_device = %user.current_device.as_ref().map(|d| d.device_id.as_str()).unwrap_or("-"),
                    attempted_device = %device.device_id,
                    "Device authorization failed"
                );
                counter!("homeshare_logins_rejected_total").increment(1);
                return Err(DomainError::DeviceNotAuthorized {
                    user_id: user.id.clone(),
                });
            }
            warn!(
                user_id = %user.id,
                attempted_device = %device.device_id,
                "Device mismatch ignored: single-device enforcement is disabled"
            );
        }

        let now = Utc::now();
        let is_known_device = user
            .current_device
            .as_ref()
            .is_some_and(|d| d.device_id == device.device_id);

        if is_known_device {
            self.repos.users().touch_device_login(&user.id, now).await?;
        } else {
            self.repos
                .users()
                .bind_device(
                    &user.id,
                    UserDevice::new(&device.device_id, &device.device_name, &device.platform, now),
                )
                .await?;
        }

        // Reload so the outcome reflects the binding just written
        let user = self
            .repos
            .users()
            .find_by_id(&user.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user.id.clone()))?;

        let session_token = create_token(&user.id, &user.name, user.role.as_str(), &self.jwt)
            .map_err(|e| DomainError::Unauthorized(format!("Failed to issue session: {}", e)))?;

        counter!("homeshare_logins_total").increment(1);
        info!(user_id = %user.id, device_id = %device.device_id, "User logged in");

        self.events.publish(Event::UserLoggedIn(UserLoggedInEvent {
            user_id: user.id.clone(),
            device_id: device.device_id,
            platform: device.platform,
            timestamp: now,
        }));

        Ok(LoginOutcome {
            user,
            session_token,
        })
    }

    /// Single-device guard predicate, exposed for callers that check before
    /// mutating.
    pub fn can_authorize(&self, user: &User, device_id: &str) -> bool {
        user.can_login_from_device(device_id)
    }

    /// Bind a device directly (first login or explicit device migration).
    /// The previous current device is appended to history untouched.
    pub async fn bind_device(&self, user_id: &str, device: UserDevice) -> DomainResult<()> {
        let _guard = self.bind_lock.lock().await;
        self.repos.users().bind_device(user_id, device).await
    }

    /// Verify a session token and return its claims.
    pub fn verify_session(&self, token: &str) -> DomainResult<Claims> {
        let claims = verify_token(token, &self.jwt)
            .map_err(|_| DomainError::Unauthorized("Invalid session".into()))?;
        if claims.is_expired() {
            return Err(DomainError::Unauthorized("Session expired".into()));
        }
        Ok(claims)
    }

    /// Issue a fresh session token for an authenticated user.
    pub async fn refresh_session(&self, user_id: &str) -> DomainResult<String> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;
        create_token(&user.id, &user.name, user.role.as_str(), &self.jwt)
            .map_err(|e| DomainError::Unauthorized(format!("Failed to issue session: {}", e)))
    }

    /// Invalidate a session (logout). Stateless tokens cannot be revoked
    /// server-side without a denylist, so this only records the event.
    pub fn invalidate_session(&self, user_id: &str) {
        info!(user_id, "Session invalidated");
    }

    async fn get_or_create_user(
        &self,
        auth_uid: &str,
        email: &str,
        name: Option<String>,
    ) -> DomainResult<User> {
        if let Some(user) = self.repos.users().find_by_auth_uid(auth_uid).await? {
            return Ok(user);
        }

        // Pre-provisioned users are matched by email and linked on first login
        if let Some(mut user) = self.repos.users().find_by_email(email).await? {
            user.auth_uid = Some(auth_uid.to_string());
            user.touch();
            self.repos.users().update_profile(user.clone()).await?;
            return Ok(user);
        }

        let display_name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

        let mut user = User::new(email, display_name);
        user.auth_uid = Some(auth_uid.to_string());
        user.validate()?;
        self.repos.users().save(user.clone()).await?;
        info!(user_id = %user.id, email, "User created on first login");
        Ok(user)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::VerifiedIdentity;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::notifications::create_event_bus;
    use async_trait::async_trait;

    /// Verifier that accepts tokens of the form accepted by the fixture map
    struct StaticVerifier;

    #[async_trait]
    impl IdentityVerifier for StaticVerifier {
        async fn verify(&self, token: &str) -> DomainResult<VerifiedIdentity> {
            match token {
                "token-dana" => Ok(VerifiedIdentity {
                    uid: "uid-dana".into(),
                    email: "dana@example.com".into(),
                    name: Some("Dana".into()),
                }),
                _ => Err(DomainError::Unauthorized("Invalid identity token".into())),
            }
        }
    }

    fn device(id: &str) -> DeviceInfo {
        DeviceInfo {
            device_id: id.into(),
            device_name: format!("{} phone", id),
            platform: "ios".into(),
        }
    }

    fn service(enforce: bool) -> AuthService {
        let store = Arc::new(InMemoryStore::new());
        AuthService::new(
            store,
            Arc::new(StaticVerifier),
            JwtConfig::default(),
            create_event_bus(),
        )
        .with_single_device_enforcement(enforce)
    }

    #[tokio::test]
    async fn first_login_creates_user_and_binds_device() {
        let svc = service(true);

        let outcome = svc.login("token-dana", device("dev-1")).await.unwrap();
        assert_eq!(outcome.user.email, "dana@example.com");
        assert_eq!(outcome.user.name, "Dana");
        assert_eq!(
            outcome.user.current_device.as_ref().unwrap().device_id,
            "dev-1"
        );
        assert!(outcome.user.device_history.is_empty());

        let claims = svc.verify_session(&outcome.session_token).unwrap();
        assert_eq!(claims.sub, outcome.user.id);
    }

    #[tokio::test]
    async fn same_device_relogin_succeeds_without_history_entry() {
        let svc = service(true);
        svc.login("token-dana", device("dev-1")).await.unwrap();

        let outcome = svc.login("token-dana", device("dev-1")).await.unwrap();
        assert!(outcome.user.device_history.is_empty());
        assert_eq!(
            outcome.user.current_device.as_ref().unwrap().device_id,
            "dev-1"
        );
    }

    #[tokio::test]
    async fn different_device_is_rejected_when_enforced() {
        let svc = service(true);
        svc.login("token-dana", device("dev-1")).await.unwrap();

        let err = svc.login("token-dana", device("dev-2")).await.unwrap_err();
        assert!(matches!(err, DomainError::DeviceNotAuthorized { .. }));
    }

    #[tokio::test]
    async fn different_device_is_allowed_when_bypassed() {
        let svc = service(false);
        svc.login("token-dana", device("dev-1")).await.unwrap();

        let outcome = svc.login("token-dana", device("dev-2")).await.unwrap();
        assert_eq!(
            outcome.user.current_device.as_ref().unwrap().device_id,
            "dev-2"
        );
        // The replaced device landed in history unmodified
        assert_eq!(outcome.user.device_history.len(), 1);
        assert_eq!(outcome.user.device_history[0].device_id, "dev-1");
    }

    #[tokio::test]
    async fn bad_identity_token_is_unauthorized() {
        let svc = service(true);
        assert!(matches!(
            svc.login("garbage", device("dev-1")).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn refresh_issues_a_verifiable_token() {
        let svc = service(true);
        let outcome = svc.login("token-dana", device("dev-1")).await.unwrap();

        let token = svc.refresh_session(&outcome.user.id).await.unwrap();
        let claims = svc.verify_session(&token).unwrap();
        assert_eq!(claims.sub, outcome.user.id);
    }
}

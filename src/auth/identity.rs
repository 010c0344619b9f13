//! Identity-provider token verification
//!
//! Login requests carry a token minted by the external identity provider.
//! Verification is a collaborator concern behind [`IdentityVerifier`]; the
//! default implementation validates an HS256 JWT signed with the shared
//! secret configured for the provider.

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Identity established by the provider token
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// Provider-scoped uid
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an identity token and return the identity it asserts.
    async fn verify(&self, token: &str) -> DomainResult<VerifiedIdentity>;
}

/// Configuration for the JWT identity verifier
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    pub secret: String,
    pub issuer: String,
}

/// Claims asserted by the identity provider
#[derive(Debug, Serialize, Deserialize)]
struct IdentityClaims {
    sub: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
    exp: i64,
    iss: String,
}

/// HS256 verifier for provider-signed identity tokens
pub struct JwtIdentityVerifier {
    config: IdentityProviderConfig,
}

impl JwtIdentityVerifier {
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> DomainResult<VerifiedIdentity> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Identity token verification failed");
            DomainError::Unauthorized("Invalid identity token".into())
        })?;

        Ok(VerifiedIdentity {
            uid: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn config() -> IdentityProviderConfig {
        IdentityProviderConfig {
            secret: "provider-secret".into(),
            issuer: "identity-provider".into(),
        }
    }

    fn mint(secret: &str, issuer: &str) -> String {
        let claims = IdentityClaims {
            sub: "uid-1".into(),
            email: "dana@example.com".into(),
            name: Some("Dana".into()),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iss: issuer.into(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_yields_identity() {
        let verifier = JwtIdentityVerifier::new(config());
        let token = mint("provider-secret", "identity-provider");

        let identity = verifier.verify(&token).await.unwrap();
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email, "dana@example.com");
        assert_eq!(identity.name.as_deref(), Some("Dana"));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let verifier = JwtIdentityVerifier::new(config());
        let token = mint("other-secret", "identity-provider");

        assert!(matches!(
            verifier.verify(&token).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let verifier = JwtIdentityVerifier::new(config());
        let token = mint("provider-secret", "someone-else");
        assert!(verifier.verify(&token).await.is_err());
    }
}

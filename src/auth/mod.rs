//! Session tokens and identity-provider verification

pub mod identity;
pub mod jwt;

pub use identity::{
    IdentityProviderConfig, IdentityVerifier, JwtIdentityVerifier, VerifiedIdentity,
};
pub use jwt::{create_token, verify_token, Claims, JwtConfig};

//! Token verification.
//!
//! - [`TokenVerifier`] -- the seam to the identity provider: `verify(token)`
//!   either yields the token's [`Claims`] or an `InvalidToken` failure.
//! - [`jwt`] -- shared-secret HS256 verification and error classification.
//! - [`jwks`] -- RS256 verification against a remote key set.

use async_trait::async_trait;
use castlist_core::auth::{AuthFailure, Claims};

pub mod jwks;
pub mod jwt;

/// Validates signature, issuer, audience, and expiry of a bearer token.
///
/// Implementations never cache validity: every call re-verifies.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, AuthFailure>;
}

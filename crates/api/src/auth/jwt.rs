//! HS256 verification and `jsonwebtoken` error classification.
//!
//! The HMAC verifier is used for local development and tests, where no
//! identity provider is available. Production deployments use
//! [`JwksVerifier`](super::jwks::JwksVerifier).

use async_trait::async_trait;
use castlist_core::auth::{AuthFailure, Claims};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::TokenVerifier;

/// Build the validation rules shared by every verifier.
///
/// Expiry is always checked. Issuer and audience are checked when given.
pub fn validation(algorithm: Algorithm, issuer: Option<&str>, audience: Option<&str>) -> Validation {
    let mut validation = Validation::new(algorithm);
    match audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }
    validation
}

/// Map a decoding failure to the client-facing `InvalidToken` failure.
pub fn classify_jwt_error(err: &jsonwebtoken::errors::Error) -> AuthFailure {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthFailure::invalid_token("token_expired", "Token expired."),
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSignature
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthFailure::invalid_token(
            "invalid_claims",
            "Incorrect claims. Please, check the audience and issuer.",
        ),
        _ => AuthFailure::invalid_token("invalid_header", "Unable to parse authentication token."),
    }
}

/// Verifies HS256 tokens signed with a shared secret.
pub struct HmacVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl HmacVerifier {
    pub fn new(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: validation(Algorithm::HS256, issuer, audience),
        }
    }
}

#[async_trait]
impl TokenVerifier for HmacVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthFailure> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify_jwt_error(&e))
    }
}

//! RS256 verification against an identity provider's published key set.
//!
//! The key set is fetched on every verification. A fetch failure is
//! reported as an `InvalidToken` failure with code `jwks_unreachable` and is
//! never retried, so an outage is not mistaken for a permission problem.

use std::time::Duration;

use async_trait::async_trait;
use castlist_core::auth::{AuthFailure, Claims};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::jwt::{classify_jwt_error, validation};
use super::TokenVerifier;

/// Upper bound on a key-set fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct JwksVerifier {
    client: reqwest::Client,
    jwks_url: String,
    validation: Validation,
}

impl JwksVerifier {
    /// Verifier for an Auth0-style tenant: keys at
    /// `https://{domain}/.well-known/jwks.json`, issuer `https://{domain}/`.
    pub fn for_tenant(domain: &str, audience: &str) -> Result<Self, reqwest::Error> {
        Self::new(
            format!("https://{domain}/.well-known/jwks.json"),
            &format!("https://{domain}/"),
            audience,
        )
    }

    pub fn new(jwks_url: String, issuer: &str, audience: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            jwks_url,
            validation: validation(Algorithm::RS256, Some(issuer), Some(audience)),
        })
    }

    async fn fetch_key_set(&self) -> Result<JwkSet, AuthFailure> {
        let unreachable = |e: reqwest::Error| {
            tracing::error!(error = %e, url = %self.jwks_url, "Key set fetch failed");
            AuthFailure::invalid_token("jwks_unreachable", "Unable to fetch signing keys.")
        };

        self.client
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unreachable)?
            .json::<JwkSet>()
            .await
            .map_err(unreachable)
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthFailure> {
        let header = decode_header(token).map_err(|_| {
            AuthFailure::invalid_token("invalid_header", "Unable to parse authentication token.")
        })?;
        let kid = header
            .kid
            .ok_or_else(|| AuthFailure::invalid_token("invalid_header", "Authorization malformed."))?;

        let key_set = self.fetch_key_set().await?;
        let jwk = key_set.find(&kid).ok_or_else(|| {
            AuthFailure::invalid_token("invalid_header", "Unable to find the appropriate key.")
        })?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| classify_jwt_error(&e))?;

        decode::<Claims>(token, &key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify_jwt_error(&e))
    }
}

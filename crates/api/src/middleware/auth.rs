//! The authorization gate.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use castlist_core::auth::{bearer_token, check_scope, AuthFailure, Claims};

use crate::auth::TokenVerifier;

/// Authorize a request for `required` scope.
///
/// Extracts the bearer token from the `Authorization` header, verifies it,
/// and checks its scopes. Fails closed on every path. The returned claims
/// are not stored anywhere; each request is gated independently.
pub async fn authorize(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
    required: &str,
) -> Result<Claims, AuthFailure> {
    let result = gate(headers, verifier, required).await;

    if let Err(failure) = &result {
        tracing::warn!(
            scope = required,
            kind = ?failure.kind,
            code = failure.code,
            "Request refused by authorization gate",
        );
    }
    result
}

async fn gate(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
    required: &str,
) -> Result<Claims, AuthFailure> {
    let header = match headers.get(AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| {
            AuthFailure::malformed_header("invalid_header", "Authorization header is not valid text.")
        })?),
    };
    let token = bearer_token(header)?;
    let claims = verifier.verify(token).await?;
    check_scope(&claims, required)?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use castlist_core::auth::AuthFailureKind;

    use super::*;

    /// Accepts exactly one token string and counts calls.
    struct FixedVerifier {
        accepted: &'static str,
        permissions: Vec<String>,
        calls: AtomicUsize,
    }

    impl FixedVerifier {
        fn new(permissions: &[&str]) -> Self {
            Self {
                accepted: "good-token",
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TokenVerifier for FixedVerifier {
        async fn verify(&self, token: &str) -> Result<Claims, AuthFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if token == self.accepted {
                Ok(Claims {
                    exp: i64::MAX,
                    permissions: self.permissions.clone(),
                    ..Claims::default()
                })
            } else {
                Err(AuthFailure::invalid_token("invalid_claims", "rejected"))
            }
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn missing_header_never_reaches_verifier() {
        let verifier = FixedVerifier::new(&["get:actors"]);
        let err = authorize(&HeaderMap::new(), &verifier, "get:actors")
            .await
            .unwrap_err();

        assert_eq!(err.kind, AuthFailureKind::MalformedHeader);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_token_is_invalid() {
        let verifier = FixedVerifier::new(&["get:actors"]);
        let err = authorize(&headers_with("Bearer bad-token"), &verifier, "get:actors")
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthFailureKind::InvalidToken);
    }

    #[tokio::test]
    async fn valid_token_without_scope_is_forbidden() {
        let verifier = FixedVerifier::new(&["get:actors"]);
        let err = authorize(&headers_with("Bearer good-token"), &verifier, "delete:actors")
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthFailureKind::InsufficientScope);
        assert_eq!(err.code, "forbidden_access");
    }

    #[tokio::test]
    async fn every_request_reverifies() {
        let verifier = FixedVerifier::new(&["get:actors"]);
        let headers = headers_with("Bearer good-token");

        for _ in 0..3 {
            authorize(&headers, &verifier, "get:actors").await.unwrap();
        }
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 3);
    }
}

//! Bearer-token authorization primitives.
//!
//! Verification of the token itself (signature, issuer, audience, expiry) is
//! done by a verifier in the HTTP layer. This module covers the parts that
//! need no I/O: pulling the token out of the `Authorization` header, the
//! verified claim set, and the scope check.

use serde::{Deserialize, Serialize};

/// Claim set of a verified access token.
///
/// Scopes are read from the Auth0 `permissions` array when present, otherwise
/// from the space-separated OAuth `scope` claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Claims {
    /// Whether the claim set grants `scope`.
    pub fn has_scope(&self, scope: &str) -> bool {
        if self.permissions.iter().any(|p| p == scope) {
            return true;
        }
        self.scope
            .as_deref()
            .is_some_and(|s| s.split_whitespace().any(|p| p == scope))
    }
}

/// Why a request was refused by the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// No `Authorization` header, or one that is not `Bearer <token>`.
    MalformedHeader,
    /// The verifier rejected the token or could not be reached.
    InvalidToken,
    /// The token is valid but lacks the required scope.
    InsufficientScope,
}

/// A structured authorization failure.
///
/// `code` and `description` are passed through to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {description}")]
pub struct AuthFailure {
    pub kind: AuthFailureKind,
    pub code: &'static str,
    pub description: String,
}

impl AuthFailure {
    pub fn malformed_header(code: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind: AuthFailureKind::MalformedHeader,
            code,
            description: description.into(),
        }
    }

    pub fn invalid_token(code: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind: AuthFailureKind::InvalidToken,
            code,
            description: description.into(),
        }
    }

    pub fn insufficient_scope() -> Self {
        Self {
            kind: AuthFailureKind::InsufficientScope,
            code: "forbidden_access",
            description: "Incorrect claims. Please, check the permissions.".into(),
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; exactly one token must follow it.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthFailure> {
    let header = header.ok_or_else(|| {
        AuthFailure::malformed_header(
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    })?;

    let mut parts = header.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthFailure::malformed_header(
            "invalid_header",
            "Authorization header must start with \"Bearer\".",
        ));
    }

    let token = parts
        .next()
        .ok_or_else(|| AuthFailure::malformed_header("invalid_header", "Token not found."))?;

    if parts.next().is_some() {
        return Err(AuthFailure::malformed_header(
            "invalid_header",
            "Authorization header must be bearer token.",
        ));
    }

    Ok(token)
}

/// Fail closed unless `claims` grant `required`.
pub fn check_scope(claims: &Claims, required: &str) -> Result<(), AuthFailure> {
    if claims.has_scope(required) {
        Ok(())
    } else {
        Err(AuthFailure::insufficient_scope())
    }
}

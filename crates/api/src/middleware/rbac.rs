//! Scope-gated extractors.
//!
//! Each endpoint names the scope it needs in its signature:
//!
//! ```ignore
//! async fn delete_work(_auth: Authorized<DeleteWorks>, ...) -> AppResult<...> {
//!     // the token carried `delete:movies`
//! }
//! ```
//!
//! Axum runs extractors in argument order, so placing `Authorized` first
//! rejects unauthorized requests before the path or body is inspected.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use castlist_core::auth::Claims;
use castlist_core::scopes;

use super::auth::authorize;
use crate::error::AppError;
use crate::state::AppState;

/// A permission scope known at compile time.
pub trait RequiredScope: Send + Sync + 'static {
    const SCOPE: &'static str;
}

macro_rules! required_scope {
    ($($(#[$doc:meta])* $name:ident => $scope:path;)+) => {
        $(
            $(#[$doc])*
            pub struct $name;

            impl RequiredScope for $name {
                const SCOPE: &'static str = $scope;
            }
        )+
    };
}

required_scope! {
    /// `get:actors`
    GetTalents => scopes::GET_TALENTS;
    /// `post:actors`
    PostTalents => scopes::POST_TALENTS;
    /// `patch:actors`
    PatchTalents => scopes::PATCH_TALENTS;
    /// `delete:actors`
    DeleteTalents => scopes::DELETE_TALENTS;
    /// `get:movies`
    GetWorks => scopes::GET_WORKS;
    /// `post:movies`
    PostWorks => scopes::POST_WORKS;
    /// `patch:movies`
    PatchWorks => scopes::PATCH_WORKS;
    /// `delete:movies`
    DeleteWorks => scopes::DELETE_WORKS;
}

/// Proof that the request carried a valid token granting `S::SCOPE`.
/// Rejects with 401 or 403 otherwise.
pub struct Authorized<S: RequiredScope> {
    pub claims: Claims,
    _scope: PhantomData<fn() -> S>,
}

impl<S: RequiredScope> FromRequestParts<AppState> for Authorized<S> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authorize(&parts.headers, state.verifier.as_ref(), S::SCOPE).await?;
        Ok(Self {
            claims,
            _scope: PhantomData,
        })
    }
}

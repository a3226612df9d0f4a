//! Request extractors that reject into the standard error envelope.
//!
//! Axum's built-in rejections answer with plain-text bodies. These wrappers
//! keep every failure inside the `{success: false, ...}` contract:
//!
//! - [`EntityPath`] -- a non-numeric path id is a 404.
//! - [`JsonBody`] -- an unparsable or incomplete body is a 422.
//! - [`PageParam`] -- a missing or non-numeric `page` means page 1; an
//!   integer too large for `i64` saturates and lands past the end.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use castlist_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Typed path parameters, e.g. `EntityPath<DbId>` or `EntityPath<(DbId, DbId)>`.
pub struct EntityPath<T>(pub T);

impl<S, T> FromRequestParts<S> for EntityPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Rejected path parameters");
                Err(AppError::NotFound("path"))
            }
        }
    }
}

/// A JSON request body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Unprocessable(
                rejection.body_text(),
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    page: Option<String>,
}

/// The 1-based `?page=` number. Defaults to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParam(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for PageParam {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<RawPage>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Query(raw)| raw.page)
            .and_then(|p| parse_page(&p))
            .unwrap_or(1);
        Ok(Self(page))
    }
}

/// Parse a page number. An integer too large for `i64` saturates so it still
/// lands past the end; anything that is not an integer yields `None`.
fn parse_page(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(page) = raw.parse() {
        return Some(page);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

//! Handlers for `/session-token`: store the caller's bearer token and read
//! it back.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use castlist_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, GetTalents};
use crate::response::{Acknowledged, Envelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoredToken {
    pub token: String,
}

/// POST /session-token?token=...
///
/// Replaces whatever token was stored before.
pub async fn store_token(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> AppResult<impl IntoResponse> {
    let token = query
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unprocessable("token is required".to_string()))
        })?;

    let record = state.token_store.set(token).await?;
    tracing::info!(record_id = record.id, "Session token stored");

    Ok(Json(Envelope::ok(Acknowledged {})))
}

/// GET /session-token
///
/// 403 when nothing live is stored.
pub async fn read_token(
    _auth: Authorized<GetTalents>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let record = state.token_store.get().await?.ok_or_else(|| {
        AppError::Core(CoreError::Forbidden("no live session token".to_string()))
    })?;

    Ok(Json(Envelope::ok(StoredToken {
        token: record.token,
    })))
}

use std::sync::Arc;

use castlist_db::repositories::TokenStore;

use crate::auth::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: castlist_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Bearer token verifier (identity provider key set or shared secret).
    pub verifier: Arc<dyn TokenVerifier>,
    /// Single-slot store behind `/session-token`.
    pub token_store: Arc<TokenStore>,
}

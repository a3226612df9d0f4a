use axum::routing::get;
use axum::Router;

use crate::handlers::session_token;
use crate::state::AppState;

/// `GET|POST /session-token`
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/session-token",
        get(session_token::read_token).post(session_token::store_token),
    )
}

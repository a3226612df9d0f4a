pub mod health;
pub mod session;
pub mod talents;
pub mod works;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /talents                                  list, create
/// /talents/{id}                             get, update, delete
///
/// /works                                    list, create
/// /works/{id}                               get, update, delete
/// /works/{work_id}/talents/{talent_id}      link (PUT), unlink (DELETE)
///
/// /session-token                            store (POST), read (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/talents", talents::router())
        .nest("/works", works::router())
        .merge(session::router())
}

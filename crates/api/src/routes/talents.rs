use axum::routing::get;
use axum::Router;

use crate::handlers::talents;
use crate::state::AppState;

/// Routes mounted at `/talents`.
///
/// ```text
/// GET    /            -> list_talents
/// POST   /            -> create_talent
/// GET    /{id}        -> get_talent
/// PATCH  /{id}        -> update_talent
/// DELETE /{id}        -> delete_talent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(talents::list_talents).post(talents::create_talent))
        .route(
            "/{id}",
            get(talents::get_talent)
                .patch(talents::update_talent)
                .delete(talents::delete_talent),
        )
}

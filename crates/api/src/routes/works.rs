use axum::routing::{get, put};
use axum::Router;

use crate::handlers::works;
use crate::state::AppState;

/// Routes mounted at `/works`.
///
/// ```text
/// GET    /                                -> list_works
/// POST   /                                -> create_work
/// GET    /{id}                            -> get_work
/// PATCH  /{id}                            -> update_work
/// DELETE /{id}                            -> delete_work
/// PUT    /{work_id}/talents/{talent_id}   -> link_talent
/// DELETE /{work_id}/talents/{talent_id}   -> unlink_talent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(works::list_works).post(works::create_work))
        .route(
            "/{id}",
            get(works::get_work)
                .patch(works::update_work)
                .delete(works::delete_work),
        )
        .route(
            "/{work_id}/talents/{talent_id}",
            put(works::link_talent).delete(works::unlink_talent),
        )
}

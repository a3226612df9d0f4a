//! Handlers for the `/works` resource and its cast links.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use castlist_core::error::CoreError;
use castlist_core::pagination::{PageWindow, DEFAULT_PAGE_SIZE};
use castlist_core::types::DbId;
use castlist_db::models::work::{CastMember, CreateWork, UpdateWork, Work};
use castlist_db::repositories::{CastingRepo, WorkRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityPath, JsonBody, PageParam};
use crate::middleware::rbac::{Authorized, DeleteWorks, GetWorks, PatchWorks, PostWorks};
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WorkList {
    pub works: Vec<Work>,
    pub total_works: i64,
}

#[derive(Debug, Serialize)]
pub struct WorkDetail {
    pub work_details: Work,
    pub talents: Vec<CastMember>,
    pub talent_count: usize,
}

fn missing_for_mutation(id: DbId) -> AppError {
    AppError::Core(CoreError::Unprocessable(format!("work {id} does not exist")))
}

/// GET /works?page=N
pub async fn list_works(
    _auth: Authorized<GetWorks>,
    State(state): State<AppState>,
    PageParam(page): PageParam,
) -> AppResult<impl IntoResponse> {
    let window = PageWindow::new(page, DEFAULT_PAGE_SIZE)?;
    let listing = WorkRepo::list_page(&state.pool, &window).await?;
    window.check_against(listing.total)?;

    Ok(Json(Envelope::ok(WorkList {
        works: listing.items,
        total_works: listing.total,
    })))
}

/// GET /works/{id}
pub async fn get_work(
    _auth: Authorized<GetWorks>,
    State(state): State<AppState>,
    EntityPath(id): EntityPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Work", id });

    let work = WorkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let talents = WorkRepo::cast(&state.pool, id).await?.ok_or_else(not_found)?;

    Ok(Json(Envelope::ok(WorkDetail {
        work_details: work,
        talent_count: talents.len(),
        talents,
    })))
}

/// POST /works
///
/// A title that collides with an existing one (after title-casing) is 422.
pub async fn create_work(
    _auth: Authorized<PostWorks>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateWork>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let work = WorkRepo::create(&state.pool, &input).await?;

    tracing::info!(work_id = work.id, title = %work.title, "Work created");

    Ok((StatusCode::CREATED, Json(Envelope::ok(work))))
}

/// PATCH /works/{id}
pub async fn update_work(
    _auth: Authorized<PatchWorks>,
    State(state): State<AppState>,
    EntityPath(id): EntityPath<DbId>,
    JsonBody(input): JsonBody<UpdateWork>,
) -> AppResult<impl IntoResponse> {
    let changes = input.validated()?;
    let work = WorkRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| missing_for_mutation(id))?;

    tracing::info!(work_id = id, "Work updated");

    Ok(Json(Envelope::ok(work)))
}

/// DELETE /works/{id}
pub async fn delete_work(
    _auth: Authorized<DeleteWorks>,
    State(state): State<AppState>,
    EntityPath(id): EntityPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let work = WorkRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| missing_for_mutation(id))?;

    tracing::info!(work_id = id, "Work deleted");

    Ok(Json(Envelope::ok(work)))
}

/// PUT /works/{work_id}/talents/{talent_id}
///
/// Cast a talent in a work. Idempotent.
pub async fn link_talent(
    _auth: Authorized<PatchWorks>,
    State(state): State<AppState>,
    EntityPath((work_id, talent_id)): EntityPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let casting = CastingRepo::link(&state.pool, work_id, talent_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unprocessable(format!(
                "work {work_id} or talent {talent_id} does not exist"
            )))
        })?;

    tracing::info!(work_id, talent_id, "Talent cast in work");

    Ok(Json(Envelope::ok(casting)))
}

/// DELETE /works/{work_id}/talents/{talent_id}
pub async fn unlink_talent(
    _auth: Authorized<PatchWorks>,
    State(state): State<AppState>,
    EntityPath((work_id, talent_id)): EntityPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !CastingRepo::unlink(&state.pool, work_id, talent_id).await? {
        return Err(AppError::Core(CoreError::Unprocessable(format!(
            "talent {talent_id} is not cast in work {work_id}"
        ))));
    }

    tracing::info!(work_id, talent_id, "Talent removed from work");

    Ok(Json(Envelope::ok(castlist_db::models::casting::Casting {
        work_id,
        talent_id,
    })))
}

//! Handlers for the `/talents` resource.
//!
//! Read-path misses answer 404. Update and delete of a missing id answer
//! 422, matching the established client contract for mutations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use castlist_core::error::CoreError;
use castlist_core::pagination::{PageWindow, DEFAULT_PAGE_SIZE};
use castlist_core::types::DbId;
use castlist_db::models::talent::{CreateTalent, Talent, TalentCredit, TalentSummary, UpdateTalent};
use castlist_db::repositories::TalentRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityPath, JsonBody, PageParam};
use crate::middleware::rbac::{Authorized, DeleteTalents, GetTalents, PatchTalents, PostTalents};
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TalentList {
    pub talents: Vec<TalentSummary>,
    pub total_talents: i64,
}

#[derive(Debug, Serialize)]
pub struct TalentDetail {
    pub talent_details: Talent,
    pub works: Vec<TalentCredit>,
    pub work_count: usize,
}

fn missing_for_mutation(id: DbId) -> AppError {
    AppError::Core(CoreError::Unprocessable(format!("talent {id} does not exist")))
}

/// GET /talents?page=N
pub async fn list_talents(
    _auth: Authorized<GetTalents>,
    State(state): State<AppState>,
    PageParam(page): PageParam,
) -> AppResult<impl IntoResponse> {
    let window = PageWindow::new(page, DEFAULT_PAGE_SIZE)?;
    let listing = TalentRepo::list_page(&state.pool, &window).await?;
    window.check_against(listing.total)?;

    Ok(Json(Envelope::ok(TalentList {
        talents: listing.items,
        total_talents: listing.total,
    })))
}

/// GET /talents/{id}
///
/// The talent plus every work it is cast in.
pub async fn get_talent(
    _auth: Authorized<GetTalents>,
    State(state): State<AppState>,
    EntityPath(id): EntityPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Talent", id });

    let talent = TalentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let works = TalentRepo::credits(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(Envelope::ok(TalentDetail {
        talent_details: talent,
        work_count: works.len(),
        works,
    })))
}

/// POST /talents
pub async fn create_talent(
    _auth: Authorized<PostTalents>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTalent>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let talent = TalentRepo::create(&state.pool, &input).await?;

    tracing::info!(talent_id = talent.id, "Talent created");

    Ok((StatusCode::CREATED, Json(Envelope::ok(talent))))
}

/// PATCH /talents/{id}
///
/// Merge-patch: only keys present in the body are written.
pub async fn update_talent(
    _auth: Authorized<PatchTalents>,
    State(state): State<AppState>,
    EntityPath(id): EntityPath<DbId>,
    JsonBody(input): JsonBody<UpdateTalent>,
) -> AppResult<impl IntoResponse> {
    let changes = input.validated()?;
    let talent = TalentRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| missing_for_mutation(id))?;

    tracing::info!(talent_id = id, "Talent updated");

    Ok(Json(Envelope::ok(talent)))
}

/// DELETE /talents/{id}
///
/// Removes the talent and its castings; responds with the deleted row.
pub async fn delete_talent(
    _auth: Authorized<DeleteTalents>,
    State(state): State<AppState>,
    EntityPath(id): EntityPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let talent = TalentRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| missing_for_mutation(id))?;

    tracing::info!(talent_id = id, "Talent deleted");

    Ok(Json(Envelope::ok(talent)))
}

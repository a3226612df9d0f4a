use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET / -- send the browser to the identity provider's login page.
///
/// Answers 404 unless every Auth0 login setting is configured.
pub async fn login_redirect(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let url = state
        .config
        .auth
        .login_redirect_url()
        .ok_or(AppError::NotFound("login"))?;

    Ok((StatusCode::FOUND, [(LOCATION, url)]))
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use castlist_core::auth::{AuthFailure, AuthFailureKind};
use castlist_core::error::CoreError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`AuthFailure`] for the
/// authorization gate, and `sqlx` errors from the repositories. Implements
/// [`IntoResponse`] to produce the `{success, error, message}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `castlist_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The authorization gate refused the request.
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No route or resource matched.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request outlived the configured timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

pub const MSG_NOT_FOUND: &str = "resource not found";
pub const MSG_UNPROCESSABLE: &str = "unprocessable";
pub const MSG_FORBIDDEN: &str = "forbidden";
pub const MSG_INTERNAL: &str = "internal server error";
pub const MSG_METHOD_NOT_ALLOWED: &str = "method not allowed";
pub const MSG_TIMEOUT: &str = "request timeout";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    (StatusCode::NOT_FOUND, json!(MSG_NOT_FOUND))
                }
                CoreError::PageOutOfRange { page, total } => {
                    tracing::debug!(page, total, "Page out of range");
                    (StatusCode::NOT_FOUND, json!(MSG_NOT_FOUND))
                }
                CoreError::Unprocessable(msg) => {
                    tracing::debug!(reason = %msg, "Unprocessable request");
                    (StatusCode::UNPROCESSABLE_ENTITY, json!(MSG_UNPROCESSABLE))
                }
                CoreError::Forbidden(msg) => {
                    tracing::debug!(reason = %msg, "Forbidden");
                    (StatusCode::FORBIDDEN, json!(MSG_FORBIDDEN))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, json!(MSG_INTERNAL))
                }
            },

            // --- Authorization gate: structured detail passes through ---
            AppError::Auth(failure) => (auth_status(failure), auth_message(failure)),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            AppError::NotFound(what) => {
                tracing::debug!(what, "Not found");
                (StatusCode::NOT_FOUND, json!(MSG_NOT_FOUND))
            }

            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, json!(MSG_METHOD_NOT_ALLOWED))
            }

            AppError::Timeout => {
                tracing::warn!("Request timed out");
                (StatusCode::REQUEST_TIMEOUT, json!(MSG_TIMEOUT))
            }
        };

        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn auth_status(failure: &AuthFailure) -> StatusCode {
    match failure.kind {
        AuthFailureKind::MalformedHeader | AuthFailureKind::InvalidToken => {
            StatusCode::UNAUTHORIZED
        }
        AuthFailureKind::InsufficientScope => StatusCode::FORBIDDEN,
    }
}

fn auth_message(failure: &AuthFailure) -> Value {
    json!({
        "code": failure.code,
        "description": failure.description,
    })
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique, foreign-key, and check constraint violations map to 422.
/// - Everything else (including pool timeouts) maps to 500 with a sanitized
///   message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Value) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, json!(MSG_NOT_FOUND)),
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation() =>
        {
            tracing::debug!(
                error = %db_err,
                constraint = db_err.constraint().unwrap_or("unknown"),
                "Constraint violation",
            );
            (StatusCode::UNPROCESSABLE_ENTITY, json!(MSG_UNPROCESSABLE))
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, json!(MSG_INTERNAL))
        }
    }
}

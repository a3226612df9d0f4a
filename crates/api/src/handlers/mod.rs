pub mod login;
pub mod session_token;
pub mod talents;
pub mod works;

use crate::error::AppError;

/// Fallback for unmatched routes: answers with the standard 404 envelope.
pub async fn not_found() -> AppError {
    AppError::NotFound("route")
}

/// Fallback for a known path called with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

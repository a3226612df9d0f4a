//! Shared response envelope for API handlers.
//!
//! Every success response is `{ "success": true, ...payload }`. The payload
//! struct's fields are flattened into the top-level object. Error responses
//! are produced by [`AppError`](crate::error::AppError).

use serde::Serialize;

/// Standard `{ "success": true, ...T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Envelope::ok(TalentList { talents, total_talents })))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// Payload for responses that carry nothing beyond `success`.
#[derive(Debug, Serialize)]
pub struct Acknowledged {}

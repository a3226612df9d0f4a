//! The single-slot session token record.

use castlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `session_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionToken {
    pub id: DbId,
    pub token: String,
    pub stored_at: Timestamp,
}

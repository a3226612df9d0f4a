//! Work-talent association model.

use castlist_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `castings` junction table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Casting {
    pub work_id: DbId,
    pub talent_id: DbId,
}

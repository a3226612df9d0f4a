//! Repository for the `castings` junction table.

use castlist_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::casting::Casting;

pub struct CastingRepo;

impl CastingRepo {
    /// Link a talent to a work. Linking an existing pair is a no-op.
    ///
    /// Returns `None` if either the work or the talent does not exist.
    pub async fn link(
        pool: &SqlitePool,
        work_id: DbId,
        talent_id: DbId,
    ) -> Result<Option<Casting>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let both_exist: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM works WHERE id = ?1)
                AND EXISTS(SELECT 1 FROM talents WHERE id = ?2)",
        )
        .bind(work_id)
        .bind(talent_id)
        .fetch_one(&mut *tx)
        .await?;
        if !both_exist {
            return Ok(None);
        }

        sqlx::query("INSERT OR IGNORE INTO castings (work_id, talent_id) VALUES (?1, ?2)")
            .bind(work_id)
            .bind(talent_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(Casting { work_id, talent_id }))
    }

    /// Remove a link. Returns `true` if a row was deleted.
    pub async fn unlink(
        pool: &SqlitePool,
        work_id: DbId,
        talent_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM castings WHERE work_id = ?1 AND talent_id = ?2")
            .bind(work_id)
            .bind(talent_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `works` table.

use castlist_core::pagination::PageWindow;
use castlist_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::work::{CastMember, NewWork, Work, WorkChanges};
use crate::models::Page;

const COLUMNS: &str = "id, title, release_date";

/// Provides CRUD operations for works plus the work → talents join.
///
/// Title uniqueness is enforced by the `uq_works_title` constraint; a
/// violation surfaces as a `sqlx::Error::Database` unique violation.
pub struct WorkRepo;

impl WorkRepo {
    /// Insert a new work, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewWork) -> Result<Work, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO works (title, release_date)
             VALUES (?1, ?2)
             RETURNING {COLUMNS}"
        );
        let work = sqlx::query_as::<_, Work>(&query)
            .bind(&input.title)
            .bind(input.release_date)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(work)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Work>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE id = ?1");
        sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read one window of works in id order together with the total count.
    pub async fn list_page(
        pool: &SqlitePool,
        window: &PageWindow,
    ) -> Result<Page<Work>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM works")
            .fetch_one(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM works ORDER BY id ASC LIMIT ?1 OFFSET ?2");
        let items = sqlx::query_as::<_, Work>(&query)
            .bind(window.size)
            .bind(window.start)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Page { items, total })
    }

    /// List the talents cast in a work, ordered by talent id.
    ///
    /// Returns `None` if the work does not exist.
    pub async fn cast(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Vec<CastMember>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM works WHERE id = ?1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        let cast = sqlx::query_as::<_, CastMember>(
            "SELECT t.id AS talent_id, t.first_name || ' ' || t.second_name AS talent_name
             FROM castings c
             JOIN talents t ON t.id = c.talent_id
             WHERE c.work_id = ?1
             ORDER BY t.id ASC",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(cast))
    }

    /// Merge-patch a work. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        changes: &WorkChanges,
    ) -> Result<Option<Work>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE works SET
                title = COALESCE(?2, title),
                release_date = COALESCE(?3, release_date)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let work = sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(changes.release_date)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(work)
    }

    /// Delete a work and every casting that references it.
    ///
    /// Returns the row as it was before deletion, or `None` if it did not exist.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Work>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM works WHERE id = ?1");
        let Some(work) = sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let unlinked = sqlx::query("DELETE FROM castings WHERE work_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM works WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(work_id = id, unlinked, "Work deleted with castings");
        Ok(Some(work))
    }
}

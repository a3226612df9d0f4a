//! Repository for the `talents` table.

use castlist_core::pagination::PageWindow;
use castlist_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::talent::{NewTalent, Talent, TalentChanges, TalentCredit, TalentSummary};
use crate::models::Page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, second_name, age, gender";

/// Provides CRUD operations for talents plus the talent → works join.
pub struct TalentRepo;

impl TalentRepo {
    /// Insert a new talent, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewTalent) -> Result<Talent, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO talents (first_name, second_name, age, gender)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        let talent = sqlx::query_as::<_, Talent>(&query)
            .bind(&input.first_name)
            .bind(&input.second_name)
            .bind(input.age)
            .bind(&input.gender)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(talent)
    }

    /// Find a talent by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Talent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM talents WHERE id = ?1");
        sqlx::query_as::<_, Talent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read one window of talents in id order together with the total count.
    ///
    /// Both reads happen in one transaction so the count matches the rows.
    pub async fn list_page(
        pool: &SqlitePool,
        window: &PageWindow,
    ) -> Result<Page<TalentSummary>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM talents")
            .fetch_one(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM talents ORDER BY id ASC LIMIT ?1 OFFSET ?2");
        let rows = sqlx::query_as::<_, Talent>(&query)
            .bind(window.size)
            .bind(window.start)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items: rows.into_iter().map(TalentSummary::from).collect(),
            total,
        })
    }

    /// List the works a talent is cast in, ordered by work id.
    ///
    /// Returns `None` if the talent does not exist.
    pub async fn credits(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Vec<TalentCredit>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM talents WHERE id = ?1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        let credits = sqlx::query_as::<_, TalentCredit>(
            "SELECT w.id AS work_id, w.title AS work_title
             FROM castings c
             JOIN works w ON w.id = c.work_id
             WHERE c.talent_id = ?1
             ORDER BY w.id ASC",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(credits))
    }

    /// Merge-patch a talent. Only `Some` fields in `changes` are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        changes: &TalentChanges,
    ) -> Result<Option<Talent>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE talents SET
                first_name = COALESCE(?2, first_name),
                second_name = COALESCE(?3, second_name),
                age = COALESCE(?4, age),
                gender = COALESCE(?5, gender)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let talent = sqlx::query_as::<_, Talent>(&query)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.second_name)
            .bind(changes.age)
            .bind(&changes.gender)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(talent)
    }

    /// Delete a talent and every casting that references it.
    ///
    /// Returns the row as it was before deletion, or `None` if it did not exist.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Talent>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM talents WHERE id = ?1");
        let Some(talent) = sqlx::query_as::<_, Talent>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let unlinked = sqlx::query("DELETE FROM castings WHERE talent_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM talents WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(talent_id = id, unlinked, "Talent deleted with castings");
        Ok(Some(talent))
    }
}

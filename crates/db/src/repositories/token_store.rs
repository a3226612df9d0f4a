//! Single-slot store for the most recently submitted bearer token.
//!
//! At most one record is live at a time: [`TokenStore::set`] clears the
//! table and inserts the new token in one transaction. A record older than
//! the retention window is treated as absent and purged when next read.
//! All access is serialized through an async mutex so no reader can observe
//! the table between the clear and the insert.

use castlist_core::types::Timestamp;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::models::session_token::SessionToken;

/// Default retention window: 10 hours.
pub const DEFAULT_RETENTION_SECS: i64 = 36_000;

const COLUMNS: &str = "id, token, stored_at";

pub struct TokenStore {
    pool: SqlitePool,
    retention: Duration,
    gate: Mutex<()>,
}

impl TokenStore {
    pub fn new(pool: SqlitePool, retention: Duration) -> Self {
        Self {
            pool,
            retention,
            gate: Mutex::new(()),
        }
    }

    /// Replace whatever is stored with `token`, stamped with the current time.
    pub async fn set(&self, token: &str) -> Result<SessionToken, sqlx::Error> {
        self.set_at(token, Utc::now()).await
    }

    /// Replace whatever is stored with `token`, stamped with `now`.
    pub async fn set_at(&self, token: &str, now: Timestamp) -> Result<SessionToken, sqlx::Error> {
        let _guard = self.gate.lock().await;
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM session_tokens")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO session_tokens (token, stored_at)
             VALUES (?1, ?2)
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, SessionToken>(&query)
            .bind(token)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Return the live token, if any, as of the current time.
    pub async fn get(&self) -> Result<Option<SessionToken>, sqlx::Error> {
        self.get_at(Utc::now()).await
    }

    /// Return the live token, if any, as of `now`.
    ///
    /// An expired record is deleted before `None` is returned.
    pub async fn get_at(&self, now: Timestamp) -> Result<Option<SessionToken>, sqlx::Error> {
        let _guard = self.gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM session_tokens ORDER BY id DESC LIMIT 1");
        let Some(record) = sqlx::query_as::<_, SessionToken>(&query)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if now - record.stored_at > self.retention {
            let purged = sqlx::query("DELETE FROM session_tokens WHERE id <= ?1")
                .bind(record.id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tx.commit().await?;
            tracing::debug!(purged, "Purged expired session token");
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(record))
    }

    /// Remove every stored token. Returns the number of rows deleted.
    pub async fn clear_all(&self) -> Result<u64, sqlx::Error> {
        let _guard = self.gate.lock().await;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM session_tokens")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

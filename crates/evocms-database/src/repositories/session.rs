//! Session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use evocms_core::error::{AppError, ErrorKind};
use evocms_core::result::AppResult;
use evocms_core::types::SessionId;
use evocms_entity::session::{NewSession, SessionRow, SessionUpdate};

use crate::store::SessionStore;

/// Repository for the `sessions` table.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find_active(
        &self,
        id: SessionId,
        key: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Option<SessionRow>> {
        sqlx::query_as::<_, SessionRow>(
            "SELECT id, key, data, user_id, ip_address, last_seen FROM sessions \
             WHERE id = $1 AND key = $2 AND last_seen > $3",
        )
        .bind(id)
        .bind(key)
        .bind(since)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    async fn insert(&self, session: &NewSession) -> AppResult<SessionId> {
        sqlx::query_scalar::<_, SessionId>(
            "INSERT INTO sessions (key, ip_address, last_seen) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&session.key)
        .bind(&session.ip_address)
        .bind(session.last_seen)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    async fn update(&self, update: &SessionUpdate) -> AppResult<()> {
        sqlx::query(
            "UPDATE sessions SET key = $2, data = $3, user_id = $4, ip_address = $5, last_seen = $6 \
             WHERE id = $1",
        )
        .bind(update.id)
        .bind(&update.key)
        .bind(&update.data)
        .bind(update.user_id)
        .bind(&update.ip_address)
        .bind(update.last_seen)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save session", e))?;
        Ok(())
    }

    async fn load_data(&self, id: SessionId) -> AppResult<Option<String>> {
        let data: Option<Option<String>> =
            sqlx::query_scalar("SELECT data FROM sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load session data", e)
                })?;
        Ok(data.flatten())
    }

    async fn delete_seen_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE last_seen < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to prune sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}

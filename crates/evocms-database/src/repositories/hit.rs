//! Hit log repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use evocms_core::error::{AppError, ErrorKind};
use evocms_core::result::AppResult;
use evocms_core::types::{HitId, SessionId};
use evocms_entity::hit::NewHit;

use crate::store::HitStore;

/// Repository for the `hits` table.
#[derive(Debug, Clone)]
pub struct HitRepository {
    pool: PgPool,
}

impl HitRepository {
    /// Create a new hit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HitStore for HitRepository {
    async fn insert(&self, hit: &NewHit) -> AppResult<HitId> {
        sqlx::query_scalar::<_, HitId>(
            "INSERT INTO hits (session_id, uri, referer, ip_address, user_agent, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(hit.session_id)
        .bind(&hit.uri)
        .bind(&hit.referer)
        .bind(&hit.ip_address)
        .bind(&hit.user_agent)
        .bind(hit.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to log hit", e))
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM hits WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to prune hits", e))?;
        Ok(result.rows_affected())
    }

    async fn count_for_session(&self, session_id: SessionId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hits WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count hits", e))?;
        Ok(count as u64)
    }
}

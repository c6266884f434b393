//! Collection repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use evocms_core::error::{AppError, ErrorKind};
use evocms_core::result::AppResult;
use evocms_core::types::{CollectionId, UserId};
use evocms_entity::collection::Collection;

use crate::store::CollectionStore;

const COLUMNS: &str =
    "id, urlname, kind, shortname, name, tagline, longdesc, access, listing, sort_order";

/// Repository for the `collections` and `collection_members` tables.
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: PgPool,
}

impl CollectionRepository {
    /// Create a new collection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for CollectionRepository {
    async fn find_by_id(&self, id: CollectionId) -> AppResult<Option<Collection>> {
        sqlx::query_as::<_, Collection>(&format!("SELECT {COLUMNS} FROM collections WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find collection", e))
    }

    async fn find_by_urlname(&self, urlname: &str) -> AppResult<Option<Collection>> {
        sqlx::query_as::<_, Collection>(&format!(
            "SELECT {COLUMNS} FROM collections WHERE urlname = $1"
        ))
        .bind(urlname)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find collection by urlname", e)
        })
    }

    async fn list_all(&self) -> AppResult<Vec<Collection>> {
        sqlx::query_as::<_, Collection>(&format!(
            "SELECT {COLUMNS} FROM collections ORDER BY sort_order ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list collections", e))
    }

    async fn is_member(&self, coll_id: CollectionId, user_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM collection_members WHERE coll_id = $1 AND user_id = $2)",
        )
        .bind(coll_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check membership", e))
    }
}

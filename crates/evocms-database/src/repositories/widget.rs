//! Widget repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use evocms_core::error::{AppError, ErrorKind};
use evocms_core::result::AppResult;
use evocms_core::types::{CollectionId, ContainerId};
use evocms_entity::widget::{Widget, WidgetContainer};

use crate::store::WidgetStore;

/// Repository for `widget_containers` and `widgets`.
#[derive(Debug, Clone)]
pub struct WidgetRepository {
    pool: PgPool,
}

impl WidgetRepository {
    /// Create a new widget repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WidgetStore for WidgetRepository {
    async fn find_container(
        &self,
        coll_id: CollectionId,
        code: &str,
    ) -> AppResult<Option<WidgetContainer>> {
        sqlx::query_as::<_, WidgetContainer>(
            "SELECT id, coll_id, code, name, sort_order FROM widget_containers \
             WHERE coll_id = $1 AND code = $2",
        )
        .bind(coll_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find container", e))
    }

    async fn list_containers(&self, coll_id: CollectionId) -> AppResult<Vec<WidgetContainer>> {
        sqlx::query_as::<_, WidgetContainer>(
            "SELECT id, coll_id, code, name, sort_order FROM widget_containers \
             WHERE coll_id = $1 ORDER BY sort_order ASC, id ASC",
        )
        .bind(coll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list containers", e))
    }

    async fn list_widgets(&self, container_id: ContainerId) -> AppResult<Vec<Widget>> {
        sqlx::query_as::<_, Widget>(
            "SELECT id, container_id, sort_order, enabled, code, params FROM widgets \
             WHERE container_id = $1 ORDER BY sort_order ASC, id ASC",
        )
        .bind(container_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list widgets", e))
    }
}

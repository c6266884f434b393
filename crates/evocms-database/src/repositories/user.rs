//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use evocms_core::error::{AppError, ErrorKind};
use evocms_core::result::AppResult;
use evocms_core::types::{PageRequest, PageResponse, UserId};
use evocms_entity::user::User;

use crate::store::UserStore;

const COLUMNS: &str =
    "id, login, firstname, lastname, nickname, city, gender, avatar_path, closed";

// $1 pattern or NULL
const FILTER: &str = "WHERE closed = FALSE AND ($1::text IS NULL OR login ILIKE $1 \
     OR firstname ILIKE $1 OR lastname ILIKE $1 OR nickname ILIKE $1)";

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1 AND closed = FALSE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn list(
        &self,
        keywords: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let pattern = keywords.map(|k| format!("%{k}%"));

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users {FILTER}"))
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users {FILTER} ORDER BY login ASC LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

//! Item, comment and chapter repository implementations.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use evocms_core::error::{AppError, ErrorKind};
use evocms_core::result::AppResult;
use evocms_core::types::{
    ChapterId, CollectionId, CommentId, FileId, ItemId, LinkId, PageRequest, PageResponse,
};
use evocms_entity::chapter::Chapter;
use evocms_entity::comment::Comment;
use evocms_entity::item::{Attachment, Item, MediaFile};
use evocms_entity::tag::TagCount;

use super::like_patterns;
use crate::store::{ChapterStore, CommentStore, ItemQuery, ItemStore};

const ITEM_SELECT: &str = "SELECT i.id, i.coll_id, i.main_chapter_id, i.creator_user_id, \
     i.status, i.datestart, i.urltitle, i.type_id, t.name AS type_name, t.usage AS type_usage, \
     i.title, i.content, i.excerpt \
     FROM items i JOIN item_types t ON t.id = i.type_id";

// $1 coll, $2 usage, $3 type ids, $4 keyword pattern, $5 tag name
const ITEM_FILTER: &str = "WHERE i.coll_id = $1 AND i.status = 'published' \
     AND ($2::type_usage IS NULL OR t.usage = $2) \
     AND ($3::int[] IS NULL OR i.type_id = ANY($3)) \
     AND ($4::text IS NULL OR i.title ILIKE $4 OR i.content ILIKE $4) \
     AND ($5::text IS NULL OR EXISTS (SELECT 1 FROM item_tags it JOIN tags g ON g.id = it.tag_id \
          WHERE it.item_id = i.id AND g.name = $5))";

/// Repository for `items`, `links`, `files` and `tags`.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AttachmentRow {
    link_id: LinkId,
    item_id: ItemId,
    position: String,
    sort_order: i32,
    file_id: Option<FileId>,
    path: Option<String>,
    file_type: Option<String>,
    is_dir: Option<bool>,
    title: Option<String>,
    alt: Option<String>,
    description: Option<String>,
}

impl From<AttachmentRow> for Attachment {
    fn from(row: AttachmentRow) -> Self {
        let file = match (row.file_id, row.path) {
            (Some(id), Some(path)) => Some(MediaFile {
                id,
                path,
                file_type: row.file_type.unwrap_or_else(|| "other".to_string()),
                is_dir: row.is_dir.unwrap_or(false),
                title: row.title,
                alt: row.alt,
                description: row.description,
            }),
            _ => None,
        };
        Self {
            link_id: row.link_id,
            item_id: row.item_id,
            position: row.position,
            order: row.sort_order,
            file,
        }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn list_published(
        &self,
        query: &ItemQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let pattern = query.keywords.as_ref().map(|k| format!("%{k}%"));

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM items i JOIN item_types t ON t.id = i.type_id {ITEM_FILTER}"
        ))
        .bind(query.coll_id)
        .bind(query.usage)
        .bind(&query.type_ids)
        .bind(&pattern)
        .bind(&query.tag)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count items", e))?;

        let items = sqlx::query_as::<_, Item>(&format!(
            "{ITEM_SELECT} {ITEM_FILTER} ORDER BY i.datestart DESC, i.id DESC LIMIT $6 OFFSET $7"
        ))
        .bind(query.coll_id)
        .bind(query.usage)
        .bind(&query.type_ids)
        .bind(&pattern)
        .bind(&query.tag)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>(&format!("{ITEM_SELECT} WHERE i.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn attachments(&self, item_id: ItemId) -> AppResult<Vec<Attachment>> {
        let rows = sqlx::query_as::<_, AttachmentRow>(
            "SELECT l.id AS link_id, l.item_id, l.position, l.sort_order, f.id AS file_id, \
             f.path, f.file_type, f.is_dir, f.title, f.alt, f.description \
             FROM links l LEFT JOIN files f ON f.id = l.file_id \
             WHERE l.item_id = $1 ORDER BY l.sort_order ASC, l.id ASC",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load attachments", e))?;
        Ok(rows.into_iter().map(Attachment::from).collect())
    }

    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(&format!(
            "{ITEM_SELECT} WHERE i.coll_id = $1 AND i.status = 'published' \
             AND (i.title ILIKE ANY($2) OR i.content ILIKE ANY($2)) \
             ORDER BY i.datestart DESC"
        ))
        .bind(coll_id)
        .bind(like_patterns(keywords))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search items", e))
    }

    async fn find_matching_tags(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<TagCount>> {
        sqlx::query_as::<_, TagCount>(
            "SELECT g.id, g.name, COUNT(*) AS post_count FROM tags g \
             JOIN item_tags it ON it.tag_id = g.id \
             JOIN items i ON i.id = it.item_id \
             WHERE i.coll_id = $1 AND i.status = 'published' AND g.name ILIKE ANY($2) \
             GROUP BY g.id, g.name ORDER BY g.name ASC",
        )
        .bind(coll_id)
        .bind(like_patterns(keywords))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search tags", e))
    }
}

/// Repository for `comments`.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, item_id, author, content, status, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT c.id, c.item_id, c.author, c.content, c.status, c.created_at \
             FROM comments c JOIN items i ON i.id = c.item_id \
             WHERE i.coll_id = $1 AND i.status = 'published' AND c.status = 'published' \
             AND c.content ILIKE ANY($2) \
             ORDER BY c.created_at DESC",
        )
        .bind(coll_id)
        .bind(like_patterns(keywords))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search comments", e))
    }
}

/// Repository for `chapters`.
#[derive(Debug, Clone)]
pub struct ChapterRepository {
    pool: PgPool,
}

impl ChapterRepository {
    /// Create a new chapter repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChapterStore for ChapterRepository {
    async fn find_by_id(&self, id: ChapterId) -> AppResult<Option<Chapter>> {
        sqlx::query_as::<_, Chapter>(
            "SELECT id, coll_id, parent_id, name, urlname, description FROM chapters WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chapter", e))
    }

    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Chapter>> {
        let patterns = like_patterns(keywords);
        sqlx::query_as::<_, Chapter>(
            "SELECT id, coll_id, parent_id, name, urlname, description FROM chapters \
             WHERE coll_id = $1 AND (name ILIKE ANY($2) OR description ILIKE ANY($2)) \
             ORDER BY name ASC",
        )
        .bind(coll_id)
        .bind(&patterns)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search chapters", e))
    }
}

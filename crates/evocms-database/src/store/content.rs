//! Items, comments, chapters and tags.

use async_trait::async_trait;

use evocms_core::result::AppResult;
use evocms_core::types::{ChapterId, CollectionId, CommentId, ItemId, PageRequest, PageResponse};
use evocms_entity::chapter::Chapter;
use evocms_entity::comment::Comment;
use evocms_entity::item::{Attachment, Item, TypeUsage};
use evocms_entity::tag::TagCount;

/// Filter for published item listings.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    /// Collection to list.
    pub coll_id: CollectionId,
    /// Restrict to types with this usage.
    pub usage: Option<TypeUsage>,
    /// Restrict to these type ids.
    pub type_ids: Option<Vec<i32>>,
    /// Case-insensitive substring of title or content.
    pub keywords: Option<String>,
    /// Restrict to items carrying this tag.
    pub tag: Option<String>,
}

/// Read access to items and their attachments.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// One page of published items, newest first.
    async fn list_published(
        &self,
        query: &ItemQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>>;

    /// Find an item by id regardless of collection or status.
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>>;

    /// Attachments of an item ordered by `order`.
    async fn attachments(&self, item_id: ItemId) -> AppResult<Vec<Attachment>>;

    /// Published items of a collection whose title or content contains any
    /// of `keywords` (case-insensitive).
    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Item>>;

    /// Tags used by published items of a collection whose name contains any
    /// of `keywords`, with their post counts.
    async fn find_matching_tags(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<TagCount>>;
}

/// Read access to comments.
#[async_trait]
pub trait CommentStore: Send + Sync + 'static {
    /// Find a comment by id.
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>>;

    /// Published comments on items of a collection whose content contains
    /// any of `keywords`.
    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Comment>>;
}

/// Read access to chapters.
#[async_trait]
pub trait ChapterStore: Send + Sync + 'static {
    /// Find a chapter by id.
    async fn find_by_id(&self, id: ChapterId) -> AppResult<Option<Chapter>>;

    /// Chapters of a collection whose name or description contains any of
    /// `keywords`.
    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Chapter>>;
}

//! Collection lookup and membership.

use async_trait::async_trait;

use evocms_core::result::AppResult;
use evocms_core::types::{CollectionId, UserId};
use evocms_entity::collection::Collection;

/// Read access to collections.
#[async_trait]
pub trait CollectionStore: Send + Sync + 'static {
    /// Find a collection by id.
    async fn find_by_id(&self, id: CollectionId) -> AppResult<Option<Collection>>;

    /// Find a collection by URL name.
    async fn find_by_urlname(&self, urlname: &str) -> AppResult<Option<Collection>>;

    /// All collections ordered by `sort_order`, then id.
    async fn list_all(&self) -> AppResult<Vec<Collection>>;

    /// Whether `user_id` is a member of `coll_id`.
    async fn is_member(&self, coll_id: CollectionId, user_id: UserId) -> AppResult<bool>;
}

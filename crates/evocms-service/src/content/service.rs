//! Item listing and lookup.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use evocms_core::config::{ApiConfig, MediaConfig};
use evocms_core::result::AppResult;
use evocms_core::types::{ItemId, PageRequest, PageResponse};
use evocms_database::store::{ItemQuery, ItemStore};
use evocms_entity::collection::Collection;
use evocms_entity::item::{Item, ItemStatus, TypeUsage};

use super::attachments::{self, AttachmentView};

/// Filters of an item list request.
#[derive(Debug, Clone, Default)]
pub struct ItemListRequest {
    /// Requested page (1-based).
    pub page: u64,
    /// Requested page size; the configured default when `None`.
    pub per_page: Option<u64>,
    /// Only these type ids.
    pub type_ids: Option<Vec<i32>>,
    /// Substring of title or content.
    pub keywords: Option<String>,
    /// Only items carrying this tag.
    pub tag: Option<String>,
    /// Only regular posts (no pages, intros, sidebar links or ads).
    pub posts_only: bool,
}

/// An item as exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    /// Item id.
    pub id: ItemId,
    /// Issue date, `YYYY-MM-DD HH:MM:SS`.
    pub datestart: String,
    /// URL slug.
    pub urltitle: String,
    /// Type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Stored excerpt.
    pub excerpt: String,
    /// Permanent URL.
    #[serde(rename = "URL")]
    pub url: String,
    /// Attached files that exist on disk.
    pub attachments: Vec<AttachmentView>,
}

/// Reads published items of a collection.
#[derive(Clone)]
pub struct ContentService {
    items: Arc<dyn ItemStore>,
    api: ApiConfig,
    media: MediaConfig,
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("api", &self.api)
            .field("media", &self.media)
            .finish()
    }
}

impl ContentService {
    /// Creates a new content service.
    pub fn new(items: Arc<dyn ItemStore>, api: ApiConfig, media: MediaConfig) -> Self {
        Self { items, api, media }
    }

    /// Page request for the given raw paging parameters.
    pub fn page_request(&self, page: u64, per_page: Option<u64>) -> PageRequest {
        PageRequest::new(
            page,
            per_page.unwrap_or(self.api.default_per_page),
            self.api.max_per_page,
        )
    }

    /// One page of published items, newest first.
    pub async fn list(
        &self,
        collection: &Collection,
        request: &ItemListRequest,
    ) -> AppResult<PageResponse<ItemView>> {
        let query = ItemQuery {
            coll_id: collection.id,
            usage: request.posts_only.then_some(TypeUsage::Post),
            type_ids: request.type_ids.clone(),
            keywords: request.keywords.clone().filter(|k| !k.trim().is_empty()),
            tag: request.tag.clone().filter(|t| !t.trim().is_empty()),
        };
        let page = self.page_request(request.page, request.per_page);
        let items = self.items.list_published(&query, &page).await?;
        debug!(
            coll = %collection.urlname,
            found = items.total_items,
            page = items.page,
            "Listed items"
        );

        let mut views = Vec::with_capacity(items.items.len());
        for item in &items.items {
            views.push(self.view(collection, item).await?);
        }
        Ok(PageResponse {
            items: views,
            page: items.page,
            page_size: items.page_size,
            total_items: items.total_items,
            total_pages: items.total_pages,
        })
    }

    /// A single published item of `collection`.
    pub async fn get(
        &self,
        collection: &Collection,
        id: ItemId,
        posts_only: bool,
    ) -> AppResult<Option<ItemView>> {
        let Some(item) = self.items.find_by_id(id).await? else {
            return Ok(None);
        };
        if item.coll_id != collection.id
            || item.status != ItemStatus::Published
            || (posts_only && !item.type_usage.is_content())
        {
            return Ok(None);
        }
        Ok(Some(self.view(collection, &item).await?))
    }

    /// Permanent URL of an item of `collection`.
    pub fn item_url(&self, collection: &Collection, item: &Item) -> String {
        item.permanent_url(&self.api.base_url, &collection.urlname)
    }

    async fn view(&self, collection: &Collection, item: &Item) -> AppResult<ItemView> {
        let rows = self.items.attachments(item.id).await?;
        let attachments = attachments::resolve(
            item.id,
            rows,
            &PathBuf::from(&self.media.root),
            &self.media.base_url,
        )
        .await;

        Ok(ItemView {
            id: item.id,
            datestart: item.datestart.format("%Y-%m-%d %H:%M:%S").to_string(),
            urltitle: item.urltitle.clone(),
            kind: item.type_name.clone(),
            title: item.title.clone(),
            content: item.content.clone(),
            excerpt: item.excerpt.clone(),
            url: self.item_url(collection, item),
            attachments,
        })
    }
}

//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{ChapterId, CollectionId, ItemId, UserId};

use super::item_type::TypeUsage;

/// Publication status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Publicly visible.
    Published,
    /// Work in progress.
    Draft,
    /// Deleted.
    Trash,
}

/// A content item joined with its type information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Owning collection.
    pub coll_id: CollectionId,
    /// Main chapter, if any.
    pub main_chapter_id: Option<ChapterId>,
    /// Author.
    pub creator_user_id: Option<UserId>,
    /// Publication status.
    pub status: ItemStatus,
    /// Issue date.
    pub datestart: DateTime<Utc>,
    /// URL slug.
    pub urltitle: String,
    /// Type identifier.
    pub type_id: i32,
    /// Type display name.
    pub type_name: String,
    /// Type usage.
    pub type_usage: TypeUsage,
    /// Title.
    pub title: String,
    /// Rendered HTML body.
    pub content: String,
    /// Explicit excerpt; empty when not set.
    pub excerpt: String,
}

impl Item {
    /// Permanent URL of the item inside the collection `coll_urlname`.
    pub fn permanent_url(&self, base_url: &str, coll_urlname: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            coll_urlname,
            self.urltitle
        )
    }
}

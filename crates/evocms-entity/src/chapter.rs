//! Chapter (category) entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{ChapterId, CollectionId};

/// A category inside a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Chapter {
    /// Unique chapter identifier.
    pub id: ChapterId,
    /// Owning collection.
    pub coll_id: CollectionId,
    /// Parent chapter.
    pub parent_id: Option<ChapterId>,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub urlname: String,
    /// Description.
    pub description: String,
}

impl Chapter {
    /// Permanent URL of the chapter inside `coll_urlname`.
    pub fn permanent_url(&self, base_url: &str, coll_urlname: &str) -> String {
        format!(
            "{}/{}/{}/",
            base_url.trim_end_matches('/'),
            coll_urlname,
            self.urlname
        )
    }
}

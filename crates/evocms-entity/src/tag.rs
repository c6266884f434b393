//! Item tags.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tag attached to one or more items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Tag identifier.
    pub id: i64,
    /// Tag name, unique.
    pub name: String,
}

/// A tag with the number of published posts of a collection carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TagCount {
    /// Tag identifier.
    pub id: i64,
    /// Tag name.
    pub name: String,
    /// Number of tagged posts.
    pub post_count: i64,
}

impl TagCount {
    /// Tag page URL given the front page URL of a collection.
    pub fn permanent_url(&self, coll_url: &str) -> String {
        format!("{}?tag={}", coll_url, self.name)
    }
}

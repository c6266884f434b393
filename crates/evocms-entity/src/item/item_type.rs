//! Item types and what they are used for.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What an item type is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "type_usage", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TypeUsage {
    /// Regular content post.
    Post,
    /// Standalone page.
    Page,
    /// Intro shown on top of lists.
    Intro,
    /// Sidebar link.
    Sidebar,
    /// Advertisement.
    Ad,
}

impl TypeUsage {
    /// Whether items of this usage are regular content posts.
    pub fn is_content(&self) -> bool {
        matches!(self, Self::Post)
    }
}

/// A row of the `item_types` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemType {
    /// Type identifier.
    pub id: i32,
    /// Display name, e.g. `Post`, `Page`.
    pub name: String,
    /// Usage class.
    pub usage: TypeUsage,
}

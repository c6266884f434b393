//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{CommentId, ItemId};

/// Moderation status of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "comment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    /// Visible.
    Published,
    /// Waiting for moderation.
    Review,
    /// Deleted.
    Trash,
}

/// A comment on an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Item the comment belongs to.
    pub item_id: ItemId,
    /// Author display name.
    pub author: String,
    /// HTML body.
    pub content: String,
    /// Moderation status.
    pub status: CommentStatus,
    /// Posting time.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Permanent URL given the permanent URL of the parent item.
    pub fn permanent_url(&self, item_url: &str) -> String {
        format!("{}#c{}", item_url, self.id)
    }
}

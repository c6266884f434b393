//! Session table row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{SessionId, UserId};

/// A row of the `sessions` table.
///
/// `key` is `None` once the session has been logged out; such a row can
/// never be resumed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    /// Numeric session identifier (first half of the cookie).
    pub id: SessionId,
    /// Random key (second half of the cookie).
    pub key: Option<String>,
    /// JSON-encoded [`super::SessionData`], `NULL` when empty.
    pub data: Option<String>,
    /// Attached user, if any.
    pub user_id: Option<UserId>,
    /// Address of the last request that saved the row.
    pub ip_address: String,
    /// When the session was last saved.
    pub last_seen: DateTime<Utc>,
}

/// Data required to insert a fresh session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    /// Random session key.
    pub key: String,
    /// Client address.
    pub ip_address: String,
    /// Creation time.
    pub last_seen: DateTime<Utc>,
}

/// Full overwrite of the mutable columns of a session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// Row to update.
    pub id: SessionId,
    /// New key, `None` on logout.
    pub key: Option<String>,
    /// Encoded data, `None` when empty.
    pub data: Option<String>,
    /// Attached user.
    pub user_id: Option<UserId>,
    /// Client address.
    pub ip_address: String,
    /// Save time.
    pub last_seen: DateTime<Utc>,
}

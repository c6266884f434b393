//! Hit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{HitId, SessionId};

/// A logged request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hit {
    /// Row identifier.
    pub id: HitId,
    /// Session the request belonged to.
    pub session_id: SessionId,
    /// Requested URI (path and query).
    pub uri: String,
    /// `Referer` header, if any.
    pub referer: Option<String>,
    /// Client address.
    pub ip_address: String,
    /// `User-Agent` header, if any.
    pub user_agent: Option<String>,
    /// When the request arrived.
    pub created_at: DateTime<Utc>,
}

/// Data required to log a hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHit {
    /// Session the request belonged to.
    pub session_id: SessionId,
    /// Requested URI.
    pub uri: String,
    /// `Referer` header.
    pub referer: Option<String>,
    /// Client address.
    pub ip_address: String,
    /// `User-Agent` header.
    pub user_agent: Option<String>,
    /// Arrival time.
    pub created_at: DateTime<Utc>,
}

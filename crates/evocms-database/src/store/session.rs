//! Session and hit persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use evocms_core::result::AppResult;
use evocms_core::types::{HitId, SessionId};
use evocms_entity::hit::NewHit;
use evocms_entity::session::{NewSession, SessionRow, SessionUpdate};

/// Persistence for session rows.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Find a session by id and key that was seen strictly after `since`.
    async fn find_active(
        &self,
        id: SessionId,
        key: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Option<SessionRow>>;

    /// Insert a fresh row and return its id.
    async fn insert(&self, session: &NewSession) -> AppResult<SessionId>;

    /// Overwrite the mutable columns of a row.
    async fn update(&self, update: &SessionUpdate) -> AppResult<()>;

    /// Read the raw data column of a row. `Ok(None)` covers both a missing
    /// row and a `NULL` column.
    async fn load_data(&self, id: SessionId) -> AppResult<Option<String>>;

    /// Delete rows last seen before `cutoff`; returns the number removed.
    async fn delete_seen_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

/// Append-only hit log.
#[async_trait]
pub trait HitStore: Send + Sync + 'static {
    /// Record one hit.
    async fn insert(&self, hit: &NewHit) -> AppResult<HitId>;

    /// Delete hits created before `cutoff`; returns the number removed.
    async fn delete_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Number of hits recorded for a session.
    async fn count_for_session(&self, session_id: SessionId) -> AppResult<u64>;
}

//! Cache backend seam.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// String key/value cache with per-entry TTL.
///
/// Keys are namespaced by the caller, so a prefix delete drops one
/// collection's entries without touching another's.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Cached value, or `None` when missing or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Remove every key starting with `prefix`; returns how many went.
    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64>;
}

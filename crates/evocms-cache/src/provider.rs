//! Cache manager wrapping the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use evocms_core::config::CacheConfig;
use evocms_core::result::AppResult;
use evocms_core::traits::cache::CacheProvider;

use crate::memory::MemoryCacheProvider;

/// Cache manager that wraps the active cache provider.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
    block_ttl: Duration,
}

impl CacheManager {
    /// Create a cache manager backed by the moka provider.
    pub fn new(config: &CacheConfig) -> Self {
        info!(
            max_capacity = config.max_capacity,
            block_ttl_seconds = config.block_ttl_seconds,
            "Block cache ready"
        );
        Self {
            inner: Arc::new(MemoryCacheProvider::new(config)),
            block_ttl: Duration::from_secs(config.block_ttl_seconds),
        }
    }

    /// TTL applied to rendered widget blocks.
    pub fn block_ttl(&self) -> Duration {
        self.block_ttl
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64> {
        self.inner.delete_prefix(prefix).await
    }
}

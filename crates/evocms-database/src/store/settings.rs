//! Global key/value settings.

use async_trait::async_trait;

use evocms_core::result::AppResult;

/// Persistent string settings keyed by name.
#[async_trait]
pub trait SettingsStore: Send + Sync + 'static {
    /// Read a setting.
    async fn get(&self, name: &str) -> AppResult<Option<String>>;

    /// Insert or overwrite a setting.
    async fn set(&self, name: &str, value: &str) -> AppResult<()>;
}

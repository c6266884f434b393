//! User lookup.

use async_trait::async_trait;

use evocms_core::result::AppResult;
use evocms_core::types::{PageRequest, PageResponse, UserId};
use evocms_entity::user::User;

/// Read access to users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find an open account by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// One page of open accounts ordered by login, optionally filtered by a
    /// case-insensitive substring of login, names or nickname.
    async fn list(
        &self,
        keywords: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>>;
}

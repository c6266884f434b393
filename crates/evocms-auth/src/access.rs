//! Read access to collections and the user directory.

use std::sync::Arc;

use evocms_core::config::UsersConfig;
use evocms_core::result::AppResult;
use evocms_core::types::UserId;
use evocms_database::store::CollectionStore;
use evocms_entity::collection::{AccessLevel, Collection, ListingVisibility};

/// Outcome of a collection read check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionAccess {
    /// The viewer may read the collection.
    Granted,
    /// Anonymous viewer on a non-public collection.
    RequiresLogin,
    /// Logged in, but not a member of a members-only collection.
    Denied,
}

/// Checks what the current viewer may see.
#[derive(Clone)]
pub struct AccessChecker {
    collections: Arc<dyn CollectionStore>,
    users: UsersConfig,
}

impl std::fmt::Debug for AccessChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessChecker")
            .field("users", &self.users)
            .finish()
    }
}

impl AccessChecker {
    /// Creates a new access checker.
    pub fn new(collections: Arc<dyn CollectionStore>, users: UsersConfig) -> Self {
        Self { collections, users }
    }

    /// Whether `viewer` may read the content of `collection`.
    pub async fn collection_access(
        &self,
        collection: &Collection,
        viewer: Option<UserId>,
    ) -> AppResult<CollectionAccess> {
        if collection.access == AccessLevel::Public {
            return Ok(CollectionAccess::Granted);
        }
        let Some(user_id) = viewer else {
            return Ok(CollectionAccess::RequiresLogin);
        };
        if collection.access == AccessLevel::Members
            && !self.collections.is_member(collection.id, user_id).await?
        {
            return Ok(CollectionAccess::Denied);
        }
        Ok(CollectionAccess::Granted)
    }

    /// Whether `collection` appears in the collection list shown to `viewer`.
    pub async fn is_listed(
        &self,
        collection: &Collection,
        viewer: Option<UserId>,
    ) -> AppResult<bool> {
        Ok(match (collection.listing, viewer) {
            (ListingVisibility::Public, _) => true,
            (ListingVisibility::Never, _) => false,
            (_, None) => false,
            (ListingVisibility::Logged, Some(_)) => true,
            (ListingVisibility::Member, Some(user_id)) => {
                self.collections.is_member(collection.id, user_id).await?
            }
        })
    }

    /// Whether `viewer` may browse the user directory.
    pub fn can_list_users(&self, viewer: Option<UserId>) -> bool {
        viewer.is_some() || self.users.allow_anonymous_user_list
    }

    /// Whether `viewer` may open a user profile.
    pub fn can_view_profile(&self, viewer: Option<UserId>) -> bool {
        viewer.is_some() || self.users.allow_anonymous_user_profiles
    }
}

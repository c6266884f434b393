//! Public user directory.

use std::sync::Arc;

use serde::Serialize;

use evocms_core::config::{ApiConfig, MediaConfig, UsersConfig};
use evocms_core::result::AppResult;
use evocms_core::types::{PageRequest, PageResponse, UserId};
use evocms_database::store::UserStore;
use evocms_entity::user::User;

/// Avatar size used in user lists.
pub const LIST_PICTURE_SIZE: &str = "crop-top-48x48";
/// Avatar size shown to logged in visitors on a profile.
pub const PROFILE_PICTURE_SIZE: &str = "crop-top-320x320";
/// Avatar size shown to anonymous visitors on a profile.
pub const PROFILE_PICTURE_SIZE_BLURRED: &str = "crop-top-320x320-blur-8";

/// A user row of the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    /// User id.
    pub id: UserId,
    /// Avatar URL, when avatars are enabled and the user has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Login.
    pub login: String,
    /// Full name.
    pub fullname: String,
    /// City.
    pub city: String,
}

/// A single user profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    /// User id.
    pub id: UserId,
    /// Avatar URL, when the user has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Login.
    pub login: String,
    /// Full name.
    pub fullname: String,
    /// City.
    pub city: String,
    /// One-letter gender code, empty when unknown.
    pub gender: String,
}

/// Lists and shows users.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserStore>,
    api: ApiConfig,
    config: UsersConfig,
    media: MediaConfig,
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory")
            .field("config", &self.config)
            .finish()
    }
}

impl UserDirectory {
    /// Creates a new user directory.
    pub fn new(
        users: Arc<dyn UserStore>,
        api: ApiConfig,
        config: UsersConfig,
        media: MediaConfig,
    ) -> Self {
        Self {
            users,
            api,
            config,
            media,
        }
    }

    /// One page of open accounts, optionally filtered by `keywords`.
    pub async fn list(
        &self,
        keywords: Option<&str>,
        page: u64,
        per_page: Option<u64>,
    ) -> AppResult<PageResponse<UserSummary>> {
        let request = PageRequest::new(
            page,
            per_page.unwrap_or(self.api.default_per_page),
            self.api.max_per_page,
        );
        let keywords = keywords.map(str::trim).filter(|k| !k.is_empty());
        let users = self.users.list(keywords, &request).await?;
        Ok(users.map(|user| UserSummary {
            id: user.id,
            picture: if self.config.allow_avatars {
                self.picture_url(&user, LIST_PICTURE_SIZE)
            } else {
                None
            },
            fullname: user.fullname(),
            login: user.login,
            city: user.city,
        }))
    }

    /// Profile of one open account; anonymous viewers get a blurred avatar.
    pub async fn view(&self, id: UserId, viewer_logged_in: bool) -> AppResult<Option<UserProfile>> {
        let Some(user) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };
        let size = if viewer_logged_in {
            PROFILE_PICTURE_SIZE
        } else {
            PROFILE_PICTURE_SIZE_BLURRED
        };
        Ok(Some(UserProfile {
            id: user.id,
            picture: self.picture_url(&user, size),
            fullname: user.fullname(),
            gender: user.gender.map(|g| g.code().to_string()).unwrap_or_default(),
            login: user.login,
            city: user.city,
        }))
    }

    fn picture_url(&self, user: &User, size: &str) -> Option<String> {
        let path = user.avatar_path.as_deref()?;
        Some(format!(
            "{}/{}?size={}",
            self.media.base_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
            size
        ))
    }
}

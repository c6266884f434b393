//! REST API and user directory configuration.

use serde::{Deserialize, Serialize};

/// REST API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Public base URL used to build permalinks.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default `per_page` when the request does not give one.
    #[serde(default = "default_per_page")]
    pub default_per_page: u64,
    /// Upper bound for `per_page`.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

/// Who may browse the user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersConfig {
    /// Anonymous visitors may list users.
    #[serde(default = "default_true")]
    pub allow_anonymous_user_list: bool,
    /// Anonymous visitors may view a single profile.
    #[serde(default)]
    pub allow_anonymous_user_profiles: bool,
    /// Avatars are exposed in listings.
    #[serde(default = "default_true")]
    pub allow_avatars: bool,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            allow_anonymous_user_list: true,
            allow_anonymous_user_profiles: false,
            allow_avatars: true,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_per_page() -> u64 {
    10
}

fn default_max_per_page() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

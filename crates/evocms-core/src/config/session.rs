//! Session cookie and freshness configuration.

use serde::{Deserialize, Serialize};

/// Session tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying `"<id>_<key>"`.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Cookie `Path` attribute.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// Cookie `Domain` attribute; omitted when empty.
    #[serde(default)]
    pub cookie_domain: String,
    /// Lifetime of a freshly issued cookie in seconds (~10 years).
    #[serde(default = "default_cookie_lifetime")]
    pub cookie_lifetime_seconds: i64,
    /// A session whose `lastseen` is older than this is not resumed.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: i64,
    /// Length of the random session key.
    #[serde(default = "default_key_length")]
    pub key_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
            cookie_domain: String::new(),
            cookie_lifetime_seconds: default_cookie_lifetime(),
            timeout_seconds: default_timeout(),
            key_length: default_key_length(),
        }
    }
}

fn default_cookie_name() -> String {
    "session_evocms".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_cookie_lifetime() -> i64 {
    315_360_000
}

fn default_timeout() -> i64 {
    604_800
}

fn default_key_length() -> usize {
    32
}

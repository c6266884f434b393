//! Media library configuration.

use serde::{Deserialize, Serialize};

/// Where attachment and avatar files live, and how they are addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root directory on disk for media files.
    #[serde(default = "default_root")]
    pub root: String,
    /// Public base URL under which `root` is served.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            base_url: default_base_url(),
        }
    }
}

fn default_root() -> String {
    "data/media".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080/media/".to_string()
}

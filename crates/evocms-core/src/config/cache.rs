//! Cache configuration.

use serde::{Deserialize, Serialize};

/// Widget block cache sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached blocks.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// How long a rendered widget block stays cached, in seconds.
    #[serde(default = "default_block_ttl")]
    pub block_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            block_ttl_seconds: default_block_ttl(),
        }
    }
}

fn default_max_capacity() -> u64 {
    10000
}

fn default_block_ttl() -> u64 {
    600
}

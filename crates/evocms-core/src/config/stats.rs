//! Hit logging and automatic pruning configuration.

use serde::{Deserialize, Serialize};

/// When old hits and sessions are pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneMode {
    /// Never prune automatically.
    Off,
    /// Prune inline while logging a page hit.
    Page,
    /// Prune from the scheduled task only.
    Cron,
}

impl Default for PruneMode {
    fn default() -> Self {
        Self::Page
    }
}

impl std::fmt::Display for PruneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneMode::Off => write!(f, "off"),
            PruneMode::Page => write!(f, "page"),
            PruneMode::Cron => write!(f, "cron"),
        }
    }
}

/// Statistics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Whether requests are recorded in the hit log.
    #[serde(default = "default_true")]
    pub log_hits: bool,
    /// Automatic prune mode.
    #[serde(default)]
    pub auto_prune_mode: PruneMode,
    /// Hits and sessions older than this many days are pruned.
    #[serde(default = "default_prune_days")]
    pub auto_prune_days: i64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            log_hits: true,
            auto_prune_mode: PruneMode::default(),
            auto_prune_days: default_prune_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_prune_days() -> i64 {
    15
}

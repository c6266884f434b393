//! Scheduled task configuration.

use serde::{Deserialize, Serialize};

/// Cron scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression for the hit/session prune job.
    #[serde(default = "default_prune_schedule")]
    pub prune_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prune_schedule: default_prune_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_prune_schedule() -> String {
    "0 30 3 * * *".to_string()
}

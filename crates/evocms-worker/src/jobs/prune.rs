//! Hit and session pruning task.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use evocms_core::config::PruneMode;
use evocms_service::{Hitlist, PruneOutcome};

use crate::executor::{JobExecutionError, JobHandler, JobOutcome};

/// Controller name of the task.
pub const PRUNE_CONTROLLER: &str = "prune_hits_sessions";

/// Prunes old hits and sessions when pruning is set to run from cron.
#[derive(Debug)]
pub struct PruneHitsSessionsJob {
    hitlist: Arc<Hitlist>,
}

impl PruneHitsSessionsJob {
    /// Create the task.
    pub fn new(hitlist: Arc<Hitlist>) -> Self {
        Self { hitlist }
    }
}

#[async_trait]
impl JobHandler for PruneHitsSessionsJob {
    fn controller(&self) -> &str {
        PRUNE_CONTROLLER
    }

    async fn execute(&self, now: DateTime<Utc>) -> Result<JobOutcome, JobExecutionError> {
        if self.hitlist.config().auto_prune_mode != PruneMode::Cron {
            return Ok(JobOutcome::skip(
                "Auto pruning is not set to run as a scheduled task",
            ));
        }

        Ok(match self.hitlist.dbprune(now).await? {
            PruneOutcome::Pruned { hits, sessions } => {
                JobOutcome::ok(format!("Pruned {hits} hits and {sessions} sessions"))
            }
            PruneOutcome::AlreadyDone => JobOutcome::skip("Statistics were already pruned today"),
        })
    }
}

//! Job registry: dispatches scheduled tasks to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use evocms_core::error::AppError;

/// Result code of a task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobResult {
    /// The task did its work.
    Ok,
    /// Nothing to do.
    Skip,
    /// The task failed.
    Error,
}

impl JobResult {
    /// Numeric code stored with the task log.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 1,
            Self::Skip => 2,
            Self::Error => 100,
        }
    }
}

/// Outcome of a task run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    /// Result code.
    pub result: JobResult,
    /// Human-readable message, empty when there is nothing to say.
    pub message: String,
}

impl JobOutcome {
    /// Successful run.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            result: JobResult::Ok,
            message: message.into(),
        }
    }

    /// Skipped run.
    pub fn skip(message: impl Into<String>) -> Self {
        Self {
            result: JobResult::Skip,
            message: message.into(),
        }
    }

    /// Failed run.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: JobResult::Error,
            message: message.into(),
        }
    }
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// No handler is registered under that controller
    #[error("Unknown job controller '{0}'")]
    UnknownController(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Trait for scheduled task implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Controller name the task is registered under
    fn controller(&self) -> &str;

    /// Run the task
    async fn execute(&self, now: DateTime<Utc>) -> Result<JobOutcome, JobExecutionError>;
}

/// Runs tasks by controller name
#[derive(Debug, Default)]
pub struct JobRegistry {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task handler
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let controller = handler.controller().to_string();
        tracing::info!("Registered job handler for controller '{}'", controller);
        self.handlers.insert(controller, handler);
    }

    /// Whether a handler is registered for `controller`
    pub fn has_handler(&self, controller: &str) -> bool {
        self.handlers.contains_key(controller)
    }

    /// Registered controller names, sorted
    pub fn controllers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Run `controller`; failures become an `Error` outcome.
    pub async fn run(&self, controller: &str, now: DateTime<Utc>) -> JobOutcome {
        let result = match self.handlers.get(controller) {
            Some(handler) => handler.execute(now).await,
            None => Err(JobExecutionError::UnknownController(controller.to_string())),
        };

        let outcome = result.unwrap_or_else(|e| JobOutcome::error(e.to_string()));
        match outcome.result {
            JobResult::Error => tracing::error!(
                controller,
                code = outcome.result.code(),
                message = %outcome.message,
                "Scheduled task failed"
            ),
            _ => tracing::info!(
                controller,
                code = outcome.result.code(),
                message = %outcome.message,
                "Scheduled task finished"
            ),
        }
        outcome
    }
}

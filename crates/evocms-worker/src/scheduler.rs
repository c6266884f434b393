//! Cron scheduler for periodic tasks.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use evocms_core::config::WorkerConfig;
use evocms_core::error::AppError;

use crate::executor::JobRegistry;
use crate::jobs::prune::PRUNE_CONTROLLER;

/// Cron-based scheduler running tasks from a [`JobRegistry`]
pub struct CronScheduler {
    scheduler: JobScheduler,
    registry: Arc<JobRegistry>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("registry", &self.registry)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(registry: Arc<JobRegistry>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            registry,
        })
    }

    /// Register the built-in tasks on their configured schedules
    pub async fn register_default_tasks(&self, config: &WorkerConfig) -> Result<(), AppError> {
        self.register_task(PRUNE_CONTROLLER, &config.prune_schedule)
            .await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Run `controller` on a six-field cron `schedule`
    pub async fn register_task(&self, controller: &str, schedule: &str) -> Result<(), AppError> {
        if !self.registry.has_handler(controller) {
            return Err(AppError::configuration(format!(
                "No job handler registered for '{controller}'"
            )));
        }

        let registry = Arc::clone(&self.registry);
        let name = controller.to_string();
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let registry = Arc::clone(&registry);
            let name = name.clone();
            Box::pin(async move {
                tracing::debug!("Running scheduled task {}", name);
                registry.run(&name, Utc::now()).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid schedule '{schedule}' for {controller}: {e}"
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {controller} schedule: {e}")))?;

        tracing::info!("Registered: {} ({})", controller, schedule);
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unregistered_controller_rejected() {
        let scheduler = CronScheduler::new(Arc::new(JobRegistry::new()))
            .await
            .unwrap();
        let err = scheduler
            .register_task(PRUNE_CONTROLLER, "0 30 3 * * *")
            .await
            .unwrap_err();
        assert_eq!(err.kind, evocms_core::error::ErrorKind::Configuration);
    }
}

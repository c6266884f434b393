//! Scheduled tasks for evocms.
//!
//! This crate provides:
//! - A job registry that runs a task by controller name and reports a
//!   numeric result code
//! - A cron scheduler that triggers registered tasks
//! - The hit and session pruning task

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobHandler, JobOutcome, JobRegistry, JobResult};
pub use scheduler::CronScheduler;

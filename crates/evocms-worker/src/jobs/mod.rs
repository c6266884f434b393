//! Built-in scheduled tasks.

pub mod prune;

pub use prune::PruneHitsSessionsJob;

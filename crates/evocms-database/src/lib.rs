//! # evocms-database
//!
//! PostgreSQL connection management, the store traits the services are
//! written against, their PostgreSQL repositories, and an in-memory
//! backend used by tests and `memory://` deployments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryBackend;
pub use stores::Stores;

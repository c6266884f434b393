//! Core traits defined in `evocms-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;

//! # evocms-cache
//!
//! In-process cache for evocms backed by
//! [moka](https://crates.io/crates/moka), plus the key builders used for
//! every cached entry (rendered widget blocks first of all).

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;

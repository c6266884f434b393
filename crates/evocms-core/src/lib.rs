//! # evocms-core
//!
//! Core crate for evocms. Contains configuration schemas, typed
//! identifiers, pagination types, shared traits, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other evocms crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

//! Collections (blogs): the tenants of the platform.

pub mod access;
pub mod model;

pub use access::{AccessLevel, ListingVisibility};
pub use model::Collection;

//! Users and collection membership.

pub mod model;

pub use model::{Gender, User};

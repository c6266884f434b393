//! Axum middleware stack.

pub mod cors;
pub mod logging;
pub mod session;

pub use session::SessionHandle;

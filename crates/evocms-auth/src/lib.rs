//! # evocms-auth
//!
//! Visitor sessions and access control for evocms.
//!
//! ## Modules
//!
//! - `session`: cookie codec, session lifecycle, flash messages, manager
//! - `access`: collection read access, collection listing and user
//!   directory permissions

pub mod access;
pub mod session;

pub use access::{AccessChecker, CollectionAccess};
pub use session::{CookieDirective, Messages, Session, SessionCookie, SessionManager};

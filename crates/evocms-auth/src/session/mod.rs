//! Visitor session lifecycle: cookie, state, flash messages and the
//! per-request manager.

pub mod cookie;
pub mod key;
pub mod manager;
pub mod messages;
pub mod state;

pub use cookie::{CookieDirective, SessionCookie};
pub use manager::SessionManager;
pub use messages::{Message, MessageLevel, Messages};
pub use state::Session;

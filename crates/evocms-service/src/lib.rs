//! # evocms-service
//!
//! Business logic for evocms. Each service is built from the store traits
//! of `evocms-database` plus configuration, so the same code runs against
//! PostgreSQL and the in-memory backend.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod content;
pub mod context;
pub mod html;
pub mod search;
pub mod stats;
pub mod users;
pub mod widget;

pub use content::{ContentService, ItemListRequest, ItemView};
pub use context::RequestContext;
pub use search::{SearchKind, SearchPage, SearchService};
pub use stats::{Hitlist, PruneOutcome};
pub use users::UserDirectory;
pub use widget::WidgetRenderer;

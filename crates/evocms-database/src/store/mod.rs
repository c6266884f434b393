//! Storage traits.
//!
//! Services only see these traits; [`crate::repositories`] implements them
//! over PostgreSQL and [`crate::memory::MemoryBackend`] in process.

pub mod collection;
pub mod content;
pub mod session;
pub mod settings;
pub mod user;
pub mod widget;

pub use collection::CollectionStore;
pub use content::{ChapterStore, CommentStore, ItemQuery, ItemStore};
pub use session::{HitStore, SessionStore};
pub use settings::SettingsStore;
pub use user::UserStore;
pub use widget::WidgetStore;

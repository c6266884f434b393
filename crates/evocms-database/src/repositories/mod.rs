//! PostgreSQL implementations of the store traits.

pub mod collection;
pub mod content;
pub mod hit;
pub mod session;
pub mod settings;
pub mod user;
pub mod widget;

pub use collection::CollectionRepository;
pub use content::{ChapterRepository, CommentRepository, ItemRepository};
pub use hit::HitRepository;
pub use session::SessionRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
pub use widget::WidgetRepository;

/// Turn keywords into `ILIKE` patterns.
pub(crate) fn like_patterns(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| format!("%{k}%")).collect()
}

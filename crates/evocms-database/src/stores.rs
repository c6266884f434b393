//! Bundle of every store behind trait objects.

use std::sync::Arc;

use sqlx::PgPool;

use crate::memory::MemoryBackend;
use crate::repositories::{
    ChapterRepository, CollectionRepository, CommentRepository, HitRepository, ItemRepository,
    SessionRepository, SettingsRepository, UserRepository, WidgetRepository,
};
use crate::store::{
    ChapterStore, CollectionStore, CommentStore, HitStore, ItemStore, SessionStore, SettingsStore,
    UserStore, WidgetStore,
};

/// Every store the services need, cheap to clone.
#[derive(Clone)]
pub struct Stores {
    /// Session rows.
    pub sessions: Arc<dyn SessionStore>,
    /// Hit log.
    pub hits: Arc<dyn HitStore>,
    /// Global settings.
    pub settings: Arc<dyn SettingsStore>,
    /// Collections and membership.
    pub collections: Arc<dyn CollectionStore>,
    /// Items, attachments and tags.
    pub items: Arc<dyn ItemStore>,
    /// Comments.
    pub comments: Arc<dyn CommentStore>,
    /// Chapters.
    pub chapters: Arc<dyn ChapterStore>,
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Widget containers and widgets.
    pub widgets: Arc<dyn WidgetStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            sessions: Arc::new(SessionRepository::new(pool.clone())),
            hits: Arc::new(HitRepository::new(pool.clone())),
            settings: Arc::new(SettingsRepository::new(pool.clone())),
            collections: Arc::new(CollectionRepository::new(pool.clone())),
            items: Arc::new(ItemRepository::new(pool.clone())),
            comments: Arc::new(CommentRepository::new(pool.clone())),
            chapters: Arc::new(ChapterRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            widgets: Arc::new(WidgetRepository::new(pool)),
        }
    }

    /// Every store served by one in-memory backend.
    pub fn memory(backend: Arc<MemoryBackend>) -> Self {
        Self {
            sessions: backend.clone(),
            hits: backend.clone(),
            settings: backend.clone(),
            collections: backend.clone(),
            items: backend.clone(),
            comments: backend.clone(),
            chapters: backend.clone(),
            users: backend.clone(),
            widgets: backend,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

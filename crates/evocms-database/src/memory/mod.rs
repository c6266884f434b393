//! In-process backend implementing every store trait over `DashMap`s.
//!
//! Used by the test suites and by `database.url = "memory://"`
//! deployments. Rows are seeded through the `insert_*` methods.

mod stores;

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::{DashMap, DashSet};

use evocms_core::types::{
    ChapterId, CollectionId, CommentId, ContainerId, FileId, HitId, ItemId, LinkId, SessionId,
    UserId, WidgetId,
};
use evocms_entity::chapter::Chapter;
use evocms_entity::collection::Collection;
use evocms_entity::comment::Comment;
use evocms_entity::hit::Hit;
use evocms_entity::item::{Item, MediaFile};
use evocms_entity::session::SessionRow;
use evocms_entity::tag::Tag;
use evocms_entity::user::User;
use evocms_entity::widget::{Widget, WidgetContainer};

#[derive(Debug, Clone)]
struct LinkRow {
    id: LinkId,
    item_id: ItemId,
    file_id: Option<FileId>,
    position: String,
    order: i32,
}

/// All tables of the schema held in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    next_id: AtomicI64,
    sessions: DashMap<SessionId, SessionRow>,
    hits: DashMap<HitId, Hit>,
    settings: DashMap<String, String>,
    collections: DashMap<CollectionId, Collection>,
    members: DashSet<(CollectionId, UserId)>,
    items: DashMap<ItemId, Item>,
    tags: DashMap<i64, Tag>,
    item_tags: DashSet<(ItemId, i64)>,
    files: DashMap<FileId, MediaFile>,
    links: DashMap<LinkId, LinkRow>,
    comments: DashMap<CommentId, Comment>,
    chapters: DashMap<ChapterId, Chapter>,
    users: DashMap<UserId, User>,
    containers: DashMap<ContainerId, WidgetContainer>,
    widgets: DashMap<WidgetId, Widget>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Insert or replace a collection.
    pub fn insert_collection(&self, collection: Collection) {
        self.collections.insert(collection.id, collection);
    }

    /// Make a user a member of a collection.
    pub fn add_member(&self, coll_id: CollectionId, user_id: UserId) {
        self.members.insert((coll_id, user_id));
    }

    /// Insert or replace an item.
    pub fn insert_item(&self, item: Item) {
        self.items.insert(item.id, item);
    }

    /// Remove an item and its links.
    pub fn remove_item(&self, id: ItemId) {
        self.items.remove(&id);
        self.links.retain(|_, link| link.item_id != id);
        self.item_tags.retain(|(item_id, _)| *item_id != id);
    }

    /// Attach a tag to an item, creating the tag when needed; returns the
    /// tag id.
    pub fn tag_item(&self, item_id: ItemId, name: &str) -> i64 {
        let existing = self
            .tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id);
        let tag_id = existing.unwrap_or_else(|| {
            let id = self.allocate_id();
            self.tags.insert(
                id,
                Tag {
                    id,
                    name: name.to_string(),
                },
            );
            id
        });
        self.item_tags.insert((item_id, tag_id));
        tag_id
    }

    /// Insert or replace a media file.
    pub fn insert_file(&self, file: MediaFile) {
        self.files.insert(file.id, file);
    }

    /// Link a file to an item; returns the link id.
    pub fn insert_link(
        &self,
        item_id: ItemId,
        file_id: Option<FileId>,
        position: &str,
        order: i32,
    ) -> LinkId {
        let id = LinkId(self.allocate_id());
        self.links.insert(
            id,
            LinkRow {
                id,
                item_id,
                file_id,
                position: position.to_string(),
                order,
            },
        );
        id
    }

    /// Insert or replace a comment.
    pub fn insert_comment(&self, comment: Comment) {
        self.comments.insert(comment.id, comment);
    }

    /// Insert or replace a chapter.
    pub fn insert_chapter(&self, chapter: Chapter) {
        self.chapters.insert(chapter.id, chapter);
    }

    /// Insert or replace a user.
    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Insert or replace a widget container.
    pub fn insert_container(&self, container: WidgetContainer) {
        self.containers.insert(container.id, container);
    }

    /// Insert or replace a widget.
    pub fn insert_widget(&self, widget: Widget) {
        self.widgets.insert(widget.id, widget);
    }

    /// Snapshot of a session row.
    pub fn session(&self, id: SessionId) -> Option<SessionRow> {
        self.sessions.get(&id).map(|r| r.clone())
    }

    /// Overwrite a session row, e.g. to age it in tests.
    pub fn put_session(&self, row: SessionRow) {
        self.sessions.insert(row.id, row);
    }

    /// Number of session rows.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of logged hits.
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Overwrite a hit row, e.g. to age it in tests.
    pub fn put_hit(&self, hit: Hit) {
        self.hits.insert(hit.id, hit);
    }
}

/// Whether `haystack` contains `needle`, ignoring case.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether `haystack` contains any of `needles`, ignoring case.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| contains_ci(haystack, n))
}

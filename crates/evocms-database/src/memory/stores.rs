//! Store trait implementations for [`MemoryBackend`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use evocms_core::result::AppResult;
use evocms_core::types::{
    ChapterId, CollectionId, CommentId, ContainerId, HitId, ItemId, PageRequest, PageResponse,
    SessionId, UserId,
};
use evocms_entity::chapter::Chapter;
use evocms_entity::collection::Collection;
use evocms_entity::comment::{Comment, CommentStatus};
use evocms_entity::hit::{Hit, NewHit};
use evocms_entity::item::{Attachment, Item, ItemStatus};
use evocms_entity::session::{NewSession, SessionRow, SessionUpdate};
use evocms_entity::tag::TagCount;
use evocms_entity::user::User;
use evocms_entity::widget::{Widget, WidgetContainer};

use super::{MemoryBackend, contains_any, contains_ci};
use crate::store::{
    ChapterStore, CollectionStore, CommentStore, HitStore, ItemQuery, ItemStore, SessionStore,
    SettingsStore, UserStore, WidgetStore,
};

fn paginate<T>(mut rows: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = rows.len() as u64;
    let start = (page.offset() as usize).min(rows.len());
    let end = start.saturating_add(page.limit() as usize).min(rows.len());
    let items: Vec<T> = rows.drain(start..end).collect();
    PageResponse::new(items, page.page, page.page_size, total)
}

#[async_trait]
impl SessionStore for MemoryBackend {
    async fn find_active(
        &self,
        id: SessionId,
        key: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Option<SessionRow>> {
        Ok(self
            .sessions
            .get(&id)
            .filter(|row| row.key.as_deref() == Some(key) && row.last_seen > since)
            .map(|row| row.clone()))
    }

    async fn insert(&self, session: &NewSession) -> AppResult<SessionId> {
        let id = SessionId(self.allocate_id());
        self.sessions.insert(
            id,
            SessionRow {
                id,
                key: Some(session.key.clone()),
                data: None,
                user_id: None,
                ip_address: session.ip_address.clone(),
                last_seen: session.last_seen,
            },
        );
        Ok(id)
    }

    async fn update(&self, update: &SessionUpdate) -> AppResult<()> {
        if let Some(mut row) = self.sessions.get_mut(&update.id) {
            row.key = update.key.clone();
            row.data = update.data.clone();
            row.user_id = update.user_id;
            row.ip_address = update.ip_address.clone();
            row.last_seen = update.last_seen;
        }
        Ok(())
    }

    async fn load_data(&self, id: SessionId) -> AppResult<Option<String>> {
        Ok(self.sessions.get(&id).and_then(|row| row.data.clone()))
    }

    async fn delete_seen_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.sessions.retain(|_, row| {
            let keep = row.last_seen >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[async_trait]
impl HitStore for MemoryBackend {
    async fn insert(&self, hit: &NewHit) -> AppResult<HitId> {
        let id = HitId(self.allocate_id());
        self.hits.insert(
            id,
            Hit {
                id,
                session_id: hit.session_id,
                uri: hit.uri.clone(),
                referer: hit.referer.clone(),
                ip_address: hit.ip_address.clone(),
                user_agent: hit.user_agent.clone(),
                created_at: hit.created_at,
            },
        );
        Ok(id)
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.hits.retain(|_, hit| {
            let keep = hit.created_at >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn count_for_session(&self, session_id: SessionId) -> AppResult<u64> {
        Ok(self
            .hits
            .iter()
            .filter(|h| h.session_id == session_id)
            .count() as u64)
    }
}

#[async_trait]
impl SettingsStore for MemoryBackend {
    async fn get(&self, name: &str) -> AppResult<Option<String>> {
        Ok(self.settings.get(name).map(|v| v.clone()))
    }

    async fn set(&self, name: &str, value: &str) -> AppResult<()> {
        self.settings.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for MemoryBackend {
    async fn find_by_id(&self, id: CollectionId) -> AppResult<Option<Collection>> {
        Ok(self.collections.get(&id).map(|c| c.clone()))
    }

    async fn find_by_urlname(&self, urlname: &str) -> AppResult<Option<Collection>> {
        Ok(self
            .collections
            .iter()
            .find(|c| c.urlname == urlname)
            .map(|c| c.clone()))
    }

    async fn list_all(&self) -> AppResult<Vec<Collection>> {
        let mut all: Vec<Collection> = self.collections.iter().map(|c| c.clone()).collect();
        all.sort_by_key(|c| (c.sort_order, c.id));
        Ok(all)
    }

    async fn is_member(&self, coll_id: CollectionId, user_id: UserId) -> AppResult<bool> {
        Ok(self.members.contains(&(coll_id, user_id)))
    }
}

impl MemoryBackend {
    fn item_has_tag(&self, item_id: ItemId, name: &str) -> bool {
        self.tags
            .iter()
            .filter(|t| t.name == name)
            .any(|t| self.item_tags.contains(&(item_id, t.id)))
    }

    fn published_items(&self, coll_id: CollectionId) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|i| i.coll_id == coll_id && i.status == ItemStatus::Published)
            .map(|i| i.clone())
            .collect();
        items.sort_by(|a, b| b.datestart.cmp(&a.datestart).then(b.id.cmp(&a.id)));
        items
    }
}

#[async_trait]
impl ItemStore for MemoryBackend {
    async fn list_published(
        &self,
        query: &ItemQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Item>> {
        let rows: Vec<Item> = self
            .published_items(query.coll_id)
            .into_iter()
            .filter(|i| query.usage.is_none_or(|u| i.type_usage == u))
            .filter(|i| {
                query
                    .type_ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&i.type_id))
            })
            .filter(|i| {
                query
                    .keywords
                    .as_deref()
                    .is_none_or(|k| contains_ci(&i.title, k) || contains_ci(&i.content, k))
            })
            .filter(|i| {
                query
                    .tag
                    .as_deref()
                    .is_none_or(|t| self.item_has_tag(i.id, t))
            })
            .collect();
        Ok(paginate(rows, page))
    }

    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        Ok(self.items.get(&id).map(|i| i.clone()))
    }

    async fn attachments(&self, item_id: ItemId) -> AppResult<Vec<Attachment>> {
        let mut links: Vec<_> = self
            .links
            .iter()
            .filter(|l| l.item_id == item_id)
            .map(|l| l.clone())
            .collect();
        links.sort_by_key(|l| (l.order, l.id));
        Ok(links
            .into_iter()
            .map(|l| Attachment {
                link_id: l.id,
                item_id: l.item_id,
                file: l
                    .file_id
                    .and_then(|fid| self.files.get(&fid).map(|f| f.clone())),
                position: l.position,
                order: l.order,
            })
            .collect())
    }

    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Item>> {
        Ok(self
            .published_items(coll_id)
            .into_iter()
            .filter(|i| contains_any(&i.title, keywords) || contains_any(&i.content, keywords))
            .collect())
    }

    async fn find_matching_tags(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<TagCount>> {
        let published = self.published_items(coll_id);
        let mut tags: Vec<TagCount> = self
            .tags
            .iter()
            .filter(|t| contains_any(&t.name, keywords))
            .map(|t| TagCount {
                id: t.id,
                name: t.name.clone(),
                post_count: published
                    .iter()
                    .filter(|i| self.item_tags.contains(&(i.id, t.id)))
                    .count() as i64,
            })
            .filter(|t| t.post_count > 0)
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[async_trait]
impl CommentStore for MemoryBackend {
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.clone()))
    }

    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Comment>> {
        let published = self.published_items(coll_id);
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.status == CommentStatus::Published)
            .filter(|c| published.iter().any(|i| i.id == c.item_id))
            .filter(|c| contains_any(&c.content, keywords))
            .map(|c| c.clone())
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl ChapterStore for MemoryBackend {
    async fn find_by_id(&self, id: ChapterId) -> AppResult<Option<Chapter>> {
        Ok(self.chapters.get(&id).map(|c| c.clone()))
    }

    async fn find_matching(
        &self,
        coll_id: CollectionId,
        keywords: &[String],
    ) -> AppResult<Vec<Chapter>> {
        let mut chapters: Vec<Chapter> = self
            .chapters
            .iter()
            .filter(|c| c.coll_id == coll_id)
            .filter(|c| contains_any(&c.name, keywords) || contains_any(&c.description, keywords))
            .map(|c| c.clone())
            .collect();
        chapters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(chapters)
    }
}

#[async_trait]
impl UserStore for MemoryBackend {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .get(&id)
            .filter(|u| !u.closed)
            .map(|u| u.clone()))
    }

    async fn list(
        &self,
        keywords: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| !u.closed)
            .filter(|u| {
                keywords.is_none_or(|k| {
                    contains_ci(&u.login, k)
                        || contains_ci(&u.firstname, k)
                        || contains_ci(&u.lastname, k)
                        || contains_ci(&u.nickname, k)
                })
            })
            .map(|u| u.clone())
            .collect();
        users.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(paginate(users, page))
    }
}

#[async_trait]
impl WidgetStore for MemoryBackend {
    async fn find_container(
        &self,
        coll_id: CollectionId,
        code: &str,
    ) -> AppResult<Option<WidgetContainer>> {
        Ok(self
            .containers
            .iter()
            .find(|c| c.coll_id == coll_id && c.code == code)
            .map(|c| c.clone()))
    }

    async fn list_containers(&self, coll_id: CollectionId) -> AppResult<Vec<WidgetContainer>> {
        let mut containers: Vec<WidgetContainer> = self
            .containers
            .iter()
            .filter(|c| c.coll_id == coll_id)
            .map(|c| c.clone())
            .collect();
        containers.sort_by_key(|c| (c.sort_order, c.id));
        Ok(containers)
    }

    async fn list_widgets(&self, container_id: ContainerId) -> AppResult<Vec<Widget>> {
        let mut widgets: Vec<Widget> = self
            .widgets
            .iter()
            .filter(|w| w.container_id == container_id)
            .map(|w| w.clone())
            .collect();
        widgets.sort_by_key(|w| (w.sort_order, w.id));
        Ok(widgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use evocms_entity::collection::{AccessLevel, ListingVisibility};
    use evocms_entity::item::TypeUsage;

    fn collection(id: i64, urlname: &str) -> Collection {
        Collection {
            id: CollectionId(id),
            urlname: urlname.to_string(),
            kind: "std".to_string(),
            shortname: urlname.to_string(),
            name: urlname.to_string(),
            tagline: String::new(),
            longdesc: String::new(),
            access: AccessLevel::Public,
            listing: ListingVisibility::Public,
            sort_order: id as i32,
        }
    }

    fn item(id: i64, usage: TypeUsage, title: &str, age_days: i64) -> Item {
        Item {
            id: ItemId(id),
            coll_id: CollectionId(1),
            main_chapter_id: None,
            creator_user_id: None,
            status: ItemStatus::Published,
            datestart: Utc::now() - Duration::days(age_days),
            urltitle: format!("item-{id}"),
            type_id: if usage == TypeUsage::Post { 1 } else { 2 },
            type_name: "Post".to_string(),
            type_usage: usage,
            title: title.to_string(),
            content: String::new(),
            excerpt: String::new(),
        }
    }

    #[tokio::test]
    async fn test_session_lookup_requires_key_and_freshness() {
        let backend = MemoryBackend::new();
        let now = Utc::now();
        let id = SessionStore::insert(
            &backend,
            &NewSession {
                key: "abc".into(),
                ip_address: "127.0.0.1".into(),
                last_seen: now,
            },
        )
        .await
        .unwrap();

        let since = now - Duration::seconds(10);
        assert!(backend.find_active(id, "abc", since).await.unwrap().is_some());
        assert!(backend.find_active(id, "xyz", since).await.unwrap().is_none());
        assert!(backend.find_active(id, "abc", now).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_published_filters_and_orders() {
        let backend = MemoryBackend::new();
        backend.insert_collection(collection(1, "blog"));
        backend.insert_item(item(1, TypeUsage::Post, "Old post", 3));
        backend.insert_item(item(2, TypeUsage::Post, "New post", 1));
        backend.insert_item(item(3, TypeUsage::Page, "About", 2));
        let mut draft = item(4, TypeUsage::Post, "Draft", 0);
        draft.status = ItemStatus::Draft;
        backend.insert_item(draft);

        let query = ItemQuery {
            coll_id: CollectionId(1),
            ..Default::default()
        };
        let page = backend
            .list_published(&query, &PageRequest::default())
            .await
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let posts = ItemQuery {
            usage: Some(TypeUsage::Post),
            ..query.clone()
        };
        let page = backend
            .list_published(&posts, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 2);
    }

    #[tokio::test]
    async fn test_tag_filter() {
        let backend = MemoryBackend::new();
        backend.insert_item(item(1, TypeUsage::Post, "One", 1));
        backend.insert_item(item(2, TypeUsage::Post, "Two", 2));
        backend.tag_item(ItemId(2), "rust");

        let query = ItemQuery {
            coll_id: CollectionId(1),
            tag: Some("rust".into()),
            ..Default::default()
        };
        let page = backend
            .list_published(&query, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, ItemId(2));
    }

    #[tokio::test]
    async fn test_paginate_past_end_is_empty() {
        let page = paginate(vec![1, 2, 3], &PageRequest::new(5, 2, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_prune_counts_only_removed_rows_under_concurrent_inserts() {
        let backend = std::sync::Arc::new(MemoryBackend::new());
        let now = Utc::now();
        for i in 0..100 {
            backend.put_session(SessionRow {
                id: SessionId(1_000_000 + i),
                key: Some("old".into()),
                data: None,
                user_id: None,
                ip_address: "127.0.0.1".into(),
                last_seen: now - Duration::days(10),
            });
        }

        let writer = {
            let backend = std::sync::Arc::clone(&backend);
            tokio::spawn(async move {
                for _ in 0..20_000 {
                    SessionStore::insert(
                        &*backend,
                        &NewSession {
                            key: "fresh".into(),
                            ip_address: "127.0.0.1".into(),
                            last_seen: now,
                        },
                    )
                    .await
                    .unwrap();
                }
            })
        };

        let cutoff = now - Duration::days(1);
        let mut removed = 0;
        for _ in 0..200 {
            removed += backend.delete_seen_before(cutoff).await.unwrap();
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
        removed += backend.delete_seen_before(cutoff).await.unwrap();

        assert_eq!(removed, 100);
        assert_eq!(backend.session_count(), 20_000);
    }
}

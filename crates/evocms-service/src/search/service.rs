//! Session-cached collection search.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use evocms_auth::Session;
use evocms_core::config::ApiConfig;
use evocms_core::result::AppResult;
use evocms_core::types::pagination::total_pages;
use evocms_core::types::{ChapterId, CollectionId, CommentId, ItemId};
use evocms_database::store::{ChapterStore, CommentStore, ItemStore};
use evocms_entity::collection::Collection;
use evocms_entity::comment::CommentStatus;
use evocms_entity::item::ItemStatus;
use evocms_entity::tag::TagCount;

use super::scoring::{ScoredResult, SearchKind, rank, score, split_keywords};
use crate::content::excerpt::{excerpt, item_excerpt};

/// Session key of the parameters of the cached search.
pub const SEARCH_PARAMS_KEY: &str = "search_params";
/// Session key of the cached ranked results.
pub const SEARCH_RESULT_KEY: &str = "search_result";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SearchParams {
    search_keywords: String,
    search_blog: CollectionId,
}

/// One displayed search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultView {
    /// Kind of object.
    pub kind: SearchKind,
    /// Object id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Short plain-text description.
    pub desc: String,
    /// Where to see it.
    pub permalink: String,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    /// Total number of ranked hits.
    pub found: u64,
    /// Page shown, clamped into `1..=pages_total`.
    pub page: u64,
    /// Hits per page.
    pub page_size: u64,
    /// Number of pages.
    pub pages_total: u64,
    /// Hits of this page that still exist.
    pub results: Vec<SearchResultView>,
}

/// Searches a collection and pages through the ranked hits.
#[derive(Clone)]
pub struct SearchService {
    items: Arc<dyn ItemStore>,
    comments: Arc<dyn CommentStore>,
    chapters: Arc<dyn ChapterStore>,
    api: ApiConfig,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("api", &self.api)
            .finish()
    }
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        items: Arc<dyn ItemStore>,
        comments: Arc<dyn CommentStore>,
        chapters: Arc<dyn ChapterStore>,
        api: ApiConfig,
    ) -> Self {
        Self {
            items,
            comments,
            chapters,
            api,
        }
    }

    /// Rank every object of `collection` matching `search`.
    pub async fn perform_scored_search(
        &self,
        collection: &Collection,
        search: &str,
        kinds: &[SearchKind],
    ) -> AppResult<Vec<ScoredResult>> {
        let keywords = split_keywords(search);
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for kind in kinds {
            match kind {
                SearchKind::Item => {
                    for item in self.items.find_matching(collection.id, &keywords).await? {
                        results.push(hit(
                            *kind,
                            item.id.get(),
                            score(&item.title, &item.content, &keywords),
                        ));
                    }
                }
                SearchKind::Comment => {
                    for comment in self.comments.find_matching(collection.id, &keywords).await? {
                        results.push(hit(
                            *kind,
                            comment.id.get(),
                            score("", &comment.content, &keywords),
                        ));
                    }
                }
                SearchKind::Category => {
                    for chapter in self.chapters.find_matching(collection.id, &keywords).await? {
                        results.push(hit(
                            *kind,
                            chapter.id.get(),
                            score(&chapter.name, &chapter.description, &keywords),
                        ));
                    }
                }
                SearchKind::Tag => {
                    for tag in self
                        .items
                        .find_matching_tags(collection.id, &keywords)
                        .await?
                    {
                        results.push(tag_hit(&tag, score(&tag.name, "", &keywords)));
                    }
                }
            }
        }

        results.retain(|r| r.score > 0);
        rank(&mut results);
        debug!(
            coll = %collection.urlname,
            search,
            found = results.len(),
            "Scored search performed"
        );
        Ok(results)
    }

    /// Search `collection`, reusing the ranked hits cached in `session` when
    /// the same keywords were searched in the same collection.
    ///
    /// Returns `None` when nothing matches.
    #[allow(clippy::too_many_arguments)]
    pub async fn search(
        &self,
        session: &mut Session,
        collection: &Collection,
        search: &str,
        kinds: &[SearchKind],
        page: i64,
        per_page: Option<u64>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<SearchPage>> {
        let params = SearchParams {
            search_keywords: search.to_string(),
            search_blog: collection.id,
        };

        let cached = match session.get_typed::<SearchParams>(SEARCH_PARAMS_KEY, now) {
            Some(stored) if stored == params => {
                session.get_typed::<Vec<ScoredResult>>(SEARCH_RESULT_KEY, now)
            }
            _ => None,
        };

        let results = match cached {
            Some(results) => results,
            None => {
                let results = self.perform_scored_search(collection, search, kinds).await?;
                session.set_typed(SEARCH_PARAMS_KEY, &params, 0, now)?;
                session.set_typed(SEARCH_RESULT_KEY, &results, 0, now)?;
                results
            }
        };

        if results.is_empty() {
            return Ok(None);
        }

        let page_size = per_page
            .unwrap_or(self.api.default_per_page)
            .clamp(1, self.api.max_per_page.max(1));
        let found = results.len() as u64;
        let (current, pages) = if found > page_size {
            let pages = total_pages(found, page_size);
            (page.max(1).min(pages as i64) as u64, pages)
        } else {
            (1, 1)
        };

        let from = ((current - 1) * page_size) as usize;
        let to = (from + page_size as usize).min(results.len());

        let mut views = Vec::with_capacity(to - from);
        for row in &results[from..to] {
            if let Some(view) = self.resolve(collection, row).await? {
                views.push(view);
            }
        }

        Ok(Some(SearchPage {
            found,
            page: current,
            page_size,
            pages_total: pages,
            results: views,
        }))
    }

    /// Load the object behind a cached hit; `None` when it disappeared.
    async fn resolve(
        &self,
        collection: &Collection,
        row: &ScoredResult,
    ) -> AppResult<Option<SearchResultView>> {
        let base_url = &self.api.base_url;
        let view = match row.kind {
            SearchKind::Item => {
                let Some(item) = self.items.find_by_id(ItemId(row.id)).await? else {
                    return Ok(None);
                };
                if item.status != ItemStatus::Published {
                    return Ok(None);
                }
                SearchResultView {
                    kind: row.kind,
                    id: row.id,
                    title: item.title.clone(),
                    desc: item_excerpt(&item),
                    permalink: item.permanent_url(base_url, &collection.urlname),
                }
            }
            SearchKind::Comment => {
                let Some(comment) = self.comments.find_by_id(CommentId(row.id)).await? else {
                    return Ok(None);
                };
                if comment.status == CommentStatus::Trash {
                    return Ok(None);
                }
                let Some(item) = self.items.find_by_id(comment.item_id).await? else {
                    return Ok(None);
                };
                let item_url = item.permanent_url(base_url, &collection.urlname);
                SearchResultView {
                    kind: row.kind,
                    id: row.id,
                    title: item.title,
                    desc: excerpt(&comment.content),
                    permalink: comment.permanent_url(&item_url),
                }
            }
            SearchKind::Category => {
                let Some(chapter) = self.chapters.find_by_id(ChapterId(row.id)).await? else {
                    return Ok(None);
                };
                SearchResultView {
                    kind: row.kind,
                    id: row.id,
                    title: chapter.name.clone(),
                    desc: excerpt(&chapter.description),
                    permalink: chapter.permanent_url(base_url, &collection.urlname),
                }
            }
            SearchKind::Tag => {
                let tag = TagCount {
                    id: row.id,
                    name: row.name.clone().unwrap_or_default(),
                    post_count: row.post_count.unwrap_or(0),
                };
                SearchResultView {
                    kind: row.kind,
                    id: row.id,
                    title: tag.name.clone(),
                    desc: format!("{} posts are tagged with '{}'", tag.post_count, tag.name),
                    permalink: tag.permanent_url(&collection.url(base_url)),
                }
            }
        };
        Ok(Some(view))
    }
}

fn hit(kind: SearchKind, id: i64, score: i64) -> ScoredResult {
    ScoredResult {
        kind,
        id,
        score,
        name: None,
        post_count: None,
    }
}

fn tag_hit(tag: &TagCount, score: i64) -> ScoredResult {
    ScoredResult {
        kind: SearchKind::Tag,
        id: tag.id,
        score,
        name: Some(tag.name.clone()),
        post_count: Some(tag.post_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use evocms_auth::SessionManager;
    use evocms_core::config::SessionConfig;
    use evocms_database::MemoryBackend;
    use evocms_entity::chapter::Chapter;
    use evocms_entity::collection::{AccessLevel, ListingVisibility};
    use evocms_entity::comment::Comment;
    use evocms_entity::item::{Item, TypeUsage};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn blog() -> Collection {
        Collection {
            id: CollectionId(1),
            urlname: "blog".into(),
            kind: "std".into(),
            shortname: "Blog".into(),
            name: "Blog".into(),
            tagline: String::new(),
            longdesc: String::new(),
            access: AccessLevel::Public,
            listing: ListingVisibility::Public,
            sort_order: 1,
        }
    }

    fn item(id: i64, title: &str, content: &str) -> Item {
        Item {
            id: ItemId(id),
            coll_id: CollectionId(1),
            main_chapter_id: None,
            creator_user_id: None,
            status: ItemStatus::Published,
            datestart: now(),
            urltitle: format!("post-{id}"),
            type_id: 1,
            type_name: "Post".into(),
            type_usage: TypeUsage::Post,
            title: title.into(),
            content: content.into(),
            excerpt: String::new(),
        }
    }

    async fn setup() -> (Arc<MemoryBackend>, SearchService, Session) {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_item(item(1, "Rust tips", "<p>Learn rust</p>"));
        backend.insert_item(item(2, "Cooking", "Rust-free pans"));
        backend.insert_item(item(3, "Travel", "Nothing here"));
        backend.insert_comment(Comment {
            id: CommentId(10),
            item_id: ItemId(3),
            author: "ann".into(),
            content: "Try rust".into(),
            status: CommentStatus::Published,
            created_at: now(),
        });
        backend.insert_chapter(Chapter {
            id: ChapterId(20),
            coll_id: CollectionId(1),
            parent_id: None,
            name: "Rust".into(),
            urlname: "rust".into(),
            description: "All about rust".into(),
        });
        backend.tag_item(ItemId(1), "rustlang");

        let service = SearchService::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            ApiConfig::default(),
        );
        let manager = SessionManager::new(backend.clone(), SessionConfig::default());
        let (session, _) = manager.resume_or_start(None, "ip", now()).await.unwrap();
        (backend, service, session)
    }

    #[tokio::test]
    async fn test_ranks_all_kinds() {
        let (_, service, _) = setup().await;
        let results = service
            .perform_scored_search(&blog(), "rust", &SearchKind::ALL)
            .await
            .unwrap();
        let order: Vec<(SearchKind, i64, i64)> =
            results.iter().map(|r| (r.kind, r.id, r.score)).collect();
        assert_eq!(
            order,
            vec![
                (SearchKind::Item, 1, 6),
                (SearchKind::Category, 20, 6),
                (SearchKind::Tag, 1, 5),
                (SearchKind::Item, 2, 1),
                (SearchKind::Comment, 10, 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_kind_filter() {
        let (_, service, _) = setup().await;
        let results = service
            .perform_scored_search(&blog(), "rust", &[SearchKind::Comment])
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, SearchKind::Comment);
    }

    #[tokio::test]
    async fn test_results_cached_in_session() {
        let (backend, service, mut session) = setup().await;
        let first = service
            .search(&mut session, &blog(), "rust", &SearchKind::ALL, 1, None, now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.found, 5);
        assert_eq!(first.results.len(), 5);

        // A removed item is skipped while the cached ranking is reused.
        backend.remove_item(ItemId(2));
        let second = service
            .search(&mut session, &blog(), "rust", &SearchKind::ALL, 1, None, now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.found, 5);
        assert_eq!(second.results.len(), 4);
        assert!(second.results.iter().all(|r| r.id != 2 || r.kind != SearchKind::Item));
    }

    #[tokio::test]
    async fn test_new_keywords_search_again() {
        let (_, service, mut session) = setup().await;
        service
            .search(&mut session, &blog(), "rust", &SearchKind::ALL, 1, None, now())
            .await
            .unwrap();
        let page = service
            .search(&mut session, &blog(), "cooking", &SearchKind::ALL, 1, None, now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.found, 1);
        assert_eq!(page.results[0].permalink, "http://localhost:8080/blog/post-2");
    }

    #[tokio::test]
    async fn test_no_results() {
        let (_, service, mut session) = setup().await;
        let page = service
            .search(&mut session, &blog(), "zzz", &SearchKind::ALL, 1, None, now())
            .await
            .unwrap();
        assert!(page.is_none());
    }

    #[tokio::test]
    async fn test_page_is_clamped() {
        let (_, service, mut session) = setup().await;
        let page = service
            .search(&mut session, &blog(), "rust", &SearchKind::ALL, 9, Some(2), now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.pages_total, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.results.len(), 1);

        let page = service
            .search(&mut session, &blog(), "rust", &SearchKind::ALL, -4, Some(2), now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn test_result_views() {
        let (_, service, mut session) = setup().await;
        let page = service
            .search(&mut session, &blog(), "rust", &SearchKind::ALL, 1, None, now())
            .await
            .unwrap()
            .unwrap();
        let tag = page
            .results
            .iter()
            .find(|r| r.kind == SearchKind::Tag)
            .unwrap();
        assert_eq!(tag.title, "rustlang");
        assert_eq!(tag.desc, "1 posts are tagged with 'rustlang'");
        assert_eq!(tag.permalink, "http://localhost:8080/blog/?tag=rustlang");

        let comment = page
            .results
            .iter()
            .find(|r| r.kind == SearchKind::Comment)
            .unwrap();
        assert_eq!(comment.title, "Travel");
        assert_eq!(comment.permalink, "http://localhost:8080/blog/post-3#c10");

        let item = page.results.iter().find(|r| r.id == 1 && r.kind == SearchKind::Item).unwrap();
        assert_eq!(item.desc, "Learn rust");
    }
}

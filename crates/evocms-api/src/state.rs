//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use evocms_auth::{AccessChecker, SessionManager};
use evocms_cache::CacheManager;
use evocms_core::config::AppConfig;
use evocms_database::{DatabasePool, Stores};
use evocms_service::{ContentService, Hitlist, SearchService, UserDirectory, WidgetRenderer};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// PostgreSQL pool, absent with the in-memory backend
    pub db_pool: Option<DatabasePool>,
    /// Every store behind its trait
    pub stores: Stores,
    /// Block cache
    pub cache: CacheManager,

    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Collection and user directory access checks
    pub access: Arc<AccessChecker>,

    /// Item queries
    pub content_service: Arc<ContentService>,
    /// Scored search
    pub search_service: Arc<SearchService>,
    /// User directory
    pub user_directory: Arc<UserDirectory>,
    /// Widget container renderer
    pub widget_renderer: Arc<WidgetRenderer>,
    /// Hit log and pruning
    pub hitlist: Arc<Hitlist>,
}

impl AppState {
    /// Wire every service from the stores and configuration.
    pub fn new(
        config: AppConfig,
        db_pool: Option<DatabasePool>,
        stores: Stores,
        cache: CacheManager,
    ) -> Self {
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&stores.sessions),
            config.session.clone(),
        ));
        let access = Arc::new(AccessChecker::new(
            Arc::clone(&stores.collections),
            config.users.clone(),
        ));
        let content_service = Arc::new(ContentService::new(
            Arc::clone(&stores.items),
            config.api.clone(),
            config.media.clone(),
        ));
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&stores.items),
            Arc::clone(&stores.comments),
            Arc::clone(&stores.chapters),
            config.api.clone(),
        ));
        let user_directory = Arc::new(UserDirectory::new(
            Arc::clone(&stores.users),
            config.api.clone(),
            config.users.clone(),
            config.media.clone(),
        ));
        let widget_renderer = Arc::new(WidgetRenderer::new(
            Arc::clone(&stores.widgets),
            cache.clone(),
            config.api.clone(),
        ));
        let hitlist = Arc::new(Hitlist::new(
            Arc::clone(&stores.hits),
            Arc::clone(&stores.sessions),
            Arc::clone(&stores.settings),
            config.stats.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            stores,
            cache,
            session_manager,
            access,
            content_service,
            search_service,
            user_directory,
            widget_renderer,
            hitlist,
        }
    }
}

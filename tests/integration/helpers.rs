//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::header::{COOKIE, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use evocms_api::AppState;
use evocms_cache::CacheManager;
use evocms_core::config::AppConfig;
use evocms_core::types::{CollectionId, ContainerId, ItemId, UserId, WidgetId};
use evocms_database::{MemoryBackend, Stores};
use evocms_entity::collection::{AccessLevel, Collection, ListingVisibility};
use evocms_entity::item::{Item, ItemStatus, TypeUsage};
use evocms_entity::user::User;
use evocms_entity::widget::{Widget, WidgetContainer};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backend holding every row, for seeding and inspection
    pub backend: Arc<MemoryBackend>,
    /// Application config
    pub config: AppConfig,
}

/// What came back from a request
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body
    pub body: String,
    /// `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    /// `name=value` pair of the session cookie that was set
    pub fn cookie_pair(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .expect("session cookie set")
            .to_string()
    }
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let backend = Arc::new(MemoryBackend::new());
        let cache = CacheManager::new(&config.cache);
        let state = AppState::new(
            config.clone(),
            None,
            Stores::memory(Arc::clone(&backend)),
            cache,
        );

        Self {
            router: evocms_api::build_app(state),
            backend,
            config,
        }
    }

    /// GET `uri`, optionally sending a `Cookie` header
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let request = request.body(Body::empty()).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router responds");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");

        TestResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            set_cookie,
        }
    }

    /// Seed a collection
    pub fn collection(&self, id: i64, urlname: &str, access: AccessLevel, listing: ListingVisibility) {
        self.backend.insert_collection(Collection {
            id: CollectionId(id),
            urlname: urlname.to_string(),
            kind: "std".to_string(),
            shortname: urlname.to_string(),
            name: format!("{urlname} blog"),
            tagline: format!("All about {urlname}"),
            longdesc: String::new(),
            access,
            listing,
            sort_order: id as i32,
        });
    }

    /// Seed a published item
    pub fn item(&self, id: i64, coll_id: i64, usage: TypeUsage, title: &str, content: &str) {
        self.backend.insert_item(Item {
            id: ItemId(id),
            coll_id: CollectionId(coll_id),
            main_chapter_id: None,
            creator_user_id: None,
            status: ItemStatus::Published,
            datestart: Utc::now() - Duration::days(id),
            urltitle: format!("item-{id}"),
            type_id: if usage == TypeUsage::Post { 1 } else { 1000 },
            type_name: if usage == TypeUsage::Post { "Post" } else { "Page" }.to_string(),
            type_usage: usage,
            title: title.to_string(),
            content: content.to_string(),
            excerpt: String::new(),
        });
    }

    /// Seed an open account
    pub fn user(&self, id: i64, login: &str) {
        self.backend.insert_user(User {
            id: UserId(id),
            login: login.to_string(),
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            nickname: login.to_string(),
            city: "London".to_string(),
            gender: None,
            avatar_path: None,
            closed: false,
        });
    }
}

impl TestApp {
    /// Seed a widget container
    pub fn container(&self, id: i64, coll_id: i64, code: &str, name: &str) {
        self.backend.insert_container(WidgetContainer {
            id: ContainerId(id),
            coll_id: CollectionId(coll_id),
            code: code.to_string(),
            name: name.to_string(),
            sort_order: id as i32,
        });
    }

    /// Seed an enabled widget
    pub fn widget(&self, id: i64, container_id: i64, order: i32, code: &str, params: Value) {
        self.backend.insert_widget(Widget {
            id: WidgetId(id),
            container_id: ContainerId(container_id),
            sort_order: order,
            enabled: true,
            code: code.to_string(),
            params,
        });
    }
}

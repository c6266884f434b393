//! Container rendering with block caching.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use evocms_cache::{CacheManager, keys};
use evocms_core::config::ApiConfig;
use evocms_core::result::AppResult;
use evocms_core::traits::cache::CacheProvider;
use evocms_database::store::WidgetStore;
use evocms_entity::collection::Collection;
use evocms_entity::widget::Widget;

use super::kind::WidgetKind;
use super::params::{self, COLUMN_COUNT, DEFAULT_COLUMN_CLASS, DisplayParams, ParamDefinition};
use crate::html::escape;

/// Renders the widget containers of a collection.
#[derive(Clone)]
pub struct WidgetRenderer {
    widgets: Arc<dyn WidgetStore>,
    cache: CacheManager,
    api: ApiConfig,
}

impl std::fmt::Debug for WidgetRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRenderer")
            .field("cache", &self.cache)
            .finish()
    }
}

impl WidgetRenderer {
    /// Creates a new widget renderer.
    pub fn new(widgets: Arc<dyn WidgetStore>, cache: CacheManager, api: ApiConfig) -> Self {
        Self { widgets, cache, api }
    }

    /// Render the container `code` of a collection. An unknown container
    /// renders as an empty string.
    pub async fn render_container(&self, coll: &Collection, code: &str) -> AppResult<String> {
        let mut stack = Vec::new();
        self.render_code(coll, code, &mut stack).await
    }

    /// Editable parameters of a widget kind in `coll`.
    pub async fn param_definitions(
        &self,
        coll: &Collection,
        kind: &WidgetKind,
    ) -> AppResult<Vec<ParamDefinition>> {
        let containers = if kind.embeds_containers() {
            self.widgets.list_containers(coll.id).await?
        } else {
            Vec::new()
        };
        Ok(params::definitions(kind, &containers))
    }

    /// Drop every cached block of a collection.
    pub async fn invalidate_collection(&self, coll: &Collection) -> AppResult<u64> {
        self.cache
            .delete_prefix(&keys::collection_blocks(coll.id))
            .await
    }

    fn render_code<'a>(
        &'a self,
        coll: &'a Collection,
        code: &'a str,
        stack: &'a mut Vec<String>,
    ) -> BoxFuture<'a, AppResult<String>> {
        async move {
            let container = self.widgets.find_container(coll.id, code).await?;

            if stack.iter().any(|c| c == code) {
                let name = container.as_ref().map_or(code, |c| c.name.as_str());
                warn!(
                    coll = %coll.urlname,
                    container = code,
                    "Refusing to include container recursively"
                );
                return Ok(format!(
                    r#"<div class="alert alert-danger">Cannot include container "{}" because it would create an infinite loop.</div>"#,
                    escape(name)
                ));
            }

            let Some(container) = container else {
                debug!(coll = %coll.urlname, container = code, "Container not found");
                return Ok(String::new());
            };

            stack.push(code.to_string());
            let widgets = self.widgets.list_widgets(container.id).await?;
            let mut out = String::new();
            for widget in widgets.iter().filter(|w| w.enabled) {
                out.push_str(&self.render_widget(coll, widget, stack).await?);
            }
            stack.pop();
            Ok(out)
        }
        .boxed()
    }

    async fn render_widget(
        &self,
        coll: &Collection,
        widget: &Widget,
        stack: &mut Vec<String>,
    ) -> AppResult<String> {
        let kind = WidgetKind::from_code(&widget.code);
        let cacheable =
            kind.allows_blockcache() && widget.param_bool("allow_blockcache") != Some(false);
        let key = keys::widget_block(coll.id, widget.id);

        if cacheable {
            if let Some(html) = self.cache.get(&key).await? {
                debug!(widget = %widget.id, "Block cache hit");
                return Ok(html);
            }
        }

        let display = DisplayParams::for_widget(widget);
        let html = match &kind {
            WidgetKind::FreeHtml => {
                let mut out = display.block_start.clone();
                push_title(&mut out, &display, widget.param_str("title"));
                out.push_str(&display.block_body_start);
                out.push_str(widget.param_str("content").unwrap_or_default());
                out.push_str(&display.block_body_end);
                out.push_str(&display.block_end);
                out
            }
            WidgetKind::CollTitle => {
                let mut out = display.block_start.clone();
                out.push_str(&display.block_title_start);
                out.push_str(&format!(
                    r#"<a href="{}">{}</a>"#,
                    escape(&coll.url(&self.api.base_url)),
                    escape(&coll.name)
                ));
                out.push_str(&display.block_title_end);
                out.push_str(&display.block_end);
                out
            }
            WidgetKind::Subcontainer => {
                let child = widget.param_str("container").unwrap_or_default().to_string();
                let mut out = display.block_start.clone();
                push_title(&mut out, &display, widget.param_str("title"));
                out.push_str(&display.block_body_start);
                if !child.is_empty() {
                    out.push_str(&self.render_code(coll, &child, stack).await?);
                }
                out.push_str(&display.block_body_end);
                out.push_str(&display.block_end);
                out
            }
            WidgetKind::SubcontainerRow => {
                let mut out = display.block_start.clone();
                push_title(&mut out, &display, widget.param_str("title"));
                out.push_str(&display.block_body_start);
                out.push_str(&display.rwd_start);
                for i in 1..=COLUMN_COUNT {
                    let child = widget
                        .param_str(&format!("column{i}_container"))
                        .unwrap_or_default()
                        .to_string();
                    if child.is_empty() {
                        continue;
                    }
                    let class = widget
                        .param_str(&format!("column{i}_class"))
                        .unwrap_or(DEFAULT_COLUMN_CLASS);
                    out.push_str(&display.column_start(class));
                    out.push_str(&self.render_code(coll, &child, stack).await?);
                    out.push_str(&display.rwd_block_end);
                }
                out.push_str(&display.rwd_end);
                out.push_str(&display.block_body_end);
                out.push_str(&display.block_end);
                out
            }
            WidgetKind::Unknown(code) => {
                warn!(widget = %widget.id, code = %code, "Unknown widget code");
                format!("<!-- Unknown widget: {} -->", escape(code))
            }
        };

        if cacheable {
            self.cache.set(&key, &html, self.cache.block_ttl()).await?;
        }
        Ok(html)
    }
}

fn push_title(out: &mut String, display: &DisplayParams, title: Option<&str>) {
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push_str(&display.block_title_start);
        out.push_str(&escape(title));
        out.push_str(&display.block_title_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evocms_core::config::CacheConfig;
    use evocms_core::types::{CollectionId, ContainerId, WidgetId};
    use evocms_database::MemoryBackend;
    use evocms_entity::collection::{AccessLevel, ListingVisibility};
    use evocms_entity::widget::WidgetContainer;
    use serde_json::{Value, json};

    fn collection() -> Collection {
        Collection {
            id: CollectionId(1),
            urlname: "blog".into(),
            kind: "std".into(),
            shortname: "Blog".into(),
            name: "My Blog".into(),
            tagline: String::new(),
            longdesc: String::new(),
            access: AccessLevel::Public,
            listing: ListingVisibility::Public,
            sort_order: 1,
        }
    }

    fn container(backend: &MemoryBackend, id: i64, code: &str, name: &str) {
        backend.insert_container(WidgetContainer {
            id: ContainerId(id),
            coll_id: CollectionId(1),
            code: code.into(),
            name: name.into(),
            sort_order: id as i32,
        });
    }

    fn widget(backend: &MemoryBackend, id: i64, container: i64, order: i32, code: &str, params: Value) {
        backend.insert_widget(Widget {
            id: WidgetId(id),
            container_id: ContainerId(container),
            sort_order: order,
            enabled: true,
            code: code.into(),
            params,
        });
    }

    fn renderer(backend: Arc<MemoryBackend>) -> WidgetRenderer {
        WidgetRenderer::new(
            backend,
            CacheManager::new(&CacheConfig::default()),
            ApiConfig::default(),
        )
    }

    const LOOP_A: &str = r#"<div class="alert alert-danger">Cannot include container "Container A" because it would create an infinite loop.</div>"#;

    #[tokio::test]
    async fn test_free_html_in_order() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "sidebar", "Sidebar");
        widget(&backend, 10, 1, 2, "free_html", json!({"content": "second"}));
        widget(&backend, 11, 1, 1, "free_html", json!({"title": "Hi", "content": "first"}));

        let html = renderer(backend)
            .render_container(&collection(), "sidebar")
            .await
            .unwrap();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(html.contains("<h3>Hi</h3>"));
    }

    #[tokio::test]
    async fn test_disabled_widget_skipped() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "sidebar", "Sidebar");
        backend.insert_widget(Widget {
            id: WidgetId(10),
            container_id: ContainerId(1),
            sort_order: 1,
            enabled: false,
            code: "free_html".into(),
            params: json!({"content": "hidden"}),
        });

        let html = renderer(backend)
            .render_container(&collection(), "sidebar")
            .await
            .unwrap();
        assert!(html.is_empty());
    }

    #[tokio::test]
    async fn test_self_reference_guarded() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "a", "Container A");
        widget(&backend, 10, 1, 1, "subcontainer", json!({"container": "a"}));

        let html = renderer(backend)
            .render_container(&collection(), "a")
            .await
            .unwrap();
        assert_eq!(html.matches(LOOP_A).count(), 1);
    }

    #[tokio::test]
    async fn test_indirect_loop_through_row() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "a", "Container A");
        container(&backend, 2, "b", "Container B");
        widget(
            &backend,
            10,
            1,
            1,
            "subcontainer_row",
            json!({"column1_container": "b", "column2_class": "ignored"}),
        );
        widget(&backend, 20, 2, 1, "subcontainer", json!({"container": "a"}));

        let html = renderer(backend)
            .render_container(&collection(), "a")
            .await
            .unwrap();
        assert_eq!(html.matches(LOOP_A).count(), 1);
        assert!(html.contains(&format!(r#"<div class="{DEFAULT_COLUMN_CLASS}">"#)));
        assert!(!html.contains("ignored"));
    }

    #[tokio::test]
    async fn test_sibling_columns_may_repeat_container() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "row", "Row");
        container(&backend, 2, "leaf", "Leaf");
        widget(
            &backend,
            10,
            1,
            1,
            "subcontainer_row",
            json!({"column1_container": "leaf", "column2_container": "leaf", "column2_class": "col-6"}),
        );
        widget(&backend, 20, 2, 1, "free_html", json!({"content": "leaf-body"}));

        let html = renderer(backend)
            .render_container(&collection(), "row")
            .await
            .unwrap();
        assert_eq!(html.matches("leaf-body").count(), 2);
        assert!(html.contains(r#"<div class="col-6">"#));
        assert!(!html.contains("alert-danger"));
    }

    #[tokio::test]
    async fn test_block_cache_serves_stale_until_invalidated() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "sidebar", "Sidebar");
        widget(&backend, 10, 1, 1, "free_html", json!({"content": "v1"}));
        let renderer = renderer(backend.clone());
        let coll = collection();

        assert!(renderer.render_container(&coll, "sidebar").await.unwrap().contains("v1"));
        widget(&backend, 10, 1, 1, "free_html", json!({"content": "v2"}));
        assert!(renderer.render_container(&coll, "sidebar").await.unwrap().contains("v1"));

        renderer.invalidate_collection(&coll).await.unwrap();
        assert!(renderer.render_container(&coll, "sidebar").await.unwrap().contains("v2"));
    }

    #[tokio::test]
    async fn test_blockcache_opt_out() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "sidebar", "Sidebar");
        widget(&backend, 10, 1, 1, "free_html", json!({"content": "v1", "allow_blockcache": false}));
        let renderer = renderer(backend.clone());
        let coll = collection();

        renderer.render_container(&coll, "sidebar").await.unwrap();
        widget(&backend, 10, 1, 1, "free_html", json!({"content": "v2", "allow_blockcache": false}));
        assert!(renderer.render_container(&coll, "sidebar").await.unwrap().contains("v2"));
    }

    #[tokio::test]
    async fn test_unknown_container_and_widget() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "sidebar", "Sidebar");
        widget(&backend, 10, 1, 1, "poll", json!({}));
        let renderer = renderer(backend);
        let coll = collection();

        assert_eq!(renderer.render_container(&coll, "missing").await.unwrap(), "");
        assert_eq!(
            renderer.render_container(&coll, "sidebar").await.unwrap(),
            "<!-- Unknown widget: poll -->"
        );
    }

    #[tokio::test]
    async fn test_coll_title_links_front_page() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "header", "Header");
        widget(&backend, 10, 1, 1, "coll_title", json!({}));

        let html = renderer(backend)
            .render_container(&collection(), "header")
            .await
            .unwrap();
        assert!(html.contains(r#"<a href="http://localhost:8080/blog/">My Blog</a>"#));
    }

    #[tokio::test]
    async fn test_row_param_definitions_list_containers() {
        let backend = Arc::new(MemoryBackend::new());
        container(&backend, 1, "sidebar", "Sidebar");
        let defs = renderer(backend)
            .param_definitions(&collection(), &WidgetKind::SubcontainerRow)
            .await
            .unwrap();
        assert!(defs.iter().any(|d| d.name == "column6_class"));
    }
}

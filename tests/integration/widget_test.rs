//! Container rendering over HTTP.

use http::StatusCode;
use serde_json::json;

use evocms_entity::collection::{AccessLevel, ListingVisibility};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_render_container_with_loop_guard() {
    let app = TestApp::new();
    app.collection(1, "blog", AccessLevel::Public, ListingVisibility::Public);
    app.container(1, 1, "sidebar", "Sidebar");
    app.container(2, 1, "nested", "Nested");
    app.widget(10, 1, 1, "free_html", json!({"title": "Hello", "content": "<p>hi</p>"}));
    app.widget(11, 1, 2, "subcontainer", json!({"container": "nested"}));
    app.widget(20, 2, 1, "subcontainer", json!({"container": "sidebar"}));

    let response = app.get("/blog/containers/sidebar", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let html = response.body;
    assert!(html.contains("<p>hi</p>"));
    assert!(html.contains("Hello"));
    assert_eq!(html.matches("infinite loop").count(), 1);
    assert!(html.contains(r#"Cannot include container "Sidebar""#));
}

#[tokio::test]
async fn test_render_unknown_collection() {
    let app = TestApp::new();
    let response = app.get("/nope/containers/sidebar", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_render_restricted_collection() {
    let app = TestApp::new();
    app.collection(1, "staff", AccessLevel::Members, ListingVisibility::Member);
    app.container(1, 1, "sidebar", "Sidebar");

    let response = app.get("/staff/containers/sidebar", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

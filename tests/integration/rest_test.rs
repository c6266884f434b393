//! REST dispatcher behaviour over HTTP.

use http::StatusCode;

use evocms_entity::collection::{AccessLevel, ListingVisibility};
use evocms_entity::item::TypeUsage;

use crate::helpers::TestApp;

fn blog_app() -> TestApp {
    let app = TestApp::new();
    app.collection(1, "blog", AccessLevel::Public, ListingVisibility::Public);
    app.item(1, 1, TypeUsage::Post, "Learning Rust", "Ownership and borrowing.");
    app.item(2, 1, TypeUsage::Post, "Second post", "Nothing special here.");
    app.item(3, 1, TypeUsage::Page, "About", "Who we are.");
    app
}

#[tokio::test]
async fn test_missing_module_is_wrong_route() {
    let app = TestApp::new();
    let response = app.get("/api/v1/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body = response.json();
    assert_eq!(body["code"], "wrong_route");
    assert_eq!(body["data"]["status"], 404);
}

#[tokio::test]
async fn test_unknown_module() {
    let app = TestApp::new();
    let response = app.get("/api/v1/widgets", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "unknown_module");
}

#[tokio::test]
async fn test_collections_list_skips_unlisted() {
    let app = blog_app();
    app.collection(2, "hidden", AccessLevel::Public, ListingVisibility::Never);
    app.collection(3, "staff", AccessLevel::Users, ListingVisibility::Logged);

    let response = app.get("/api/v1/collections", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    let list = body.as_array().expect("collection array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["urlname"], "blog");
    assert_eq!(list[0]["tagline"], "All about blog");
}

#[tokio::test]
async fn test_no_collections() {
    let app = TestApp::new();
    let response = app.get("/api/v1/collections", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["code"], "no_collections");
}

#[tokio::test]
async fn test_unknown_collection() {
    let app = blog_app();
    let response = app.get("/api/v1/collections/nope/items", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "unknown_collection");
}

#[tokio::test]
async fn test_restricted_collection_requires_login() {
    let app = TestApp::new();
    app.collection(1, "staff", AccessLevel::Users, ListingVisibility::Public);

    let response = app.get("/api/v1/collections/staff/items", None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["code"], "access_requires_login");

    // Access is checked before the controller name.
    let response = app.get("/api/v1/collections/staff/bogus", None).await;
    assert_eq!(response.json()["code"], "access_requires_login");
}

#[tokio::test]
async fn test_unknown_controller() {
    let app = blog_app();
    let response = app.get("/api/v1/collections/blog/bogus", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "unknown_controller");
}

#[tokio::test]
async fn test_items_and_posts() {
    let app = blog_app();

    let items = app.get("/api/v1/collections/blog/items", None).await.json();
    assert_eq!(items["found"], 3);
    assert_eq!(items["page"], 1);
    assert_eq!(items["items"].as_array().map(Vec::len), Some(3));

    let posts = app.get("/api/v1/collections/blog/posts", None).await.json();
    assert_eq!(posts["found"], 2);
    assert_eq!(posts["items"][0]["title"], "Learning Rust");
}

#[tokio::test]
async fn test_items_pagination() {
    let app = blog_app();

    let page = app
        .get("/api/v1/collections/blog/items?per_page=2&page=2", None)
        .await
        .json();
    assert_eq!(page["page"], 2);
    assert_eq!(page["pages_total"], 2);
    assert_eq!(page["items"].as_array().map(Vec::len), Some(1));

    let past_end = app
        .get("/api/v1/collections/blog/items?per_page=2&page=5", None)
        .await;
    assert_eq!(past_end.status, StatusCode::OK);
    assert_eq!(past_end.json()["code"], "no_posts");
}

#[tokio::test]
async fn test_single_item() {
    let app = blog_app();

    let item = app.get("/api/v1/collections/blog/items/2", None).await;
    assert_eq!(item.status, StatusCode::OK);
    assert_eq!(item.json()["title"], "Second post");

    let missing = app.get("/api/v1/collections/blog/items/99", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["code"], "post_invalid_id");

    let garbage = app.get("/api/v1/collections/blog/items/abc", None).await;
    assert_eq!(garbage.json()["code"], "post_invalid_id");

    // A page is not a post.
    let page = app.get("/api/v1/collections/blog/posts/3", None).await;
    assert_eq!(page.json()["code"], "post_invalid_id");
}

#[tokio::test]
async fn test_search() {
    let app = blog_app();

    let response = app
        .get("/api/v1/collections/blog/search/learning+rust", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert!(body["found"].as_u64().unwrap_or(0) >= 1);
    assert_eq!(body["results"][0]["title"], "Learning Rust");

    let none = app
        .get("/api/v1/collections/blog/search/zzzzzz", None)
        .await;
    assert_eq!(none.status, StatusCode::OK);
    assert_eq!(none.json()["code"], "no_search_results");
}

#[tokio::test]
async fn test_users() {
    let app = TestApp::new();

    let empty = app.get("/api/v1/users", None).await;
    assert_eq!(empty.json()["code"], "no_users");

    app.user(1, "ada");
    let list = app.get("/api/v1/users", None).await.json();
    assert_eq!(list["found"], 1);
    assert_eq!(list["users"][0]["login"], "ada");

    let profile = app.get("/api/v1/users/1", None).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.json()["code"], "no_access");

    let bogus = app.get("/api/v1/users/bogus", None).await;
    assert_eq!(bogus.status, StatusCode::NOT_FOUND);
    assert_eq!(bogus.json()["code"], "unknown_controller");
}

#[tokio::test]
async fn test_anonymous_user_list_can_be_disabled() {
    let mut config = evocms_core::config::AppConfig::default();
    config.users.allow_anonymous_user_list = false;
    let app = TestApp::with_config(config);
    app.user(1, "ada");

    let response = app.get("/api/v1/users", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["code"], "no_access");
}

#[tokio::test]
async fn test_item_attachments_skip_missing_files() {
    use evocms_core::types::{FileId, ItemId};
    use evocms_entity::item::MediaFile;

    let root = std::env::temp_dir().join(format!("evocms-it-media-{}", std::process::id()));
    tokio::fs::create_dir_all(&root).await.unwrap();
    tokio::fs::write(root.join("cover.jpg"), b"jpg").await.unwrap();

    let mut config = evocms_core::config::AppConfig::default();
    config.media.root = root.to_string_lossy().into_owned();
    config.media.base_url = "http://media.test/".to_string();
    let app = TestApp::with_config(config);
    app.collection(1, "blog", AccessLevel::Public, ListingVisibility::Public);
    app.item(1, 1, TypeUsage::Post, "With files", "Body");

    for (id, path) in [(100, "cover.jpg"), (101, "missing.jpg")] {
        app.backend.insert_file(MediaFile {
            id: FileId(id),
            path: path.to_string(),
            file_type: "image".to_string(),
            is_dir: false,
            title: Some("Cover".to_string()),
            alt: None,
            description: None,
        });
    }
    app.backend.insert_link(ItemId(1), Some(FileId(100)), "teaser", 1);
    app.backend.insert_link(ItemId(1), Some(FileId(101)), "teaser", 2);
    app.backend.insert_link(ItemId(1), None, "teaser", 3);

    let item = app.get("/api/v1/collections/blog/items/1", None).await.json();
    let attachments = item["attachments"].as_array().expect("attachments array");
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0]["file_ID"], 100);
    assert_eq!(attachments[0]["url"], "http://media.test/cover.jpg");

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

#[tokio::test]
async fn test_huge_page_number_is_past_the_end() {
    let app = blog_app();
    app.user(1, "ada");

    let items = app
        .get("/api/v1/collections/blog/items?page=9223372036854775807", None)
        .await;
    assert_eq!(items.status, StatusCode::OK);
    assert_eq!(items.json()["code"], "no_posts");

    let users = app.get("/api/v1/users?page=9223372036854775807", None).await;
    assert_eq!(users.status, StatusCode::OK);
    assert_eq!(users.json()["code"], "no_users");
}

#[tokio::test]
async fn test_unreadable_query_string_uses_envelope() {
    let app = blog_app();

    let response = app
        .get("/api/v1/collections/blog/items?page=1&page=2", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["code"], "invalid_query");
    assert_eq!(body["data"]["status"], 400);
    assert!(body["message"].as_str().unwrap_or_default().contains("page"));
}

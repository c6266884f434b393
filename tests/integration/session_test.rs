//! Session cookie lifecycle over HTTP.

use http::StatusCode;

use evocms_entity::collection::{AccessLevel, ListingVisibility};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_first_visit_sets_cookie() {
    let app = TestApp::new();
    app.collection(1, "blog", AccessLevel::Public, ListingVisibility::Public);

    let response = app.get("/api/v1/collections", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let cookie = response.set_cookie.expect("cookie set on first visit");
    assert!(cookie.starts_with("session_evocms="));
    assert!(cookie.contains("Max-Age=315360000"));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(app.backend.session_count(), 1);
}

#[tokio::test]
async fn test_cookie_resumes_session() {
    let app = TestApp::new();
    app.collection(1, "blog", AccessLevel::Public, ListingVisibility::Public);

    let first = app.get("/api/v1/collections", None).await;
    let cookie = first.cookie_pair();

    let second = app.get("/api/v1/collections", Some(&cookie)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(second.set_cookie.is_none());
    assert_eq!(app.backend.session_count(), 1);
    assert_eq!(app.backend.hit_count(), 2);
}

#[tokio::test]
async fn test_bad_cookie_starts_new_session() {
    let app = TestApp::new();

    let malformed = app.get("/api/v1/users", Some("session_evocms=not-a-cookie")).await;
    assert!(malformed.set_cookie.is_some());

    let unknown = app.get("/api/v1/users", Some("session_evocms=999_abcdef")).await;
    assert!(unknown.set_cookie.is_some());

    assert_eq!(app.backend.session_count(), 2);
}

#[tokio::test]
async fn test_health_does_not_track() {
    let app = TestApp::new();
    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["database"], "memory");
    assert!(response.set_cookie.is_none());
    assert_eq!(app.backend.session_count(), 0);
}

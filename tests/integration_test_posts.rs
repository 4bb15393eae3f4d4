mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn test_post_lifecycle() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "pw").await;
    let bob = app.register("bob", "pw").await;

    let (status, created) = app.send(
        "POST",
        "/api/v1/posts",
        Some(&alice.token),
        Some(json!({ "title": "Knife skills", "contents": "Curl your fingers.", "tags": ["technique"] })),
    ).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["author"], alice.id.as_str());
    assert!(created.get("likedBy").is_none());
    let uri = format!("/api/v1/posts/{}", created["id"].as_str().unwrap());

    let (status, fetched) = app.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["content"], "Curl your fingers.");

    let (status, _) = app.send("PATCH", &uri, Some(&bob.token), Some(json!({ "title": "Stolen" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = app.send("PATCH", &uri, Some(&alice.token), Some(json!({ "title": "Knife basics" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Knife basics");
    assert_eq!(updated["tags"], json!(["technique"]));

    let (status, body) = app.send("DELETE", &uri, Some(&bob.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["deletedCount"], 0);

    let (status, body) = app.send("DELETE", &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);

    let (status, body) = app.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_post_listing() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "pw").await;
    let bob = app.register("bob", "pw").await;

    for (user, title, tag) in [(&alice, "Sharpening", "tools"), (&alice, "Mise en place", "prep"), (&bob, "Stock", "prep")] {
        let (status, _) = app.send(
            "POST",
            "/api/v1/posts",
            Some(&user.token),
            Some(json!({ "title": title, "tags": [tag] })),
        ).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, by_bob) = app.send("GET", "/api/v1/posts?author=bob", None, None).await;
    assert_eq!(by_bob.as_array().unwrap().len(), 1);
    assert_eq!(by_bob[0]["title"], "Stock");

    let (_, prep) = app.send("GET", "/api/v1/posts?tags=prep&sortBy=title&sortOrder=ascending", None, None).await;
    let titles: Vec<&str> = prep.as_array().unwrap().iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Mise en place", "Stock"]);

    let (status, _) = app.send("POST", "/api/v1/posts", Some(&alice.token), Some(json!({ "title": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_patch_clears_image() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "pw").await;

    let (_, created) = app.send(
        "POST",
        "/api/v1/posts",
        Some(&alice.token),
        Some(json!({ "title": "Plating", "contents": "Use white plates.", "imageUrl": "https://img.example/p.png" })),
    ).await;
    let uri = format!("/api/v1/posts/{}", created["id"].as_str().unwrap());

    let (status, updated) = app.send("PATCH", &uri, Some(&alice.token), Some(json!({ "imageUrl": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["imageUrl"], Value::Null);
    assert_eq!(updated["content"], "Use white plates.");
}

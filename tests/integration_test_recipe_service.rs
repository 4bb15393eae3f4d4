mod common;

use chrono::{Duration, Utc};
use common::TestApp;
use recipe_backend::domain::models::{
    content::{ContentDraft, ContentPatch},
    listing::{SortField, SortOptions, SortDirection},
    recipe::Recipe,
};
use sqlx::types::Json;
use std::collections::HashSet;
use tokio::task::JoinSet;

fn draft(title: &str, tags: &[&str]) -> ContentDraft {
    ContentDraft {
        title: Some(title.to_string()),
        content: Some(format!("How to make {}", title)),
        ingredients: vec!["flour".to_string(), "sugar".to_string()],
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_url: None,
    }
}

#[tokio::test]
async fn test_create_preserves_fields() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;

    let created = app.state.recipe_service
        .create(&alice.id, draft("Brownies", &["dessert", "chocolate"]))
        .await
        .unwrap();

    assert_eq!(created.author, alice.id);
    assert_eq!(created.title, "Brownies");
    assert_eq!(created.ingredients.0, vec!["flour", "sugar"]);
    assert_eq!(created.tags.0, vec!["dessert", "chocolate"]);
    assert!(created.liked_by.is_empty());

    let fetched = app.state.recipe_service.get_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.content.as_deref(), Some("How to make Brownies"));
    assert_eq!(fetched.tags.0, created.tags.0);
}

#[tokio::test]
async fn test_create_requires_title() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;

    let mut no_title = draft("ignored", &[]);
    no_title.title = None;

    let err = app.state.recipe_service.create(&alice.id, no_title).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: title is required");
}

#[tokio::test]
async fn test_get_missing_recipe_is_none() {
    let app = TestApp::new().await;
    assert!(app.state.recipe_service.get_by_id("does-not-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_by_tags_intersection() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let svc = &app.state.recipe_service;

    let brownies = svc.create(&alice.id, draft("Brownies", &["dessert", "baking"])).await.unwrap();
    svc.create(&alice.id, draft("Lasagna", &["dinner"])).await.unwrap();
    let bread = svc.create(&alice.id, draft("Bread", &["baking"])).await.unwrap();

    let desserts = svc.list_by_tags(&["dessert".to_string()], SortOptions::default()).await.unwrap();
    assert_eq!(desserts.len(), 1);
    assert_eq!(desserts[0].id, brownies.id);

    let baked: HashSet<String> = svc
        .list_by_tags(&["baking".to_string(), "nonexistent".to_string()], SortOptions::default())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(baked, HashSet::from([brownies.id.clone(), bread.id.clone()]));

    assert!(svc.list_by_tags(&[], SortOptions::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_by_author_username() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let bob = app.seed_user("bob").await;
    let svc = &app.state.recipe_service;

    svc.create(&alice.id, draft("Pancakes", &[])).await.unwrap();
    svc.create(&alice.id, draft("Waffles", &[])).await.unwrap();
    svc.create(&bob.id, draft("Omelette", &[])).await.unwrap();

    let alices = svc.list_by_author_username("alice", SortOptions::default()).await.unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|r| r.author == alice.id));

    let nobody = svc.list_by_author_username("nobody", SortOptions::default()).await.unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_list_sorting() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let svc = &app.state.recipe_service;

    for title in ["Banana Bread", "Apple Pie", "Cherry Tart"] {
        svc.create(&alice.id, draft(title, &[])).await.unwrap();
    }

    let by_title = SortOptions { field: SortField::Title, direction: SortDirection::Ascending };
    let titles: Vec<String> = svc.list_all(by_title).await.unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Apple Pie", "Banana Bread", "Cherry Tart"]);

    let by_title_desc = SortOptions { field: SortField::Title, direction: SortDirection::Descending };
    let titles: Vec<String> = svc.list_all(by_title_desc).await.unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Cherry Tart", "Banana Bread", "Apple Pie"]);
}

#[tokio::test]
async fn test_update_only_by_author() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let bob = app.seed_user("bob").await;
    let svc = &app.state.recipe_service;

    let recipe = svc.create(&alice.id, draft("Soup", &["dinner"])).await.unwrap();

    let patch = ContentPatch { title: Some("Hacked".into()), ..Default::default() };
    let result = svc.update(&bob.id, &recipe.id, patch).await.unwrap();
    assert!(result.is_none());
    let unchanged = svc.get_by_id(&recipe.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Soup");

    let patch = ContentPatch {
        title: Some("Tomato Soup".into()),
        tags: Some(vec!["dinner".into(), "vegan".into()]),
        ..Default::default()
    };
    let updated = svc.update(&alice.id, &recipe.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.title, "Tomato Soup");
    assert_eq!(updated.tags.0, vec!["dinner", "vegan"]);
    // Untouched fields survive a partial patch.
    assert_eq!(updated.content, recipe.content);
    assert_eq!(updated.ingredients.0, recipe.ingredients.0);
    assert!(updated.updated_at >= recipe.updated_at);

    let missing = svc.update(&alice.id, "no-such-id", ContentPatch::default()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_rejects_blank_title() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let recipe = app.state.recipe_service.create(&alice.id, draft("Soup", &[])).await.unwrap();

    let patch = ContentPatch { title: Some("  ".into()), ..Default::default() };
    assert!(app.state.recipe_service.update(&alice.id, &recipe.id, patch).await.is_err());
}

#[tokio::test]
async fn test_delete_only_by_author() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let bob = app.seed_user("bob").await;
    let svc = &app.state.recipe_service;

    let recipe = svc.create(&alice.id, draft("Salad", &[])).await.unwrap();

    assert_eq!(svc.delete(&bob.id, &recipe.id).await.unwrap(), 0);
    assert!(svc.get_by_id(&recipe.id).await.unwrap().is_some());

    assert_eq!(svc.delete(&alice.id, &recipe.id).await.unwrap(), 1);
    assert!(svc.get_by_id(&recipe.id).await.unwrap().is_none());

    assert_eq!(svc.delete(&alice.id, &recipe.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_like_is_idempotent_and_unlike_removes() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let bob = app.seed_user("bob").await;
    let carol = app.seed_user("carol").await;
    let svc = &app.state.recipe_service;

    let recipe = svc.create(&alice.id, draft("Curry", &[])).await.unwrap();

    let once = svc.like(&bob.id, &recipe.id).await.unwrap().unwrap();
    assert_eq!(once.like_count(), 1);
    let twice = svc.like(&bob.id, &recipe.id).await.unwrap().unwrap();
    assert_eq!(twice.like_count(), 1);
    assert!(twice.is_liked_by(&bob.id));

    // Removing a like that was never given changes nothing.
    let noop = svc.unlike(&carol.id, &recipe.id).await.unwrap().unwrap();
    assert_eq!(noop.liked_by.0, vec![bob.id.clone()]);

    let removed = svc.unlike(&bob.id, &recipe.id).await.unwrap().unwrap();
    assert!(removed.liked_by.is_empty());

    assert!(svc.like(&bob.id, "no-such-id").await.unwrap().is_none());
    assert!(svc.unlike(&bob.id, "no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn test_top_by_likes_ordering() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let now = Utc::now();

    // Like counts 3, 1, 3 with strictly increasing creation times.
    let specs = [("Older Favourite", 3, 30), ("Lukewarm", 1, 20), ("Newer Favourite", 3, 10)];
    let mut ids = Vec::new();
    for (title, likes, minutes_ago) in specs {
        let mut recipe = Recipe::new(alice.id.clone(), title.to_string(), ContentDraft::default());
        recipe.liked_by = Json((0..likes).map(|i| format!("fan-{}", i)).collect());
        recipe.created_at = now - Duration::minutes(minutes_ago);
        recipe.updated_at = recipe.created_at;
        ids.push(app.state.recipe_repo.create(&recipe).await.unwrap().id);
    }

    let top = app.state.recipe_service.top_by_likes(1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, ids[2]);

    let all = app.state.recipe_service.top_by_likes(10).await.unwrap();
    let order: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec![ids[2].as_str(), ids[0].as_str(), ids[1].as_str()]);

    // Out-of-range limits are clamped rather than rejected.
    assert_eq!(app.state.recipe_service.top_by_likes(0).await.unwrap().len(), 1);
    assert_eq!(app.state.recipe_service.top_by_likes(10_000).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_concurrent_likes_are_not_lost() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let recipe = app.state.recipe_service.create(&alice.id, draft("Popular Pie", &[])).await.unwrap();

    let fan_count = 20;
    let mut set = JoinSet::new();
    for i in 0..fan_count {
        let state = app.state.clone();
        let recipe_id = recipe.id.clone();
        set.spawn(async move {
            let fan = format!("fan-{}", i);
            state.recipe_service.like(&fan, &recipe_id).await.expect("like failed");
            // Repeat to exercise idempotence under contention.
            state.recipe_service.like(&fan, &recipe_id).await.expect("like failed");
        });
    }
    while let Some(res) = set.join_next().await {
        res.unwrap();
    }

    let stored = app.state.recipe_service.get_by_id(&recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.like_count(), fan_count);
    let unique: HashSet<&String> = stored.liked_by.iter().collect();
    assert_eq!(unique.len(), fan_count);
}

#[tokio::test]
async fn test_update_clears_nullable_fields_and_trims_title() {
    let app = TestApp::new().await;
    let alice = app.seed_user("alice").await;
    let svc = &app.state.recipe_service;

    let mut with_image = draft("Tart", &["dessert"]);
    with_image.image_url = Some("http://img".to_string());
    let recipe = svc.create(&alice.id, with_image).await.unwrap();

    let patch = ContentPatch {
        title: Some("  Pie  ".into()),
        content: Some(None),
        image_url: Some(None),
        ..Default::default()
    };
    let updated = svc.update(&alice.id, &recipe.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.title, "Pie");
    assert_eq!(updated.content, None);
    assert_eq!(updated.image_url, None);
    assert_eq!(updated.tags.0, vec!["dessert"]);

    let patch = ContentPatch { image_url: Some(Some("http://img/2".into())), ..Default::default() };
    let updated = svc.update(&alice.id, &recipe.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.image_url.as_deref(), Some("http://img/2"));
    assert_eq!(updated.title, "Pie");
}

#[tokio::test]
async fn test_create_rejects_unknown_author() {
    let app = TestApp::new().await;

    let err = app.state.recipe_service
        .create("no-such-user", draft("Ghost Stew", &[]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized");
}

use recipe_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::models::user::User,
    infra::{
        notifier::broadcast_notifier::BroadcastNotifier,
        repositories::{
            sqlite_post_repo::SqlitePostRepo,
            sqlite_recipe_repo::SqliteRecipeRepo,
            sqlite_user_repo::SqliteUserRepo,
        },
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "integration-test-secret".to_string(),
            auth_issuer: "test-issuer".to_string(),
            token_ttl_hours: 1,
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteRecipeRepo::new(pool.clone())),
            Arc::new(SqlitePostRepo::new(pool.clone())),
            Arc::new(BroadcastNotifier::default()),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Inserts a user straight into the store, bypassing password hashing.
    pub async fn seed_user(&self, username: &str) -> User {
        self.state.user_repo
            .create(&User::new(username.to_string(), "not-a-real-hash".to_string()))
            .await
            .expect("Failed to seed user")
    }

    /// Signs up and logs in through the HTTP API.
    pub async fn register(&self, username: &str, password: &str) -> TestUser {
        let payload = serde_json::json!({ "username": username, "password": password });

        let (status, _) = self.send("POST", "/api/v1/user/signup", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed in test helper");

        let (status, body) = self.send("POST", "/api/v1/user/login", None, Some(payload)).await;
        if !status.is_success() {
            panic!("Login failed in test helper: status {}", status);
        }
        let token = body["token"].as_str().expect("No token in body").to_string();

        let user = self.state.user_repo.find_by_username(username).await
            .unwrap()
            .expect("registered user missing");

        TestUser { id: user.id, username: username.to_string(), token }
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

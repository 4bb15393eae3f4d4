use axum::{
    body::Body,
    extract::Request,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, post as posts, recipe, socket, user};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/socket", get(socket::socket))

        // Users
        .route("/api/v1/user/signup", post(user::signup))
        .route("/api/v1/user/login", post(user::login))
        .route("/api/v1/users/{id}", get(user::get_user_info))

        // Recipes
        .route("/api/v1/recipes", get(recipe::list_recipes).post(recipe::create_recipe))
        .route("/api/v1/recipes/{id}", get(recipe::get_recipe).patch(recipe::update_recipe).delete(recipe::delete_recipe))
        .route("/api/v1/recipes/{id}/like", post(recipe::like_recipe))
        .route("/api/v1/recipes/{id}/unlike", post(recipe::unlike_recipe))
        .route("/api/v1/recipes-popular", get(recipe::popular_recipes))

        // Posts
        .route("/api/v1/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/v1/posts/{id}", get(posts::get_post).patch(posts::update_post).delete(posts::delete_post))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}

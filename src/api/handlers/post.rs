use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateContentRequest, ListQuery, UpdateContentRequest},
    responses::DeleteResponse,
};
use crate::domain::models::{content::ContentPatch, listing::SortOptions, post::Post};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort = SortOptions::parse(query.sort_by.as_deref(), query.sort_order.as_deref())?;

    let posts = match (query.author(), query.tag_list()) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation("query by either author or tags, not both".into()));
        }
        (Some(author), None) => state.post_service.list_by_author_username(author, sort).await?,
        (None, Some(tags)) => state.post_service.list_by_tags(&tags, sort).await?,
        (None, None) => state.post_service.list_all(sort).await?,
    };

    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.post_service.get_by_id(&post_id).await? {
        Some(post) => Ok((StatusCode::OK, Json(Some(post)))),
        None => Ok((StatusCode::NOT_FOUND, Json(None::<Post>))),
    }
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.post_service.create(&user_id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patch: ContentPatch = payload.try_into()?;
    state.post_service.update(&user_id, &post_id, patch).await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted_count = state.post_service.delete(&user_id, &post_id).await?;
    let status = if deleted_count == 0 { StatusCode::NOT_FOUND } else { StatusCode::OK };
    Ok((status, Json(DeleteResponse { deleted_count })))
}

use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateContentRequest, ListQuery, PopularQuery, UpdateContentRequest},
    responses::DeleteResponse,
};
use crate::domain::models::{content::ContentPatch, listing::SortOptions, recipe::{NewRecipeEvent, Recipe}};
use crate::domain::services::recipe_service::DEFAULT_POPULAR_LIMIT;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort = SortOptions::parse(query.sort_by.as_deref(), query.sort_order.as_deref())?;

    let recipes = match (query.author(), query.tag_list()) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation("query by either author or tags, not both".into()));
        }
        (Some(author), None) => state.recipe_service.list_by_author_username(author, sort).await?,
        (None, Some(tags)) => state.recipe_service.list_by_tags(&tags, sort).await?,
        (None, None) => state.recipe_service.list_all(sort).await?,
    };

    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.recipe_service.get_by_id(&recipe_id).await? {
        Some(recipe) => Ok((StatusCode::OK, Json(Some(recipe)))),
        None => Ok((StatusCode::NOT_FOUND, Json(None::<Recipe>))),
    }
}

pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = state.recipe_service.create(&user_id, payload.into()).await?;

    let author = match state.user_repo.find_by_id(&recipe.author).await {
        Ok(Some(user)) => user.username,
        _ => recipe.author.clone(),
    };
    state.notifier.publish(NewRecipeEvent {
        id: recipe.id.clone(),
        title: recipe.title.clone(),
        author,
    });

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patch: ContentPatch = payload.try_into()?;
    match state.recipe_service.update(&user_id, &recipe_id, patch).await? {
        Some(recipe) => Ok(Json(recipe)),
        None => {
            warn!("Update of recipe {} by {} matched nothing", recipe_id, user_id);
            Err(AppError::NotFound("Recipe not found".into()))
        }
    }
}

pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted_count = state.recipe_service.delete(&user_id, &recipe_id).await?;
    let status = if deleted_count == 0 {
        warn!("Delete of recipe {} by {} matched nothing", recipe_id, user_id);
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DeleteResponse { deleted_count })))
}

pub async fn like_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = state.recipe_service.like(&user_id, &recipe_id).await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))?;
    info!("User {} liked recipe {}", user_id, recipe_id);
    Ok(Json(recipe))
}

pub async fn unlike_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = state.recipe_service.unlike(&user_id, &recipe_id).await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))?;
    info!("User {} unliked recipe {}", user_id, recipe_id);
    Ok(Json(recipe))
}

pub async fn popular_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PopularQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    let recipes = state.recipe_service.top_by_likes(limit).await?;
    Ok(Json(recipes))
}

use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::CredentialsRequest, responses::SignupResponse};
use crate::domain::models::auth::TokenResponse;
use crate::error::AppError;
use std::sync::Arc;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.signup(&payload.username, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(SignupResponse { username: user.username })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.user_service.login(&payload.username, &payload.password).await?;
    Ok(Json(TokenResponse { token }))
}

pub async fn get_user_info(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let info = state.user_service.get_user_info(&user_id).await?;
    Ok(Json(info))
}

// src/api/users.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::{UserDto, UserPayload};
use crate::api::state::AppState;
use crate::error::AppResult;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> AppResult<Json<UserDto>> {
    let user = state
        .user_service
        .create_user(payload.into_create_request())?;
    Ok(Json(user.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> AppResult<Json<UserDto>> {
    let request = payload.into_update_request()?;
    let user = state.user_service.update_user(request)?;
    Ok(Json(user.into()))
}

pub async fn index(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    let users = state.user_service.all_users()?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.user_by_id(user_id)?;
    Ok(Json(user.into()))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    state.user_service.add_friend(user_id, friend_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    state.user_service.remove_friend(user_id, friend_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn friends(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<UserDto>>> {
    let friends = state.user_service.friends_of(user_id)?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}

pub async fn common_friends(
    State(state): State<AppState>,
    Path((user_id, other_id)): Path<(i64, i64)>,
) -> AppResult<Json<Vec<UserDto>>> {
    let shared = state.user_service.common_friends(user_id, other_id)?;
    Ok(Json(shared.into_iter().map(UserDto::from).collect()))
}

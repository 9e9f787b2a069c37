// src/api/films.rs
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::dto::{FilmDto, FilmPayload};
use crate::api::state::AppState;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<FilmPayload>,
) -> AppResult<Json<FilmDto>> {
    let film = state
        .film_service
        .create_film(payload.into_create_request())?;
    Ok(Json(film.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<FilmPayload>,
) -> AppResult<Json<FilmDto>> {
    let request = payload.into_update_request()?;
    let film = state.film_service.update_film(request)?;
    Ok(Json(film.into()))
}

pub async fn index(State(state): State<AppState>) -> AppResult<Json<Vec<FilmDto>>> {
    let films = state.film_service.all_films()?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

pub async fn show(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> AppResult<Json<FilmDto>> {
    let film = state.film_service.film_by_id(film_id)?;
    Ok(Json(film.into()))
}

pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> AppResult<Json<Vec<FilmDto>>> {
    let films = state.film_service.popular_films(query.count)?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

pub async fn like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i64, i64)>,
) -> AppResult<()> {
    state.film_service.add_like(film_id, user_id)
}

pub async fn unlike(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i64, i64)>,
) -> AppResult<()> {
    state.film_service.remove_like(film_id, user_id)
}

// src/api/reference.rs
//
// Read-only endpoints for the genre and MPA rating catalogs.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::dto::{GenreDto, MpaDto};
use crate::api::state::AppState;
use crate::error::AppResult;

pub async fn genre_index(State(state): State<AppState>) -> AppResult<Json<Vec<GenreDto>>> {
    let genres = state.genre_service.list_genres()?;
    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

pub async fn genre_show(
    State(state): State<AppState>,
    Path(genre_id): Path<i64>,
) -> AppResult<Json<GenreDto>> {
    let genre = state.genre_service.genre_by_id(genre_id)?;
    Ok(Json(genre.into()))
}

pub async fn mpa_index(State(state): State<AppState>) -> AppResult<Json<Vec<MpaDto>>> {
    let ratings = state.mpa_service.list_ratings()?;
    Ok(Json(ratings.into_iter().map(MpaDto::from).collect()))
}

pub async fn mpa_show(
    State(state): State<AppState>,
    Path(mpa_id): Path<i64>,
) -> AppResult<Json<MpaDto>> {
    let rating = state.mpa_service.rating_by_id(mpa_id)?;
    Ok(Json(rating.into()))
}

// src/api/state.rs
use crate::services::{FilmService, GenreService, MpaService, UserService};
use std::sync::Arc;

/// Shared service handles the route handlers work through.
///
/// Cloned by axum for every request; each field is an `Arc`, so a clone
/// is a handful of reference count bumps.
#[derive(Clone)]
pub struct AppState {
    pub film_service: Arc<FilmService>,
    pub user_service: Arc<UserService>,
    pub genre_service: Arc<GenreService>,
    pub mpa_service: Arc<MpaService>,
}

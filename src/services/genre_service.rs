// src/services/genre_service.rs
use crate::domain::Genre;
use crate::error::{AppError, AppResult};
use crate::repositories::GenreRepository;
use std::sync::Arc;

/// Read-only access to the genre reference catalog.
pub struct GenreService {
    genre_repo: Arc<dyn GenreRepository>,
}

impl GenreService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repo }
    }

    pub fn genre_by_id(&self, genre_id: i64) -> AppResult<Genre> {
        self.genre_repo
            .get_by_id(genre_id)?
            .ok_or(AppError::NotFound("genre", genre_id))
    }

    pub fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genre_repo.list_all()
    }
}

// src/services/mpa_service.rs
use crate::domain::Mpa;
use crate::error::{AppError, AppResult};
use crate::repositories::MpaRepository;
use std::sync::Arc;

/// Read-only access to the MPA rating reference catalog.
pub struct MpaService {
    mpa_repo: Arc<dyn MpaRepository>,
}

impl MpaService {
    pub fn new(mpa_repo: Arc<dyn MpaRepository>) -> Self {
        Self { mpa_repo }
    }

    pub fn rating_by_id(&self, mpa_id: i64) -> AppResult<Mpa> {
        self.mpa_repo
            .get_by_id(mpa_id)?
            .ok_or(AppError::NotFound("mpa rating", mpa_id))
    }

    pub fn list_ratings(&self) -> AppResult<Vec<Mpa>> {
        self.mpa_repo.list_all()
    }
}

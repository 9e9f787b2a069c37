// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Entity kind plus the id the caller referenced.
    #[error("{0} with id {1} not found")]
    NotFound(&'static str, i64),

    /// The target exists but the update breaks a cross-entity rule,
    /// e.g. the new email already belongs to a different user.
    #[error("{0}")]
    UpdateConflict(String),

    #[error("entity id is required for update")]
    MissingId,

    /// A storage operation that should have taken effect did not
    /// (zero-row update, missing generated key).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

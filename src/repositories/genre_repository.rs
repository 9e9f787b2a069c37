// src/repositories/genre_repository.rs
//
// Genre lookup (reference data, read-only)

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Genre;
use crate::error::{AppError, AppResult};

pub trait GenreRepository: Send + Sync {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Genre>>;
    fn list_all(&self) -> AppResult<Vec<Genre>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
        Ok(Genre {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM genres WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_genre) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM genres ORDER BY id")?;

        let genres: Vec<Genre> = stmt
            .query_map([], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM genres WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

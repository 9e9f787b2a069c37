// src/repositories/mpa_repository.rs
//
// MPA rating lookup (reference data, read-only)

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Mpa;
use crate::error::{AppError, AppResult};

pub trait MpaRepository: Send + Sync {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Mpa>>;
    fn list_all(&self) -> AppResult<Vec<Mpa>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteMpaRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMpaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_mpa(row: &Row) -> Result<Mpa, rusqlite::Error> {
        Ok(Mpa {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
        })
    }
}

impl MpaRepository for SqliteMpaRepository {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, name, description FROM mpa_ratings WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_mpa) {
            Ok(mpa) => Ok(Some(mpa)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name, description FROM mpa_ratings ORDER BY id")?;

        let ratings: Vec<Mpa> = stmt
            .query_map([], Self::row_to_mpa)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ratings)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM mpa_ratings WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

// src/repositories/film_repository.rs
//
// Film persistence (scalar rows only; associations live in the
// association repository)

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::film::{FilmRecord, NewFilm};
use crate::error::{AppError, AppResult};

pub trait FilmRepository: Send + Sync {
    /// Insert a new film row and return the store-assigned id.
    fn create(&self, film: &NewFilm) -> AppResult<i64>;
    /// Overwrite all scalar fields of an existing row.
    fn update(&self, film: &FilmRecord) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<FilmRecord>>;
    fn list_all(&self) -> AppResult<Vec<FilmRecord>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to FilmRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_film(row: &Row) -> Result<FilmRecord, rusqlite::Error> {
        let release_date_str: String = row.get("release_date")?;
        let release_date = NaiveDate::parse_from_str(&release_date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let duration_seconds: i64 = row.get("duration")?;

        Ok(FilmRecord {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            release_date,
            duration: Duration::seconds(duration_seconds),
        })
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn create(&self, film: &NewFilm) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO films (name, description, release_date, duration)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                film.name,
                film.description,
                film.release_date.format("%Y-%m-%d").to_string(),
                film.duration.num_seconds(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, film: &FilmRecord) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE films SET name = ?1, description = ?2, release_date = ?3, duration = ?4
             WHERE id = ?5",
            params![
                film.name,
                film.description,
                film.release_date.format("%Y-%m-%d").to_string(),
                film.duration.num_seconds(),
                film.id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::Internal(format!(
                "update of film {} affected no rows",
                film.id
            )));
        }

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<FilmRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, release_date, duration
             FROM films WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_film) {
            Ok(film) => Ok(Some(film)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<FilmRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, release_date, duration
             FROM films
             ORDER BY id",
        )?;

        let films: Vec<FilmRecord> = stmt
            .query_map([], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(films)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM films WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

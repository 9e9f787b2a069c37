// src/repositories/user_repository.rs
//
// User persistence (scalar rows only; friendship edges live in the
// association repository)

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::user::{NewUser, UserRecord};
use crate::error::{AppError, AppResult};

pub trait UserRepository: Send + Sync {
    /// Insert a new user row and return the store-assigned id.
    fn create(&self, user: &NewUser) -> AppResult<i64>;
    /// Overwrite all scalar fields of an existing row.
    fn update(&self, user: &UserRecord) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<UserRecord>>;
    fn list_all(&self) -> AppResult<Vec<UserRecord>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
    /// True when `email` is already stored for a user other than `user_id`.
    fn email_taken_by_other(&self, email: &str, user_id: i64) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to UserRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_user(row: &Row) -> Result<UserRecord, rusqlite::Error> {
        let birthday_str: String = row.get("birthday")?;
        let birthday = NaiveDate::parse_from_str(&birthday_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(UserRecord {
            id: row.get("id")?,
            login: row.get("login")?,
            email: row.get("email")?,
            name: row.get("name")?,
            birthday,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: &NewUser) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (email, login, name, birthday)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.format("%Y-%m-%d").to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, user: &UserRecord) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4
             WHERE id = ?5",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.format("%Y-%m-%d").to_string(),
                user.id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::Internal(format!(
                "update of user {} affected no rows",
                user.id
            )));
        }

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<UserRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, email, login, name, birthday
             FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<UserRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, email, login, name, birthday
             FROM users
             ORDER BY id",
        )?;

        let users: Vec<UserRecord> = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn email_taken_by_other(&self, email: &str, user_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?1 AND id != ?2",
            params![email, user_id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

// src/repositories/association_repository.rs
//
// Edge persistence: film-genre, film-rating, film-like and friendship
// associations. Pure edge mutation and lookup; existence rules beyond
// the film checks required here belong to the services.

use std::collections::HashMap;
use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{Genre, Mpa};
use crate::error::{AppError, AppResult};

pub trait AssociationRepository: Send + Sync {
    /// Replace the full genre edge set of a film (delete-all-then-insert).
    /// Fails with NotFound when the film is unknown.
    fn replace_genres(&self, film_id: i64, genre_ids: &[i64]) -> AppResult<()>;
    /// Attach the single rating of a film, overwriting any prior value.
    /// Fails with NotFound when the film is unknown.
    fn set_rating(&self, film_id: i64, mpa_id: i64) -> AppResult<()>;
    fn genres_of(&self, film_id: i64) -> AppResult<Vec<Genre>>;
    fn rating_of(&self, film_id: i64) -> AppResult<Option<Mpa>>;

    /// Add a like edge; adding an existing edge is a no-op.
    fn add_like(&self, film_id: i64, user_id: i64) -> AppResult<()>;
    /// Remove a like edge; removing an absent edge is a no-op.
    fn remove_like(&self, film_id: i64, user_id: i64) -> AppResult<()>;
    fn like_count_of(&self, film_id: i64) -> AppResult<i64>;
    /// Like counts for every stored film, zero-like films included.
    fn like_counts(&self) -> AppResult<HashMap<i64, i64>>;

    /// Add a directed friendship edge; mirroring is the user service's job.
    fn add_friend_edge(&self, user_id: i64, friend_id: i64) -> AppResult<()>;
    /// Remove a directed friendship edge; removing an absent edge is a no-op.
    fn remove_friend_edge(&self, user_id: i64, friend_id: i64) -> AppResult<()>;
    fn friend_ids_of(&self, user_id: i64) -> AppResult<Vec<i64>>;
}

pub struct SqliteAssociationRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAssociationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
        Ok(Genre {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    fn row_to_mpa(row: &Row) -> Result<Mpa, rusqlite::Error> {
        Ok(Mpa {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
        })
    }

    fn film_exists(conn: &rusqlite::Connection, film_id: i64) -> AppResult<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM films WHERE id = ?1",
            params![film_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl AssociationRepository for SqliteAssociationRepository {
    fn replace_genres(&self, film_id: i64, genre_ids: &[i64]) -> AppResult<()> {
        let mut conn = self.pool.get()?;

        if !Self::film_exists(&conn, film_id)? {
            return Err(AppError::NotFound("film", film_id));
        }

        // Delete-all-then-insert inside one transaction, so a failing
        // insert leaves the previous edge set intact.
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM film_genres WHERE film_id = ?1", params![film_id])?;
        for genre_id in genre_ids {
            tx.execute(
                "INSERT OR IGNORE INTO film_genres (film_id, genre_id) VALUES (?1, ?2)",
                params![film_id, genre_id],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn set_rating(&self, film_id: i64, mpa_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE films SET mpa_id = ?1 WHERE id = ?2",
            params![mpa_id, film_id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound("film", film_id));
        }

        Ok(())
    }

    fn genres_of(&self, film_id: i64) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT g.id, g.name
             FROM film_genres fg
             JOIN genres g ON g.id = fg.genre_id
             WHERE fg.film_id = ?1
             ORDER BY g.id",
        )?;

        let genres: Vec<Genre> = stmt
            .query_map(params![film_id], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn rating_of(&self, film_id: i64) -> AppResult<Option<Mpa>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT m.id, m.name, m.description
             FROM films f
             JOIN mpa_ratings m ON m.id = f.mpa_id
             WHERE f.id = ?1",
        )?;

        match stmt.query_row(params![film_id], Self::row_to_mpa) {
            Ok(mpa) => Ok(Some(mpa)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR IGNORE INTO film_likes (film_id, user_id) VALUES (?1, ?2)",
            params![film_id, user_id],
        )?;

        Ok(())
    }

    fn remove_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM film_likes WHERE film_id = ?1 AND user_id = ?2",
            params![film_id, user_id],
        )?;

        Ok(())
    }

    fn like_count_of(&self, film_id: i64) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM film_likes WHERE film_id = ?1",
            params![film_id],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    fn like_counts(&self) -> AppResult<HashMap<i64, i64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT f.id, COUNT(fl.user_id) AS likes
             FROM films f
             LEFT JOIN film_likes fl ON fl.film_id = f.id
             GROUP BY f.id",
        )?;

        let counts: HashMap<i64, i64> = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(counts)
    }

    fn add_friend_edge(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id) VALUES (?1, ?2)",
            params![user_id, friend_id],
        )?;

        Ok(())
    }

    fn remove_friend_edge(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )?;

        Ok(())
    }

    fn friend_ids_of(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT friend_id FROM friendships WHERE user_id = ?1 ORDER BY friend_id",
        )?;

        let ids: Vec<i64> = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, initialize_database};
    use crate::domain::film::NewFilm;
    use crate::domain::user::NewUser;
    use crate::repositories::film_repository::{FilmRepository, SqliteFilmRepository};
    use crate::repositories::user_repository::{SqliteUserRepository, UserRepository};
    use chrono::{Duration, NaiveDate};

    struct Fixture {
        films: SqliteFilmRepository,
        users: SqliteUserRepository,
        assoc: SqliteAssociationRepository,
    }

    fn fixture() -> Fixture {
        let pool = Arc::new(create_test_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        Fixture {
            films: SqliteFilmRepository::new(pool.clone()),
            users: SqliteUserRepository::new(pool.clone()),
            assoc: SqliteAssociationRepository::new(pool),
        }
    }

    fn add_film(fx: &Fixture, name: &str) -> i64 {
        fx.films
            .create(&NewFilm {
                name: name.to_string(),
                description: "A film".to_string(),
                release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                duration: Duration::minutes(90),
            })
            .unwrap()
    }

    fn add_user(fx: &Fixture, login: &str) -> i64 {
        fx.users
            .create(&NewUser {
                login: login.to_string(),
                email: format!("{}@example.com", login),
                name: login.to_string(),
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            })
            .unwrap()
    }

    #[test]
    fn test_replace_genres_swaps_full_set() {
        let fx = fixture();
        let film = add_film(&fx, "Heat");

        fx.assoc.replace_genres(film, &[1, 2, 3]).unwrap();
        let first: Vec<i64> = fx.assoc.genres_of(film).unwrap().iter().map(|g| g.id).collect();
        assert_eq!(first, vec![1, 2, 3]);

        fx.assoc.replace_genres(film, &[4]).unwrap();
        let second: Vec<i64> = fx.assoc.genres_of(film).unwrap().iter().map(|g| g.id).collect();
        assert_eq!(second, vec![4]);

        fx.assoc.replace_genres(film, &[]).unwrap();
        assert!(fx.assoc.genres_of(film).unwrap().is_empty());
    }

    #[test]
    fn test_replace_genres_unknown_film_is_not_found() {
        let fx = fixture();

        match fx.assoc.replace_genres(77, &[1]) {
            Err(AppError::NotFound("film", 77)) => {}
            other => panic!("expected film not found, got {:?}", other),
        }
    }

    #[test]
    fn test_set_rating_overwrites() {
        let fx = fixture();
        let film = add_film(&fx, "Heat");

        assert!(fx.assoc.rating_of(film).unwrap().is_none());

        fx.assoc.set_rating(film, 4).unwrap();
        assert_eq!(fx.assoc.rating_of(film).unwrap().unwrap().name, "R");

        fx.assoc.set_rating(film, 1).unwrap();
        assert_eq!(fx.assoc.rating_of(film).unwrap().unwrap().name, "G");
    }

    #[test]
    fn test_set_rating_unknown_film_is_not_found() {
        let fx = fixture();

        match fx.assoc.set_rating(12, 1) {
            Err(AppError::NotFound("film", 12)) => {}
            other => panic!("expected film not found, got {:?}", other),
        }
    }

    #[test]
    fn test_likes_are_idempotent_edges() {
        let fx = fixture();
        let film = add_film(&fx, "Heat");
        let user = add_user(&fx, "amy");

        fx.assoc.add_like(film, user).unwrap();
        fx.assoc.add_like(film, user).unwrap();
        assert_eq!(fx.assoc.like_count_of(film).unwrap(), 1);

        fx.assoc.remove_like(film, user).unwrap();
        assert_eq!(fx.assoc.like_count_of(film).unwrap(), 0);

        // Removing again is a no-op, not an error
        fx.assoc.remove_like(film, user).unwrap();
    }

    #[test]
    fn test_like_counts_include_zero_like_films() {
        let fx = fixture();
        let liked = add_film(&fx, "Heat");
        let ignored = add_film(&fx, "Unwatched");
        let user = add_user(&fx, "amy");

        fx.assoc.add_like(liked, user).unwrap();

        let counts = fx.assoc.like_counts().unwrap();
        assert_eq!(counts.get(&liked), Some(&1));
        assert_eq!(counts.get(&ignored), Some(&0));
    }

    #[test]
    fn test_friend_edges_are_directed() {
        let fx = fixture();
        let amy = add_user(&fx, "amy");
        let bob = add_user(&fx, "bob");

        fx.assoc.add_friend_edge(amy, bob).unwrap();

        assert_eq!(fx.assoc.friend_ids_of(amy).unwrap(), vec![bob]);
        assert!(fx.assoc.friend_ids_of(bob).unwrap().is_empty());

        fx.assoc.remove_friend_edge(amy, bob).unwrap();
        assert!(fx.assoc.friend_ids_of(amy).unwrap().is_empty());

        // Removing an absent edge is a no-op
        fx.assoc.remove_friend_edge(amy, bob).unwrap();
    }
}

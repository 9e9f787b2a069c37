// src/repositories/memory.rs
//
// In-memory storage backend. One store object owns every collection
// behind a single RwLock and implements all repository traits, so an
// Arc<MemoryStore> can stand in for each Arc<dyn ...Repository>.
//
// Id generation is a monotonic counter per entity; ids are never reused.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::RwLock;

use crate::domain::film::{FilmRecord, NewFilm};
use crate::domain::user::{NewUser, UserRecord};
use crate::domain::{Genre, Mpa};
use crate::error::{AppError, AppResult};
use crate::repositories::association_repository::AssociationRepository;
use crate::repositories::film_repository::FilmRepository;
use crate::repositories::genre_repository::GenreRepository;
use crate::repositories::mpa_repository::MpaRepository;
use crate::repositories::user_repository::UserRepository;

struct MemoryInner {
    films: BTreeMap<i64, FilmRecord>,
    users: BTreeMap<i64, UserRecord>,
    genres: BTreeMap<i64, Genre>,
    ratings: BTreeMap<i64, Mpa>,

    // film id -> genre ids
    film_genres: HashMap<i64, BTreeSet<i64>>,
    // film id -> mpa id
    film_ratings: HashMap<i64, i64>,
    // film id -> ids of users who like it
    film_likes: HashMap<i64, HashSet<i64>>,
    // user id -> friend ids (directed; the user service mirrors)
    friendships: HashMap<i64, BTreeSet<i64>>,

    next_film_id: i64,
    next_user_id: i64,
}

pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store pre-seeded with the same reference data the
    /// SQLite schema ships.
    pub fn new() -> Self {
        let genres = [
            (1, "Comedy"),
            (2, "Drama"),
            (3, "Animation"),
            (4, "Thriller"),
            (5, "Documentary"),
            (6, "Action"),
        ]
        .into_iter()
        .map(|(id, name)| {
            (
                id,
                Genre {
                    id,
                    name: name.to_string(),
                },
            )
        })
        .collect();

        let ratings = [
            (1, "G", "No age restrictions"),
            (2, "PG", "Parental guidance suggested for young children"),
            (3, "PG-13", "Not recommended for children under 13"),
            (4, "R", "Under 17 requires an accompanying adult"),
            (5, "NC-17", "No one 17 and under admitted"),
        ]
        .into_iter()
        .map(|(id, name, description)| {
            (
                id,
                Mpa {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                },
            )
        })
        .collect();

        Self {
            inner: RwLock::new(MemoryInner {
                films: BTreeMap::new(),
                users: BTreeMap::new(),
                genres,
                ratings,
                film_genres: HashMap::new(),
                film_ratings: HashMap::new(),
                film_likes: HashMap::new(),
                friendships: HashMap::new(),
                next_film_id: 1,
                next_user_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilmRepository for MemoryStore {
    fn create(&self, film: &NewFilm) -> AppResult<i64> {
        let mut inner = self.inner.write().unwrap();

        let id = inner.next_film_id;
        inner.next_film_id += 1;

        inner.films.insert(
            id,
            FilmRecord {
                id,
                name: film.name.clone(),
                description: film.description.clone(),
                release_date: film.release_date,
                duration: film.duration,
            },
        );

        Ok(id)
    }

    fn update(&self, film: &FilmRecord) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();

        match inner.films.get_mut(&film.id) {
            Some(stored) => {
                *stored = film.clone();
                Ok(())
            }
            None => Err(AppError::Internal(format!(
                "update of film {} affected no rows",
                film.id
            ))),
        }
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<FilmRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.films.get(&id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<FilmRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.films.values().cloned().collect())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.films.contains_key(&id))
    }
}

impl UserRepository for MemoryStore {
    fn create(&self, user: &NewUser) -> AppResult<i64> {
        let mut inner = self.inner.write().unwrap();

        let id = inner.next_user_id;
        inner.next_user_id += 1;

        inner.users.insert(
            id,
            UserRecord {
                id,
                login: user.login.clone(),
                email: user.email.clone(),
                name: user.name.clone(),
                birthday: user.birthday,
            },
        );

        Ok(id)
    }

    fn update(&self, user: &UserRecord) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();

        match inner.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AppError::Internal(format!(
                "update of user {} affected no rows",
                user.id
            ))),
        }
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<UserRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.get(&id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<UserRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.values().cloned().collect())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.contains_key(&id))
    }

    fn email_taken_by_other(&self, email: &str, user_id: i64) -> AppResult<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .users
            .values()
            .any(|u| u.id != user_id && u.email == email))
    }
}

impl GenreRepository for MemoryStore {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.genres.get(&id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<Genre>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.genres.values().cloned().collect())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.genres.contains_key(&id))
    }
}

impl MpaRepository for MemoryStore {
    fn get_by_id(&self, id: i64) -> AppResult<Option<Mpa>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.ratings.get(&id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<Mpa>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.ratings.values().cloned().collect())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.ratings.contains_key(&id))
    }
}

impl AssociationRepository for MemoryStore {
    fn replace_genres(&self, film_id: i64, genre_ids: &[i64]) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();

        if !inner.films.contains_key(&film_id) {
            return Err(AppError::NotFound("film", film_id));
        }

        inner
            .film_genres
            .insert(film_id, genre_ids.iter().copied().collect());

        Ok(())
    }

    fn set_rating(&self, film_id: i64, mpa_id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();

        if !inner.films.contains_key(&film_id) {
            return Err(AppError::NotFound("film", film_id));
        }

        inner.film_ratings.insert(film_id, mpa_id);

        Ok(())
    }

    fn genres_of(&self, film_id: i64) -> AppResult<Vec<Genre>> {
        let inner = self.inner.read().unwrap();

        let genres = match inner.film_genres.get(&film_id) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| inner.genres.get(id).cloned())
                .collect(),
            None => Vec::new(),
        };

        Ok(genres)
    }

    fn rating_of(&self, film_id: i64) -> AppResult<Option<Mpa>> {
        let inner = self.inner.read().unwrap();

        Ok(inner
            .film_ratings
            .get(&film_id)
            .and_then(|mpa_id| inner.ratings.get(mpa_id))
            .cloned())
    }

    fn add_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.film_likes.entry(film_id).or_default().insert(user_id);
        Ok(())
    }

    fn remove_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        if let Some(likes) = inner.film_likes.get_mut(&film_id) {
            likes.remove(&user_id);
        }
        Ok(())
    }

    fn like_count_of(&self, film_id: i64) -> AppResult<i64> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .film_likes
            .get(&film_id)
            .map_or(0, |likes| likes.len() as i64))
    }

    fn like_counts(&self) -> AppResult<HashMap<i64, i64>> {
        let inner = self.inner.read().unwrap();

        // Iterate films, not the like map, so zero-like films appear.
        Ok(inner
            .films
            .keys()
            .map(|film_id| {
                let count = inner
                    .film_likes
                    .get(film_id)
                    .map_or(0, |likes| likes.len() as i64);
                (*film_id, count)
            })
            .collect())
    }

    fn add_friend_edge(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .friendships
            .entry(user_id)
            .or_default()
            .insert(friend_id);
        Ok(())
    }

    fn remove_friend_edge(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        if let Some(friends) = inner.friendships.get_mut(&user_id) {
            friends.remove(&friend_id);
        }
        Ok(())
    }

    fn friend_ids_of(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .friendships
            .get(&user_id)
            .map_or_else(Vec::new, |friends| friends.iter().copied().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn sample_film(name: &str) -> NewFilm {
        NewFilm {
            name: name.to_string(),
            description: "A film".to_string(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            duration: Duration::minutes(90),
        }
    }

    fn sample_user(login: &str) -> NewUser {
        NewUser {
            login: login.to_string(),
            email: format!("{}@example.com", login),
            name: login.to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_reference_data_seeded() {
        let store = MemoryStore::new();

        assert_eq!(GenreRepository::list_all(&store).unwrap().len(), 6);
        assert_eq!(MpaRepository::list_all(&store).unwrap().len(), 5);
        assert_eq!(
            GenreRepository::get_by_id(&store, 1).unwrap().unwrap().name,
            "Comedy"
        );
        assert_eq!(
            MpaRepository::get_by_id(&store, 5).unwrap().unwrap().name,
            "NC-17"
        );
    }

    #[test]
    fn test_film_ids_are_monotonic() {
        let store = MemoryStore::new();

        let first = FilmRepository::create(&store, &sample_film("A")).unwrap();
        let second = FilmRepository::create(&store, &sample_film("B")).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_film_update_missing_row_is_internal_error() {
        let store = MemoryStore::new();

        let ghost = FilmRecord {
            id: 5,
            name: "Ghost".to_string(),
            description: "Not stored".to_string(),
            release_date: NaiveDate::from_ymd_opt(1990, 7, 13).unwrap(),
            duration: Duration::minutes(127),
        };

        assert!(matches!(
            FilmRepository::update(&store, &ghost),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_replace_genres_swaps_full_set() {
        let store = MemoryStore::new();
        let film = FilmRepository::create(&store, &sample_film("Heat")).unwrap();

        store.replace_genres(film, &[2, 1, 2]).unwrap();
        let ids: Vec<i64> = store.genres_of(film).unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);

        store.replace_genres(film, &[6]).unwrap();
        let ids: Vec<i64> = store.genres_of(film).unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![6]);
    }

    #[test]
    fn test_replace_genres_unknown_film_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.replace_genres(9, &[1]),
            Err(AppError::NotFound("film", 9))
        ));
    }

    #[test]
    fn test_rating_roundtrip() {
        let store = MemoryStore::new();
        let film = FilmRepository::create(&store, &sample_film("Heat")).unwrap();

        assert!(store.rating_of(film).unwrap().is_none());

        store.set_rating(film, 4).unwrap();
        assert_eq!(store.rating_of(film).unwrap().unwrap().name, "R");

        store.set_rating(film, 1).unwrap();
        assert_eq!(store.rating_of(film).unwrap().unwrap().name, "G");
    }

    #[test]
    fn test_likes_are_idempotent_edges() {
        let store = MemoryStore::new();
        let film = FilmRepository::create(&store, &sample_film("Heat")).unwrap();
        let user = UserRepository::create(&store, &sample_user("amy")).unwrap();

        store.add_like(film, user).unwrap();
        store.add_like(film, user).unwrap();
        assert_eq!(store.like_count_of(film).unwrap(), 1);

        store.remove_like(film, user).unwrap();
        store.remove_like(film, user).unwrap();
        assert_eq!(store.like_count_of(film).unwrap(), 0);
    }

    #[test]
    fn test_like_counts_include_zero_like_films() {
        let store = MemoryStore::new();
        let liked = FilmRepository::create(&store, &sample_film("Heat")).unwrap();
        let ignored = FilmRepository::create(&store, &sample_film("Unwatched")).unwrap();
        let user = UserRepository::create(&store, &sample_user("amy")).unwrap();

        store.add_like(liked, user).unwrap();

        let counts = store.like_counts().unwrap();
        assert_eq!(counts.get(&liked), Some(&1));
        assert_eq!(counts.get(&ignored), Some(&0));
    }

    #[test]
    fn test_friend_edges_are_directed() {
        let store = MemoryStore::new();
        let amy = UserRepository::create(&store, &sample_user("amy")).unwrap();
        let bob = UserRepository::create(&store, &sample_user("bob")).unwrap();

        store.add_friend_edge(amy, bob).unwrap();

        assert_eq!(store.friend_ids_of(amy).unwrap(), vec![bob]);
        assert!(store.friend_ids_of(bob).unwrap().is_empty());

        store.remove_friend_edge(amy, bob).unwrap();
        assert!(store.friend_ids_of(amy).unwrap().is_empty());
    }

    #[test]
    fn test_email_taken_by_other() {
        let store = MemoryStore::new();
        let amy = UserRepository::create(&store, &sample_user("amy")).unwrap();
        let bob = UserRepository::create(&store, &sample_user("bob")).unwrap();

        assert!(!store.email_taken_by_other("amy@example.com", amy).unwrap());
        assert!(store.email_taken_by_other("amy@example.com", bob).unwrap());
        assert!(!store.email_taken_by_other("carol@example.com", bob).unwrap());
    }
}

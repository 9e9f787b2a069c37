// src/services/film_service_tests.rs
//
// Film service tests over the in-memory backend.
//
// INVARIANTS TESTED:
// - Reference checks run before any write: a bad genre or rating id
//   leaves the catalog untouched
// - Enrichment always reflects the most recently attached associations
// - Likes are idempotent edges; popularity orders by like count with
//   ascending id as the tie-break

#[cfg(test)]
mod film_service_tests {
    use crate::domain::user::NewUser;
    use crate::error::AppError;
    use crate::repositories::{MemoryStore, UserRepository};
    use crate::services::{CreateFilmRequest, FilmService, RankingEngine, UpdateFilmRequest};
    use chrono::{Duration, NaiveDate};
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, FilmService) {
        let store = Arc::new(MemoryStore::new());
        let ranking = Arc::new(RankingEngine::new(store.clone(), store.clone()));
        let service = FilmService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            ranking,
        );
        (store, service)
    }

    fn film_request(name: &str) -> CreateFilmRequest {
        CreateFilmRequest {
            name: name.to_string(),
            description: "A film".to_string(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            duration: Duration::minutes(120),
            mpa_id: 1,
            genre_ids: vec![],
        }
    }

    fn add_user(store: &MemoryStore, login: &str) -> i64 {
        UserRepository::create(
            store,
            &NewUser {
                login: login.to_string(),
                email: format!("{}@example.com", login),
                name: login.to_string(),
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_create_film_returns_enriched_film() {
        let (_, service) = setup();

        let mut request = film_request("Heat");
        request.mpa_id = 4;
        request.genre_ids = vec![2, 4];

        let film = service.create_film(request).unwrap();

        assert_eq!(film.id, 1);
        assert_eq!(film.mpa.name, "R");
        let genre_ids: Vec<i64> = film.genres.iter().map(|g| g.id).collect();
        assert_eq!(genre_ids, vec![2, 4]);
    }

    #[test]
    fn test_create_film_deduplicates_genres() {
        let (_, service) = setup();

        let mut request = film_request("Heat");
        request.genre_ids = vec![2, 1, 2, 1];

        let film = service.create_film(request).unwrap();
        let genre_ids: Vec<i64> = film.genres.iter().map(|g| g.id).collect();
        assert_eq!(genre_ids, vec![1, 2]);
    }

    #[test]
    fn test_create_film_with_unknown_genre_writes_nothing() {
        let (_, service) = setup();

        let mut request = film_request("Heat");
        request.genre_ids = vec![1, 99];

        match service.create_film(request) {
            Err(AppError::NotFound("genre", 99)) => {}
            other => panic!("expected genre NotFound, got {:?}", other),
        }

        assert!(service.all_films().unwrap().is_empty());
    }

    #[test]
    fn test_create_film_with_unknown_rating_writes_nothing() {
        let (_, service) = setup();

        let mut request = film_request("Heat");
        request.mpa_id = 42;

        match service.create_film(request) {
            Err(AppError::NotFound("mpa rating", 42)) => {}
            other => panic!("expected mpa NotFound, got {:?}", other),
        }

        assert!(service.all_films().unwrap().is_empty());
    }

    #[test]
    fn test_create_film_rejects_invalid_release_date() {
        let (_, service) = setup();

        let mut request = film_request("Too early");
        request.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();

        assert!(matches!(
            service.create_film(request),
            Err(AppError::Domain(_))
        ));
    }

    #[test]
    fn test_update_film_replaces_associations() {
        let (_, service) = setup();

        let mut request = film_request("Heat");
        request.mpa_id = 4;
        request.genre_ids = vec![2];
        let created = service.create_film(request).unwrap();

        let updated = service
            .update_film(UpdateFilmRequest {
                film_id: created.id,
                name: "Heat (remastered)".to_string(),
                description: "A film".to_string(),
                release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
                duration: Duration::minutes(170),
                mpa_id: 3,
                genre_ids: vec![1, 6],
            })
            .unwrap();

        assert_eq!(updated.name, "Heat (remastered)");
        assert_eq!(updated.mpa.name, "PG-13");
        let genre_ids: Vec<i64> = updated.genres.iter().map(|g| g.id).collect();
        assert_eq!(genre_ids, vec![1, 6]);

        // Reading back sees the same associations, not the old ones.
        let fetched = service.film_by_id(created.id).unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_unknown_film_is_not_found() {
        let (_, service) = setup();

        let result = service.update_film(UpdateFilmRequest {
            film_id: 7,
            name: "Ghost".to_string(),
            description: "A film".to_string(),
            release_date: NaiveDate::from_ymd_opt(1990, 7, 13).unwrap(),
            duration: Duration::minutes(127),
            mpa_id: 1,
            genre_ids: vec![],
        });

        match result {
            Err(AppError::NotFound("film", 7)) => {}
            other => panic!("expected film NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_film_by_id_unknown_is_not_found() {
        let (_, service) = setup();

        assert!(matches!(
            service.film_by_id(3),
            Err(AppError::NotFound("film", 3))
        ));
    }

    #[test]
    fn test_add_like_requires_film_and_user() {
        let (store, service) = setup();

        let film = service.create_film(film_request("Heat")).unwrap();
        let user = add_user(&store, "amy");

        match service.add_like(99, user) {
            Err(AppError::NotFound("film", 99)) => {}
            other => panic!("expected film NotFound, got {:?}", other),
        }
        match service.add_like(film.id, 99) {
            Err(AppError::NotFound("user", 99)) => {}
            other => panic!("expected user NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_likes_count_once() {
        let (store, service) = setup();

        let quiet = service.create_film(film_request("Quiet")).unwrap();
        let loud = service.create_film(film_request("Loud")).unwrap();
        let amy = add_user(&store, "amy");
        let bob = add_user(&store, "bob");

        // Two distinct likes for "Loud", one (repeated) like for "Quiet".
        service.add_like(loud.id, amy).unwrap();
        service.add_like(loud.id, bob).unwrap();
        service.add_like(quiet.id, amy).unwrap();
        service.add_like(quiet.id, amy).unwrap();

        let ranked = service.popular_films(Some(10)).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![loud.id, quiet.id]);
    }

    #[test]
    fn test_remove_absent_like_is_a_no_op() {
        let (store, service) = setup();

        let film = service.create_film(film_request("Heat")).unwrap();
        let user = add_user(&store, "amy");

        service.remove_like(film.id, user).unwrap();
    }

    #[test]
    fn test_popular_films_are_enriched() {
        let (_, service) = setup();

        let mut request = film_request("Heat");
        request.mpa_id = 4;
        request.genre_ids = vec![6];
        service.create_film(request).unwrap();

        let ranked = service.popular_films(None).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].mpa.name, "R");
        assert_eq!(ranked[0].genres.len(), 1);
    }
}

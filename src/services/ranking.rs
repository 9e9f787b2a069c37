// src/services/ranking.rs
use crate::domain::film::FilmRecord;
use crate::error::AppResult;
use crate::repositories::{AssociationRepository, FilmRepository};
use std::sync::Arc;

/// Films returned by `popular` when the caller gives no usable count.
pub const DEFAULT_POPULAR_COUNT: i64 = 10;

/// Orders films by how many users like them.
///
/// Ordering is deterministic across backends: descending like count,
/// then ascending film id. Films nobody liked rank last but are never
/// dropped, so a request larger than the catalog returns everything.
pub struct RankingEngine {
    film_repo: Arc<dyn FilmRepository>,
    association_repo: Arc<dyn AssociationRepository>,
}

impl RankingEngine {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        association_repo: Arc<dyn AssociationRepository>,
    ) -> Self {
        Self {
            film_repo,
            association_repo,
        }
    }

    /// Top `count` films by like count. Non-positive or absent counts
    /// fall back to [`DEFAULT_POPULAR_COUNT`].
    pub fn popular(&self, count: Option<i64>) -> AppResult<Vec<FilmRecord>> {
        let limit = match count {
            Some(n) if n > 0 => n,
            _ => DEFAULT_POPULAR_COUNT,
        };

        let mut films = self.film_repo.list_all()?;
        let counts = self.association_repo.like_counts()?;

        films.sort_by(|a, b| {
            let likes_a = counts.get(&a.id).copied().unwrap_or(0);
            let likes_b = counts.get(&b.id).copied().unwrap_or(0);
            likes_b.cmp(&likes_a).then_with(|| a.id.cmp(&b.id))
        });
        films.truncate(limit as usize);

        Ok(films)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MemoryStore, UserRepository};
    use chrono::{Duration, NaiveDate};

    fn setup() -> (Arc<MemoryStore>, RankingEngine) {
        let store = Arc::new(MemoryStore::new());
        let engine = RankingEngine::new(store.clone(), store.clone());
        (store, engine)
    }

    fn add_film(store: &MemoryStore, name: &str) -> i64 {
        FilmRepository::create(
            store,
            &crate::domain::film::NewFilm {
                name: name.to_string(),
                description: "A film".to_string(),
                release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                duration: Duration::minutes(100),
            },
        )
        .unwrap()
    }

    fn add_user(store: &MemoryStore, login: &str) -> i64 {
        UserRepository::create(
            store,
            &crate::domain::user::NewUser {
                login: login.to_string(),
                email: format!("{}@example.com", login),
                name: login.to_string(),
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_popular_orders_by_like_count_descending() {
        let (store, engine) = setup();

        let lonely = add_film(&store, "One like");
        let favorite = add_film(&store, "Two likes");
        let amy = add_user(&store, "amy");
        let bob = add_user(&store, "bob");

        store.add_like(lonely, amy).unwrap();
        store.add_like(favorite, amy).unwrap();
        store.add_like(favorite, bob).unwrap();

        let ranked = engine.popular(Some(10)).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![favorite, lonely]);
    }

    #[test]
    fn test_popular_ties_break_on_ascending_id() {
        let (store, engine) = setup();

        let first = add_film(&store, "A");
        let second = add_film(&store, "B");
        let third = add_film(&store, "C");
        let amy = add_user(&store, "amy");

        store.add_like(second, amy).unwrap();

        let ranked = engine.popular(None).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![second, first, third]);
    }

    #[test]
    fn test_popular_includes_zero_like_films() {
        let (store, engine) = setup();

        add_film(&store, "Nobody watched this");

        let ranked = engine.popular(None).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_popular_defaults_count_when_non_positive() {
        let (store, engine) = setup();

        for i in 0..12 {
            add_film(&store, &format!("Film {}", i));
        }

        assert_eq!(engine.popular(None).unwrap().len(), 10);
        assert_eq!(engine.popular(Some(0)).unwrap().len(), 10);
        assert_eq!(engine.popular(Some(-3)).unwrap().len(), 10);
        assert_eq!(engine.popular(Some(5)).unwrap().len(), 5);
    }

    #[test]
    fn test_popular_with_oversized_count_returns_all() {
        let (store, engine) = setup();

        add_film(&store, "A");
        add_film(&store, "B");

        assert_eq!(engine.popular(Some(500)).unwrap().len(), 2);
    }
}

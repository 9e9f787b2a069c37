// src/services/film_service.rs
use crate::domain::film::{validate_film, Film, FilmRecord, NewFilm};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    AssociationRepository, FilmRepository, GenreRepository, MpaRepository, UserRepository,
};
use crate::services::ranking::RankingEngine;
use chrono::{Duration, NaiveDate};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateFilmRequest {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: Duration,
    pub mpa_id: i64,
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct UpdateFilmRequest {
    pub film_id: i64,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: Duration,
    pub mpa_id: i64,
    pub genre_ids: Vec<i64>,
}

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    user_repo: Arc<dyn UserRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    mpa_repo: Arc<dyn MpaRepository>,
    association_repo: Arc<dyn AssociationRepository>,
    ranking: Arc<RankingEngine>,
}

impl FilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        user_repo: Arc<dyn UserRepository>,
        genre_repo: Arc<dyn GenreRepository>,
        mpa_repo: Arc<dyn MpaRepository>,
        association_repo: Arc<dyn AssociationRepository>,
        ranking: Arc<RankingEngine>,
    ) -> Self {
        Self {
            film_repo,
            user_repo,
            genre_repo,
            mpa_repo,
            association_repo,
            ranking,
        }
    }

    pub fn create_film(&self, request: CreateFilmRequest) -> AppResult<Film> {
        let new_film = NewFilm {
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
        };

        validate_film(&new_film)?;
        self.check_references(request.mpa_id, &request.genre_ids)?;

        let film_id = self.film_repo.create(&new_film)?;
        self.association_repo.set_rating(film_id, request.mpa_id)?;
        self.association_repo
            .replace_genres(film_id, &request.genre_ids)?;

        log::info!("created film {} ({})", film_id, new_film.name);
        self.film_by_id(film_id)
    }

    pub fn update_film(&self, request: UpdateFilmRequest) -> AppResult<Film> {
        if !self.film_repo.exists(request.film_id)? {
            return Err(AppError::NotFound("film", request.film_id));
        }

        let candidate = NewFilm {
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
        };

        validate_film(&candidate)?;
        self.check_references(request.mpa_id, &request.genre_ids)?;

        self.film_repo.update(&FilmRecord {
            id: request.film_id,
            name: candidate.name,
            description: candidate.description,
            release_date: candidate.release_date,
            duration: candidate.duration,
        })?;
        self.association_repo
            .set_rating(request.film_id, request.mpa_id)?;
        self.association_repo
            .replace_genres(request.film_id, &request.genre_ids)?;

        log::info!("updated film {}", request.film_id);
        self.film_by_id(request.film_id)
    }

    pub fn film_by_id(&self, film_id: i64) -> AppResult<Film> {
        let record = self
            .film_repo
            .get_by_id(film_id)?
            .ok_or(AppError::NotFound("film", film_id))?;

        self.enrich(record)
    }

    pub fn all_films(&self) -> AppResult<Vec<Film>> {
        self.film_repo
            .list_all()?
            .into_iter()
            .map(|record| self.enrich(record))
            .collect()
    }

    /// Top `count` films by like count, enriched. See [`RankingEngine`]
    /// for the ordering contract.
    pub fn popular_films(&self, count: Option<i64>) -> AppResult<Vec<Film>> {
        self.ranking
            .popular(count)?
            .into_iter()
            .map(|record| self.enrich(record))
            .collect()
    }

    pub fn add_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.check_like_endpoints(film_id, user_id)?;
        self.association_repo.add_like(film_id, user_id)?;

        log::info!("user {} likes film {}", user_id, film_id);
        Ok(())
    }

    pub fn remove_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.check_like_endpoints(film_id, user_id)?;
        self.association_repo.remove_like(film_id, user_id)?;

        log::info!("user {} unliked film {}", user_id, film_id);
        Ok(())
    }

    /// Both reference checks run before any write, so a bad id leaves
    /// the store untouched.
    fn check_references(&self, mpa_id: i64, genre_ids: &[i64]) -> AppResult<()> {
        if !self.mpa_repo.exists(mpa_id)? {
            return Err(AppError::NotFound("mpa rating", mpa_id));
        }
        for &genre_id in genre_ids {
            if !self.genre_repo.exists(genre_id)? {
                return Err(AppError::NotFound("genre", genre_id));
            }
        }
        Ok(())
    }

    fn check_like_endpoints(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        if !self.film_repo.exists(film_id)? {
            return Err(AppError::NotFound("film", film_id));
        }
        if !self.user_repo.exists(user_id)? {
            return Err(AppError::NotFound("user", user_id));
        }
        Ok(())
    }

    fn enrich(&self, record: FilmRecord) -> AppResult<Film> {
        let mpa = match self.association_repo.rating_of(record.id)? {
            Some(mpa) => mpa,
            None => {
                // Every stored film should have a rating attached.
                log::warn!("film {} has no rating attached", record.id);
                return Err(AppError::NotFound("rating for film", record.id));
            }
        };
        let genres = self.association_repo.genres_of(record.id)?;

        Ok(Film::from_parts(record, mpa, genres))
    }
}

// src/api/dto.rs
//
// Wire representations. This is the only layer that knows durations
// travel as whole minutes; everything inside the crate works with
// `chrono::Duration`.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::film::Film;
use crate::domain::user::User;
use crate::domain::{Genre, Mpa};
use crate::error::{AppError, AppResult};
use crate::services::{CreateFilmRequest, CreateUserRequest, UpdateFilmRequest, UpdateUserRequest};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Running time in minutes
    pub duration: i64,
    pub mpa: MpaDto,
    pub genres: Vec<GenreDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub name: String,
    pub birthday: NaiveDate,
    pub friends: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MpaDto {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Film> for FilmDto {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration.num_minutes(),
            mpa: film.mpa.into(),
            genres: film.genres.into_iter().map(GenreDto::from).collect(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            email: user.email,
            name: user.name,
            birthday: user.birthday,
            friends: user.friends,
        }
    }
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

impl From<Mpa> for MpaDto {
    fn from(mpa: Mpa) -> Self {
        Self {
            id: mpa.id,
            name: mpa.name,
            description: mpa.description,
        }
    }
}

/// Inbound film body for both create and update; update requires `id`.
/// The rating and genres arrive as id references, extra fields such as
/// a client-supplied name are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmPayload {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Running time in minutes
    pub duration: i64,
    pub mpa: MpaRef,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MpaRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: Option<i64>,
    pub login: String,
    pub email: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

impl FilmPayload {
    pub fn into_create_request(self) -> CreateFilmRequest {
        CreateFilmRequest {
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: Duration::minutes(self.duration),
            mpa_id: self.mpa.id,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }

    pub fn into_update_request(self) -> AppResult<UpdateFilmRequest> {
        let film_id = self.id.ok_or(AppError::MissingId)?;

        Ok(UpdateFilmRequest {
            film_id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: Duration::minutes(self.duration),
            mpa_id: self.mpa.id,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        })
    }
}

impl UserPayload {
    pub fn into_create_request(self) -> CreateUserRequest {
        CreateUserRequest {
            login: self.login,
            email: self.email,
            name: self.name,
            birthday: self.birthday,
        }
    }

    pub fn into_update_request(self) -> AppResult<UpdateUserRequest> {
        let user_id = self.id.ok_or(AppError::MissingId)?;

        Ok(UpdateUserRequest {
            user_id,
            login: self.login,
            email: self.email,
            name: self.name,
            birthday: self.birthday,
        })
    }
}

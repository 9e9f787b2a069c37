use chrono::{Duration, NaiveDate};

use crate::domain::{Genre, Mpa};

/// Scalar film row as stored. The rating and genre associations live in
/// the association store and are attached by the film service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmRecord {
    /// Store-assigned immutable identifier
    pub id: i64,

    /// Film title
    pub name: String,

    /// Free-form description, at most 200 characters
    pub description: String,

    /// Theatrical release date
    pub release_date: NaiveDate,

    /// Running time, strictly positive
    pub duration: Duration,
}

/// Scalar fields for inserting or rewriting a film row.
/// The identifier is assigned by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewFilm {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: Duration,
}

/// Fully enriched film: the stored scalars plus the rating and genre set.
/// This is the shape external callers see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: Duration,

    /// Exactly one rating per film
    pub mpa: Mpa,

    /// Zero or more genres, unique by identifier
    pub genres: Vec<Genre>,
}

impl Film {
    /// Assemble an enriched film from its stored parts.
    pub fn from_parts(record: FilmRecord, mpa: Mpa, genres: Vec<Genre>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            release_date: record.release_date,
            duration: record.duration,
            mpa,
            genres,
        }
    }
}

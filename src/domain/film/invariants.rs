use chrono::{Duration, NaiveDate};

use super::entity::NewFilm;
use crate::domain::{DomainError, DomainResult};

/// Maximum length of a film description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Validates all Film invariants
/// These are the absolute rules that must hold for a film to be stored
pub fn validate_film(film: &NewFilm) -> DomainResult<()> {
    validate_name(&film.name)?;
    validate_description(&film.description)?;
    validate_release_date(film.release_date)?;
    validate_duration(film.duration)?;
    Ok(())
}

/// Name cannot be empty or whitespace-only
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "film name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Description cannot be blank and is capped at 200 characters
fn validate_description(description: &str) -> DomainResult<()> {
    if description.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "film description cannot be empty".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::InvariantViolation(format!(
            "film description cannot exceed {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

/// Release date cannot precede the first public film screening
fn validate_release_date(release_date: NaiveDate) -> DomainResult<()> {
    let earliest = NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid calendar date");
    if release_date < earliest {
        return Err(DomainError::InvariantViolation(
            "release date cannot be before 1895-12-28".to_string(),
        ));
    }
    Ok(())
}

/// Duration must be strictly positive
fn validate_duration(duration: Duration) -> DomainResult<()> {
    if duration <= Duration::zero() {
        return Err(DomainError::InvariantViolation(
            "film duration must be positive".to_string(),
        ));
    }
    Ok(())
}

use chrono::{NaiveDate, Utc};

use super::entity::NewUser;
use crate::domain::{DomainError, DomainResult};

/// Validates all User invariants
pub fn validate_user(user: &NewUser) -> DomainResult<()> {
    validate_login(&user.login)?;
    validate_email(&user.email)?;
    validate_birthday(user.birthday)?;
    Ok(())
}

/// Login cannot be empty and cannot contain whitespace
fn validate_login(login: &str) -> DomainResult<()> {
    if login.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "user login cannot be empty".to_string(),
        ));
    }
    if login.chars().any(char::is_whitespace) {
        return Err(DomainError::InvariantViolation(
            "user login cannot contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Email cannot be empty and must look like an address:
/// one '@' with non-empty sides, no whitespace
fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "user email cannot be empty".to_string(),
        ));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::InvariantViolation(format!(
            "user email '{}' is not a valid address",
            email
        )));
    }
    Ok(())
}

/// Birthday cannot be in the future
fn validate_birthday(birthday: NaiveDate) -> DomainResult<()> {
    if birthday > Utc::now().date_naive() {
        return Err(DomainError::InvariantViolation(
            "user birthday cannot be in the future".to_string(),
        ));
    }
    Ok(())
}

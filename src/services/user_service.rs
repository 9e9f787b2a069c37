// src/services/user_service.rs
use crate::domain::user::{validate_user, NewUser, User, UserRecord};
use crate::error::{AppError, AppResult};
use crate::repositories::{AssociationRepository, UserRepository};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub login: String,
    pub email: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub user_id: i64,
    pub login: String,
    pub email: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    association_repo: Arc<dyn AssociationRepository>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        association_repo: Arc<dyn AssociationRepository>,
    ) -> Self {
        Self {
            user_repo,
            association_repo,
        }
    }

    pub fn create_user(&self, request: CreateUserRequest) -> AppResult<User> {
        // A blank or absent display name falls back to the login.
        let name = match request.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => request.login.clone(),
        };

        let new_user = NewUser {
            login: request.login,
            email: request.email,
            name,
            birthday: request.birthday,
        };

        validate_user(&new_user)?;

        let user_id = self.user_repo.create(&new_user)?;

        log::info!("created user {} ({})", user_id, new_user.login);
        self.user_by_id(user_id)
    }

    pub fn update_user(&self, request: UpdateUserRequest) -> AppResult<User> {
        let existing = self
            .user_repo
            .get_by_id(request.user_id)?
            .ok_or(AppError::NotFound("user", request.user_id))?;

        // A null name keeps the stored one; login, email and birthday
        // are always overwritten.
        let name = request.name.unwrap_or(existing.name);

        let candidate = NewUser {
            login: request.login,
            email: request.email,
            name,
            birthday: request.birthday,
        };

        validate_user(&candidate)?;

        if self
            .user_repo
            .email_taken_by_other(&candidate.email, request.user_id)?
        {
            return Err(AppError::UpdateConflict(format!(
                "email {} is already in use",
                candidate.email
            )));
        }

        self.user_repo.update(&UserRecord {
            id: request.user_id,
            login: candidate.login,
            email: candidate.email,
            name: candidate.name,
            birthday: candidate.birthday,
        })?;

        log::info!("updated user {}", request.user_id);
        self.user_by_id(request.user_id)
    }

    pub fn user_by_id(&self, user_id: i64) -> AppResult<User> {
        let record = self
            .user_repo
            .get_by_id(user_id)?
            .ok_or(AppError::NotFound("user", user_id))?;

        self.enrich(record)
    }

    pub fn all_users(&self) -> AppResult<Vec<User>> {
        self.user_repo
            .list_all()?
            .into_iter()
            .map(|record| self.enrich(record))
            .collect()
    }

    /// Friendship is symmetric: the store keeps directed edges and this
    /// service mirrors every mutation, so both sides always agree.
    pub fn add_friend(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        self.check_both_exist(user_id, friend_id)?;

        self.association_repo.add_friend_edge(user_id, friend_id)?;
        self.association_repo.add_friend_edge(friend_id, user_id)?;

        log::info!("users {} and {} are now friends", user_id, friend_id);
        Ok(())
    }

    pub fn remove_friend(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        self.check_both_exist(user_id, friend_id)?;

        self.association_repo
            .remove_friend_edge(user_id, friend_id)?;
        self.association_repo
            .remove_friend_edge(friend_id, user_id)?;

        log::info!("users {} and {} are no longer friends", user_id, friend_id);
        Ok(())
    }

    pub fn friends_of(&self, user_id: i64) -> AppResult<Vec<User>> {
        if !self.user_repo.exists(user_id)? {
            return Err(AppError::NotFound("user", user_id));
        }

        self.association_repo
            .friend_ids_of(user_id)?
            .into_iter()
            .map(|friend_id| self.user_by_id(friend_id))
            .collect()
    }

    pub fn common_friends(&self, user_id: i64, other_id: i64) -> AppResult<Vec<User>> {
        self.check_both_exist(user_id, other_id)?;

        let mine: HashSet<i64> = self
            .association_repo
            .friend_ids_of(user_id)?
            .into_iter()
            .collect();
        let theirs: HashSet<i64> = self
            .association_repo
            .friend_ids_of(other_id)?
            .into_iter()
            .collect();

        let mut shared: Vec<i64> = mine.intersection(&theirs).copied().collect();
        shared.sort_unstable();

        shared
            .into_iter()
            .map(|friend_id| self.user_by_id(friend_id))
            .collect()
    }

    fn check_both_exist(&self, user_id: i64, other_id: i64) -> AppResult<()> {
        if !self.user_repo.exists(user_id)? {
            return Err(AppError::NotFound("user", user_id));
        }
        if !self.user_repo.exists(other_id)? {
            return Err(AppError::NotFound("user", other_id));
        }
        Ok(())
    }

    fn enrich(&self, record: UserRecord) -> AppResult<User> {
        let friends = self.association_repo.friend_ids_of(record.id)?;
        Ok(User::from_parts(record, friends))
    }
}

//! User lifecycle service.
//!
//! # Responsibility
//! - Provide create/get/update/delete entry points over users.
//! - Enforce email uniqueness at creation time.
//! - Project users into `UserSummary` for list/lookup callers.
//!
//! # Invariants
//! - `create` never persists a user whose email is already taken.
//! - `update` uses full overwrite semantics and does not re-check email.
//! - `get_all_users` preserves store order.

use crate::model::user::{User, UserId, UserSummary};
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Generic create/get/update/delete contract for entity services.
pub trait Crud<T> {
    type Id;

    fn create(&self, entity: &T) -> ServiceResult<T>;
    fn get(&self, id: Self::Id) -> ServiceResult<T>;
    /// `None` input is a no-op that yields `Ok(None)`.
    fn update(&self, entity: Option<&T>) -> ServiceResult<Option<T>>;
    fn delete(&self, id: Self::Id) -> ServiceResult<()>;
}

/// Use-case service for user lifecycle operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new user and returns it with its assigned id.
    ///
    /// Any id carried by `user` is ignored; the store always assigns a new one.
    ///
    /// # Errors
    /// - `Conflict` when another user already has the same email.
    pub fn create(&self, user: &User) -> ServiceResult<User> {
        if self.repo.exists_by_email(&user.email)? {
            warn!("event=user_create module=service status=rejected reason=email_taken");
            return Err(ServiceError::Conflict(
                "Email is taken, try another Email!".to_string(),
            ));
        }

        let fresh = User {
            id: None,
            ..user.clone()
        };
        let saved = self.repo.save(&fresh)?;
        info!(
            "event=user_create module=service status=ok user_id={} role={}",
            saved.id.unwrap_or_default(),
            saved.role
        );
        Ok(saved)
    }

    /// Loads one user by id.
    pub fn get(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("No User With ID: {id}")))
    }

    /// Overwrites a user record.
    ///
    /// `None` is accepted and returns `Ok(None)` without touching the store.
    pub fn update(&self, user: Option<&User>) -> ServiceResult<Option<User>> {
        let Some(user) = user else {
            return Ok(None);
        };

        let saved = self.repo.save(user)?;
        info!(
            "event=user_update module=service status=ok user_id={}",
            saved.id.unwrap_or_default()
        );
        Ok(Some(saved))
    }

    /// Deletes one user by id.
    ///
    /// # Errors
    /// - `NotFound` when no user has this id. A successful delete returns `Ok`.
    pub fn delete(&self, id: UserId) -> ServiceResult<()> {
        let Some(user) = self.repo.find_by_id(id)? else {
            warn!("event=user_delete module=service status=rejected reason=not_found user_id={id}");
            return Err(ServiceError::NotFound(format!("No User With ID: {id}")));
        };

        self.repo.delete(&user)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }

    /// Lists every user as a summary, in store order.
    pub fn get_all_users(&self) -> ServiceResult<Vec<UserSummary>> {
        let users = self.repo.find_all()?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    /// Finds one user summary by exact email.
    pub fn find_user_by_email(&self, email: &str) -> ServiceResult<UserSummary> {
        self.repo
            .find_by_email(email)?
            .map(UserSummary::from)
            .ok_or_else(|| ServiceError::NotFound(format!("No User With Email: {email}")))
    }
}

impl<R: UserRepository> Crud<User> for UserService<R> {
    type Id = UserId;

    fn create(&self, entity: &User) -> ServiceResult<User> {
        UserService::create(self, entity)
    }

    fn get(&self, id: UserId) -> ServiceResult<User> {
        UserService::get(self, id)
    }

    fn update(&self, entity: Option<&User>) -> ServiceResult<Option<User>> {
        UserService::update(self, entity)
    }

    fn delete(&self, id: UserId) -> ServiceResult<()> {
        UserService::delete(self, id)
    }
}

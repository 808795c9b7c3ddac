//! User directory service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! a [`UserRepository`], translating persistence failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User};

const REPOSITORY_UNAVAILABLE_MESSAGE: &str = "user repository unavailable";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(REPOSITORY_UNAVAILABLE_MESSAGE)
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("a user with this {field} already exists"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

/// Service backing both user driving ports.
#[derive(Clone)]
pub struct UserDirectoryService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> UserDirectoryService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .list_all()
            .await
            .map_err(map_repository_error)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn add_user(&self, user: NewUser) -> Result<User, Error> {
        let stored = self
            .repository
            .insert(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %stored.id(), "user added");
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "user_directory_tests.rs"]
mod tests;
